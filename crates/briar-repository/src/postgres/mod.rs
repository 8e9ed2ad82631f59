//! Postgres repository implementations.

mod accessory_repository;
mod catalog_query_repository;
mod pipe_repository;
mod review_repository;
mod tobacco_repository;
mod user_repository;

pub use accessory_repository::PgAccessoryRepository;
pub use catalog_query_repository::PgCatalogQueryRepository;
pub use pipe_repository::PgPipeRepository;
pub use review_repository::PgReviewRepository;
pub use tobacco_repository::PgTobaccoRepository;
pub use user_repository::PgUserRepository;
