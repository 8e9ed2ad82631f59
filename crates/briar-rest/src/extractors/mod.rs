pub mod auth;
pub mod pagination;

pub use auth::{CurrentUser, RequireAdmin, RequireEditor};
pub use pagination::PaginationQuery;
