//! Service implementations.

pub mod accessory_service;
pub mod auth_service;
pub mod image_service;
pub mod pipe_service;
pub mod review_service;
pub mod search_service;
pub mod stats_service;
pub mod tobacco_service;

pub use accessory_service::AccessoryService;
pub use auth_service::AuthService;
pub use image_service::{ImageService, StoredImage};
pub use pipe_service::PipeService;
pub use review_service::ReviewService;
pub use search_service::SearchService;
pub use stats_service::StatsService;
pub use tobacco_service::TobaccoService;
