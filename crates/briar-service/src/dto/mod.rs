//! Data transfer objects for the service layer.

pub mod auth_dto;
pub mod catalog_dto;
pub mod review_dto;
pub mod stats_dto;

pub use auth_dto::*;
pub use catalog_dto::*;
pub use review_dto::*;
pub use stats_dto::*;
