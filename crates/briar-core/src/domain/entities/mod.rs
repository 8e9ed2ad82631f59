//! Catalog entities.

mod accessory;
mod pipe;
mod review;
mod tobacco;
mod user;

pub use accessory::Accessory;
pub use pipe::Pipe;
pub use review::{RatingSummary, Review};
pub use tobacco::Tobacco;
pub use user::User;
