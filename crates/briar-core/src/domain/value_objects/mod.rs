//! Value objects shared across the domain.

mod kind;
mod role;
mod status;

pub use kind::{AccessoryKind, BlendType, CatalogKind, PipeShape, TobaccoCut};
pub use role::UserRole;
pub use status::{ItemStatus, ReviewStatus, UserStatus};
