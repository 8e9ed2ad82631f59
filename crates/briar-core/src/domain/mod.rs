//! Domain model for the catalog.

pub mod entities;
pub mod filter;
pub mod value_objects;

pub use entities::*;
pub use filter::*;
pub use value_objects::*;
