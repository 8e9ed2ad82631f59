//! # Briar Repository
//!
//! Postgres data access for the Briar catalog: connection pooling, the
//! repository traits consumed by the service layer, and their sqlx-backed
//! implementations.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::{create_pool, DatabasePool};
pub use postgres::*;
pub use traits::*;
