//! HTTP middleware.

pub mod session;

pub use session::{session_middleware, SESSION_COOKIE};
