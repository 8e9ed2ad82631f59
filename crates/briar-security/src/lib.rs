//! # Briar Security
//!
//! Password hashing and server-side session management.

pub mod password;
pub mod session;

pub use password::PasswordHasher;
pub use session::{Session, SessionStore};
