//! # Briar REST
//!
//! REST API layer using Axum for the Briar catalog backend. Public catalog
//! reads, review submission, search, and stats need no session; catalog
//! management and moderation sit behind the `sid` session cookie.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
