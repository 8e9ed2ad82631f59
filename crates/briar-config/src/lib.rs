//! # Briar Config
//!
//! Layered configuration loading for the Briar catalog backend.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::ConfigLoader;
