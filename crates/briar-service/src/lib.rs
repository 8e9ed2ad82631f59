//! # Briar Service
//!
//! Business logic for the Briar catalog. The centerpiece is the cache-aside
//! layer in [`cache`]: every public read goes through
//! [`Cache::get_or_compute`](cache::Cache::get_or_compute) and every
//! mutation through
//! [`Cache::invalidate_entity`](cache::Cache::invalidate_entity) before it
//! is acknowledged.

pub mod cache;
pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
