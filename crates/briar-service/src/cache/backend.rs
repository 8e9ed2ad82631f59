//! Key-value cache backend contract.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Error raised by a cache backend.
///
/// These never cross the service boundary; the [`Cache`](super::Cache)
/// layer logs them and degrades to the backing store.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Could not reach the backend or obtain a connection.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// A command failed after a connection was established.
    #[error("cache command error: {0}")]
    Command(String),
}

/// Minimal key-value contract a cache backend must satisfy.
///
/// Values are JSON strings for type-erased storage; typed access lives in
/// the [`Cache`](super::Cache) layer. Every entry is written with an
/// explicit TTL, so backends never need an eviction policy beyond expiry.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Gets the raw value for a key, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Sets a value with a TTL, overwriting any previous entry wholesale.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Deletes a key, returning whether it existed.
    async fn del(&self, key: &str) -> Result<bool, CacheError>;

    /// Deletes a batch of keys, returning how many existed.
    async fn del_many(&self, keys: &[String]) -> Result<u64, CacheError>;

    /// Lists the keys matching a glob-style pattern.
    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>, CacheError>;
}
