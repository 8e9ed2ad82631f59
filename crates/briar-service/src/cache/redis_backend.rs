//! Redis-backed cache implementation.

use super::backend::{CacheBackend, CacheError};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Redis cache backend over a deadpool connection pool.
///
/// The pool establishes connections lazily, so constructing this backend
/// never blocks on Redis being up.
pub struct RedisCacheBackend {
    pool: Arc<Pool>,
}

impl RedisCacheBackend {
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<deadpool_redis::Connection, CacheError> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheError::Connection(format!("failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::Command(format!("GET '{key}': {e}")))?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| CacheError::Command(format!("SETEX '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| CacheError::Command(format!("DEL '{key}': {e}")))?;
        Ok(deleted > 0)
    }

    async fn del_many(&self, keys: &[String]) -> Result<u64, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn().await?;
        let deleted: i64 = conn
            .del(keys)
            .await
            .map_err(|e| CacheError::Command(format!("DEL batch: {e}")))?;
        Ok(deleted as u64)
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.conn().await?;

        // KEYS is acceptable at this keyspace size; SCAN would be the
        // upgrade if the catalog ever grows past a few thousand entries.
        let keys: Vec<String> = deadpool_redis::redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Command(format!("KEYS '{pattern}': {e}")))?;
        Ok(keys)
    }
}
