//! The cache-aside layer.
//!
//! Reads go cache-first and fall through to the backing store; mutations
//! invalidate every key that could go stale before they are acknowledged.
//! The cache is strictly an accelerator: any backend failure degrades the
//! affected operation to a miss or a no-op, and callers never see a cache
//! error. Store errors, by contrast, always propagate.
//!
//! There is no single-flight de-duplication: concurrent misses on the same
//! key may each hit the store and race their `set` calls. Entries are
//! overwritten wholesale, so the race costs redundant work, not
//! correctness, and staleness stays bounded by the TTL either way.

use super::backend::CacheBackend;
use super::cache_keys;
use briar_core::CatalogKind;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Default TTL for cached entities and lists (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Short TTL for volatile aggregates: stats and search (1 minute).
pub const SHORT_TTL: Duration = Duration::from_secs(60);

/// Fail-open cache facade over an optional [`CacheBackend`].
///
/// Constructed in disabled mode when Redis is turned off; every operation
/// then short-circuits to a miss or no-op and the application runs entirely
/// off the backing store.
pub struct Cache {
    backend: Option<Arc<dyn CacheBackend>>,
}

impl Cache {
    /// Creates a cache over a live backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a disabled cache where every read is a miss.
    #[must_use]
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// Whether a backend is attached.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Gets a typed value. Backend errors and undeserializable payloads are
    /// logged and reported as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let backend = self.backend.as_ref()?;
        match backend.get(key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    debug!("Cache hit for key '{}'", key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Discarding undeserializable cache entry '{}': {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                None
            }
            Err(e) => {
                warn!("Cache get failed for key '{}': {}", key, e);
                None
            }
        }
    }

    /// Stores a typed value with a TTL, best-effort. Returns whether the
    /// write reached the backend; callers are free to ignore the flag.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let Some(backend) = self.backend.as_ref() else {
            return false;
        };
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Cache serialization failed for key '{}': {}", key, e);
                return false;
            }
        };
        match backend.set_ex(key, &json, ttl).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Cache set failed for key '{}': {}", key, e);
                false
            }
        }
    }

    /// The read-through path: returns the cached value on a hit, otherwise
    /// runs `compute`, stores the result best-effort, and returns it.
    ///
    /// Errors from `compute` propagate unmodified; a broken cache can never
    /// mask them, and a broken cache alone never fails the read.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get::<T>(key).await {
            return Ok(cached);
        }

        let value = compute().await?;
        self.set(key, &value, ttl).await;
        Ok(value)
    }

    /// Deletes a single key, fire-and-forget.
    pub async fn delete(&self, key: &str) {
        let Some(backend) = self.backend.as_ref() else {
            return;
        };
        if let Err(e) = backend.del(key).await {
            warn!("Cache delete failed for key '{}': {}", key, e);
        }
    }

    /// Deletes every key matching a pattern. Returns the number of keys
    /// removed, 0 when the scan or batch delete fails.
    pub async fn delete_by_prefix(&self, pattern: &str) -> u64 {
        let Some(backend) = self.backend.as_ref() else {
            return 0;
        };
        let keys = match backend.keys_matching(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Cache key scan failed for pattern '{}': {}", pattern, e);
                return 0;
            }
        };
        if keys.is_empty() {
            return 0;
        }
        match backend.del_many(&keys).await {
            Ok(deleted) => {
                debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
                deleted
            }
            Err(e) => {
                warn!("Cache batch delete failed for pattern '{}': {}", pattern, e);
                0
            }
        }
    }

    /// The invalidation choke point every mutation goes through.
    ///
    /// Clears, in order: every cached list of the kind, the exact entity
    /// entry when an `id` is given, the aggregate stats entry, and every
    /// cached search result. Runs before the mutation is acknowledged.
    pub async fn invalidate_entity(&self, kind: CatalogKind, id: Option<Uuid>) {
        self.delete_by_prefix(&cache_keys::list_pattern(kind)).await;
        if let Some(id) = id {
            self.delete(&cache_keys::entity_key(kind, id)).await;
        }
        self.delete(cache_keys::STATS_KEY).await;
        self.delete_by_prefix(cache_keys::SEARCH_PATTERN).await;
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCacheBackend;
    use briar_core::{BriarError, BriarResult};

    fn memory_cache() -> Cache {
        Cache::new(Arc::new(MemoryCacheBackend::new()))
    }

    #[tokio::test]
    async fn test_disabled_cache_is_all_misses() {
        let cache = Cache::disabled();
        assert!(!cache.is_enabled());
        assert_eq!(cache.get::<String>("k").await, None);
        assert!(!cache.set("k", &"v", DEFAULT_TTL).await);
        assert_eq!(cache.delete_by_prefix("pipes:*").await, 0);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let cache = memory_cache();
        assert!(cache.set("k", &42u32, DEFAULT_TTL).await);
        assert_eq!(cache.get::<u32>("k").await, Some(42));
    }

    #[tokio::test]
    async fn test_get_after_delete_is_absent() {
        let cache = memory_cache();
        cache.set("k", &1u32, DEFAULT_TTL).await;
        cache.delete("k").await;
        assert_eq!(cache.get::<u32>("k").await, None);
    }

    #[tokio::test]
    async fn test_undeserializable_entry_is_a_miss() {
        let backend = Arc::new(MemoryCacheBackend::new());
        backend
            .set_ex("k", "not json at all", DEFAULT_TTL)
            .await
            .unwrap();
        let cache = Cache::new(backend);
        assert_eq!(cache.get::<u32>("k").await, None);
    }

    #[tokio::test]
    async fn test_get_or_compute_skips_compute_on_hit() {
        let cache = memory_cache();
        cache.set("k", &7u32, DEFAULT_TTL).await;

        let result: BriarResult<u32> = cache
            .get_or_compute("k", DEFAULT_TTL, || async {
                panic!("compute must not run on a hit")
            })
            .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_get_or_compute_propagates_compute_errors() {
        let cache = memory_cache();
        let result: BriarResult<u32> = cache
            .get_or_compute("k", DEFAULT_TTL, || async {
                Err(BriarError::Database("store down".to_string()))
            })
            .await;
        assert!(matches!(result, Err(BriarError::Database(_))));
        // A failed compute must not leave a cache entry behind.
        assert_eq!(cache.get::<u32>("k").await, None);
    }

    #[tokio::test]
    async fn test_invalidate_entity_clears_the_kinds_keyspace() {
        let cache = memory_cache();
        let id = Uuid::now_v7();
        cache
            .set(&cache_keys::entity_key(CatalogKind::Pipe, id), &1u32, DEFAULT_TTL)
            .await;
        cache.set("pipes:{\"a\":1}", &1u32, DEFAULT_TTL).await;
        cache.set("pipes:{\"b\":2}", &2u32, DEFAULT_TTL).await;
        cache.set(cache_keys::STATS_KEY, &3u32, SHORT_TTL).await;
        cache.set("search:{\"q\":\"briar\"}", &4u32, SHORT_TTL).await;
        // An unrelated kind must survive.
        cache.set("tobaccos:{}", &5u32, DEFAULT_TTL).await;

        cache.invalidate_entity(CatalogKind::Pipe, Some(id)).await;

        assert_eq!(
            cache
                .get::<u32>(&cache_keys::entity_key(CatalogKind::Pipe, id))
                .await,
            None
        );
        assert_eq!(cache.get::<u32>("pipes:{\"a\":1}").await, None);
        assert_eq!(cache.get::<u32>("pipes:{\"b\":2}").await, None);
        assert_eq!(cache.get::<u32>(cache_keys::STATS_KEY).await, None);
        assert_eq!(cache.get::<u32>("search:{\"q\":\"briar\"}").await, None);
        assert_eq!(cache.get::<u32>("tobaccos:{}").await, Some(5));
    }
}
