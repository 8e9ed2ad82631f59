//! In-memory cache backend with real TTL expiry.
//!
//! Used by the test suites and by local development runs that have no
//! Redis. Expired entries are dropped lazily on access.

use super::backend::{CacheBackend, CacheError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache backend.
#[derive(Default)]
pub struct MemoryCacheBackend {
    entries: DashMap<String, Entry>,
}

impl MemoryCacheBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|e| e.value().expires_at > now)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Glob match supporting `*` (any run of characters) only, which is the
/// full extent of what the key scheme uses.
fn glob_matches(pattern: &str, key: &str) -> bool {
    fn inner(p: &[u8], k: &[u8]) -> bool {
        match (p.first().copied(), k.first().copied()) {
            (None, None) => true,
            (Some(b'*'), _) => {
                inner(&p[1..], k) || (!k.is_empty() && inner(p, &k[1..]))
            }
            (Some(pc), Some(kc)) if pc == kc => inner(&p[1..], &k[1..]),
            _ => false,
        }
    }
    inner(pattern.as_bytes(), key.as_bytes())
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        }
        self.entries
            .remove_if(key, |_, e| e.expires_at <= Instant::now());
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn del_many(&self, keys: &[String]) -> Result<u64, CacheError> {
        let mut deleted = 0;
        for key in keys {
            if self.entries.remove(key).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn keys_matching(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let now = Instant::now();
        Ok(self
            .entries
            .iter()
            .filter(|e| e.value().expires_at > now && glob_matches(pattern, e.key()))
            .map(|e| e.key().clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_matches() {
        assert!(glob_matches("pipes:*", "pipes:{\"brand\":null}"));
        assert!(glob_matches("pipe:*", "pipe:123"));
        assert!(!glob_matches("pipes:*", "pipe:123"));
        assert!(glob_matches("*", "anything"));
        assert!(glob_matches("a*c", "abc"));
        assert!(glob_matches("a*c", "ac"));
        assert!(!glob_matches("a*c", "ab"));
    }

    #[tokio::test]
    async fn test_set_get_del() {
        let backend = MemoryCacheBackend::new();
        backend
            .set_ex("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(backend.get("k").await.unwrap(), Some("v".to_string()));
        assert!(backend.del("k").await.unwrap());
        assert_eq!(backend.get("k").await.unwrap(), None);
        assert!(!backend.del("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_expiry() {
        let backend = MemoryCacheBackend::new();
        backend
            .set_ex("k", "v", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(backend.get("k").await.unwrap(), None);
        assert!(backend.keys_matching("*").await.unwrap().is_empty());
    }
}
