//! Behavioral tests for the cache-aside layer: fail-open reads, read-through
//! population, TTL expiry, and the invalidation choke point.

use async_trait::async_trait;
use briar_core::{BriarError, BriarResult, CatalogKind};
use briar_service::cache::{
    cache_keys, Cache, CacheBackend, CacheError, MemoryCacheBackend, DEFAULT_TTL,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Backend where every operation fails, simulating a total Redis outage.
struct FailingBackend;

#[async_trait]
impl CacheBackend for FailingBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Connection("redis is down".to_string()))
    }

    async fn set_ex(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(CacheError::Connection("redis is down".to_string()))
    }

    async fn del(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::Connection("redis is down".to_string()))
    }

    async fn del_many(&self, _keys: &[String]) -> Result<u64, CacheError> {
        Err(CacheError::Connection("redis is down".to_string()))
    }

    async fn keys_matching(&self, _pattern: &str) -> Result<Vec<String>, CacheError> {
        Err(CacheError::Connection("redis is down".to_string()))
    }
}

fn memory_cache() -> Cache {
    Cache::new(Arc::new(MemoryCacheBackend::new()))
}

#[tokio::test]
async fn set_then_get_round_trips_within_ttl() {
    let cache = memory_cache();
    assert!(cache.set("pipe:abc", &"payload", DEFAULT_TTL).await);
    assert_eq!(
        cache.get::<String>("pipe:abc").await,
        Some("payload".to_string())
    );
}

#[tokio::test]
async fn get_after_delete_is_absent() {
    let cache = memory_cache();
    cache.set("pipe:abc", &1u64, DEFAULT_TTL).await;
    cache.delete("pipe:abc").await;
    assert_eq!(cache.get::<u64>("pipe:abc").await, None);
}

#[tokio::test]
async fn get_on_empty_cache_is_a_miss_not_an_error() {
    let cache = memory_cache();
    assert_eq!(cache.get::<u64>("never:set").await, None);
}

#[tokio::test]
async fn get_or_compute_runs_compute_once_per_miss_and_never_on_hit() {
    let cache = memory_cache();
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let value: BriarResult<u64> = cache
            .get_or_compute("stats:catalog", DEFAULT_TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await;
        assert_eq!(value.unwrap(), 42);
    }

    // One miss populated the entry; the two following calls were hits.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn entry_with_one_second_ttl_expires() {
    let cache = memory_cache();
    cache.set("short", &1u64, Duration::from_secs(1)).await;
    assert_eq!(cache.get::<u64>("short").await, Some(1));

    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(cache.get::<u64>("short").await, None);
}

#[tokio::test]
async fn failing_backend_degrades_reads_instead_of_erroring() {
    let cache = Cache::new(Arc::new(FailingBackend));

    assert_eq!(cache.get::<u64>("k").await, None);
    assert!(!cache.set("k", &1u64, DEFAULT_TTL).await);
    assert_eq!(cache.delete_by_prefix("pipes:*").await, 0);

    let calls = AtomicUsize::new(0);
    let value: BriarResult<u64> = cache
        .get_or_compute("k", DEFAULT_TTL, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        })
        .await;
    assert_eq!(value.unwrap(), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Invalidation against a dead backend must also be silent.
    cache
        .invalidate_entity(CatalogKind::Pipe, Some(Uuid::now_v7()))
        .await;
}

#[tokio::test]
async fn compute_errors_propagate_even_when_the_backend_fails() {
    let cache = Cache::new(Arc::new(FailingBackend));

    let result: BriarResult<u64> = cache
        .get_or_compute("k", DEFAULT_TTL, || async {
            Err(BriarError::Database("store down".to_string()))
        })
        .await;

    match result {
        Err(BriarError::Database(msg)) => assert_eq!(msg, "store down"),
        other => panic!("expected the store error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalidate_entity_clears_entity_lists_stats_and_search() {
    let cache = memory_cache();
    let id = Uuid::now_v7();
    let entity_key = cache_keys::entity_key(CatalogKind::Pipe, id);

    cache.set(&entity_key, &1u64, DEFAULT_TTL).await;
    cache
        .set("pipes:{\"brand\":\"Peterson\"}", &2u64, DEFAULT_TTL)
        .await;
    cache
        .set("pipes:{\"brand\":null}", &3u64, DEFAULT_TTL)
        .await;
    cache.set(cache_keys::STATS_KEY, &4u64, DEFAULT_TTL).await;
    cache
        .set("search:{\"q\":\"billiard\",\"limit\":20}", &5u64, DEFAULT_TTL)
        .await;
    cache.set("tobaccos:{\"brand\":null}", &6u64, DEFAULT_TTL).await;

    cache.invalidate_entity(CatalogKind::Pipe, Some(id)).await;

    assert_eq!(cache.get::<u64>(&entity_key).await, None);
    assert_eq!(
        cache.get::<u64>("pipes:{\"brand\":\"Peterson\"}").await,
        None
    );
    assert_eq!(cache.get::<u64>("pipes:{\"brand\":null}").await, None);
    assert_eq!(cache.get::<u64>(cache_keys::STATS_KEY).await, None);
    assert_eq!(
        cache
            .get::<u64>("search:{\"q\":\"billiard\",\"limit\":20}")
            .await,
        None
    );
    // Other kinds keep their cached lists.
    assert_eq!(
        cache.get::<u64>("tobaccos:{\"brand\":null}").await,
        Some(6)
    );
}

#[tokio::test]
async fn invalidate_without_id_still_clears_lists_stats_and_search() {
    let cache = memory_cache();
    let id = Uuid::now_v7();
    let entity_key = cache_keys::entity_key(CatalogKind::Tobacco, id);

    cache.set(&entity_key, &1u64, DEFAULT_TTL).await;
    cache.set("tobaccos:{}", &2u64, DEFAULT_TTL).await;
    cache.set(cache_keys::STATS_KEY, &3u64, DEFAULT_TTL).await;

    cache.invalidate_entity(CatalogKind::Tobacco, None).await;

    // Without an id the exact entity entry is left to its TTL.
    assert_eq!(cache.get::<u64>(&entity_key).await, Some(1));
    assert_eq!(cache.get::<u64>("tobaccos:{}").await, None);
    assert_eq!(cache.get::<u64>(cache_keys::STATS_KEY).await, None);
}

#[tokio::test]
async fn delete_by_prefix_reports_the_number_removed() {
    let cache = memory_cache();
    cache.set("pipes:{\"a\":1}", &1u64, DEFAULT_TTL).await;
    cache.set("pipes:{\"b\":2}", &2u64, DEFAULT_TTL).await;
    cache.set("pipe:xyz", &3u64, DEFAULT_TTL).await;

    assert_eq!(cache.delete_by_prefix("pipes:*").await, 2);
    assert_eq!(cache.get::<u64>("pipe:xyz").await, Some(3));
}
