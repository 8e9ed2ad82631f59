//! Cross-catalog search.

use crate::cache::{cache_keys, Cache, SHORT_TTL};
use crate::dto::{SearchQuery, SearchResponse};
use briar_core::BriarResult;
use briar_repository::CatalogQueryRepository;
use std::sync::Arc;

/// ILIKE search across the three catalogs, cached per query fingerprint.
pub struct SearchService {
    queries: Arc<dyn CatalogQueryRepository>,
    cache: Arc<Cache>,
}

impl SearchService {
    #[must_use]
    pub fn new(queries: Arc<dyn CatalogQueryRepository>, cache: Arc<Cache>) -> Self {
        Self { queries, cache }
    }

    pub async fn search(&self, query: SearchQuery) -> BriarResult<SearchResponse> {
        // Empty terms short-circuit without touching store or cache.
        if query.q.is_empty() {
            return Ok(SearchResponse {
                query: query.q,
                hits: Vec::new(),
            });
        }

        let key = cache_keys::search_key(&query);
        self.cache
            .get_or_compute(&key, SHORT_TTL, || async {
                let hits = self.queries.search(&query.q, query.limit).await?;
                Ok(SearchResponse {
                    query: query.q.clone(),
                    hits,
                })
            })
            .await
    }
}
