//! Aggregate catalog stats.

use crate::cache::{cache_keys, Cache, SHORT_TTL};
use crate::dto::CatalogStatsResponse;
use briar_core::BriarResult;
use briar_repository::CatalogQueryRepository;
use std::sync::Arc;

const TOP_RATED_LIMIT: i64 = 5;

/// Serves the public stats endpoint from the `stats:catalog` cache entry.
pub struct StatsService {
    queries: Arc<dyn CatalogQueryRepository>,
    cache: Arc<Cache>,
}

impl StatsService {
    #[must_use]
    pub fn new(queries: Arc<dyn CatalogQueryRepository>, cache: Arc<Cache>) -> Self {
        Self { queries, cache }
    }

    /// Aggregate counts plus the top-rated items, cached with the short TTL
    /// since every catalog mutation also drops this key.
    pub async fn stats(&self) -> BriarResult<CatalogStatsResponse> {
        self.cache
            .get_or_compute(cache_keys::STATS_KEY, SHORT_TTL, || async {
                let counts = self.queries.catalog_counts().await?;
                let top_rated = self.queries.top_rated(TOP_RATED_LIMIT).await?;
                Ok(CatalogStatsResponse {
                    pipes: counts.pipes,
                    tobaccos: counts.tobaccos,
                    accessories: counts.accessories,
                    approved_reviews: counts.approved_reviews,
                    top_rated,
                })
            })
            .await
    }
}
