//! Aggregate stats and search DTOs. Both are cached, so they derive
//! Deserialize as well as Serialize.

use briar_repository::SearchHit;
use serde::{Deserialize, Serialize};

/// Aggregate catalog stats, cached at `stats:catalog`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStatsResponse {
    pub pipes: i64,
    pub tobaccos: i64,
    pub accessories: i64,
    pub approved_reviews: i64,
    pub top_rated: Vec<SearchHit>,
}

/// Normalized search query; its serialization is the cache-key fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: i64,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 50;

    /// Trims the term and clamps the limit.
    #[must_use]
    pub fn new(q: &str, limit: Option<i64>) -> Self {
        Self {
            q: q.trim().to_string(),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }
}

/// Search results for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_normalizes() {
        let query = SearchQuery::new("  briar  ", None);
        assert_eq!(query.q, "briar");
        assert_eq!(query.limit, SearchQuery::DEFAULT_LIMIT);
    }

    #[test]
    fn test_search_query_clamps_limit() {
        assert_eq!(SearchQuery::new("x", Some(500)).limit, SearchQuery::MAX_LIMIT);
        assert_eq!(SearchQuery::new("x", Some(0)).limit, 1);
    }

    #[test]
    fn test_equal_queries_share_a_fingerprint() {
        let a = SearchQuery::new("peterson", Some(10));
        let b = SearchQuery::new(" peterson ", Some(10));
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
