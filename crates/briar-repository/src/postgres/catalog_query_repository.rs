//! Cross-entity search and aggregate queries.

use crate::{
    traits::{CatalogCounts, CatalogQueryRepository, SearchHit},
    DatabasePool,
};
use async_trait::async_trait;
use briar_core::domain::CatalogKind;
use briar_core::BriarResult;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres implementation of the cross-entity queries.
#[derive(Clone)]
pub struct PgCatalogQueryRepository {
    pool: Arc<DatabasePool>,
}

impl PgCatalogQueryRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct HitRow {
    kind: String,
    id: Uuid,
    name: String,
    brand: Option<String>,
    thumbnail_url: Option<String>,
}

impl HitRow {
    fn into_hit(self) -> BriarResult<SearchHit> {
        let kind = self
            .kind
            .parse::<CatalogKind>()
            .map_err(briar_core::BriarError::Internal)?;
        Ok(SearchHit {
            kind,
            id: self.id,
            name: self.name,
            brand: self.brand.unwrap_or_default(),
            thumbnail_url: self.thumbnail_url,
        })
    }
}

#[derive(Debug, FromRow)]
struct CountsRow {
    pipes: i64,
    tobaccos: i64,
    accessories: i64,
    approved_reviews: i64,
}

/// UNION over the three catalog tables; accessories have a nullable brand,
/// the other two do not, so brand is read as nullable throughout.
const SEARCH_SQL: &str = r#"
    SELECT kind, id, name, brand, thumbnail_url FROM (
        SELECT 'pipe' AS kind, id, name, brand, thumbnail_url, created_at
        FROM pipes WHERE status = 'active'
        UNION ALL
        SELECT 'tobacco' AS kind, id, name, brand, thumbnail_url, created_at
        FROM tobaccos WHERE status = 'active'
        UNION ALL
        SELECT 'accessory' AS kind, id, name, brand, thumbnail_url, created_at
        FROM accessories WHERE status = 'active'
    ) AS catalog
    WHERE name ILIKE $1 OR brand ILIKE $1
    ORDER BY name ASC
    LIMIT $2
"#;

const TOP_RATED_SQL: &str = r#"
    SELECT kind, id, name, brand, thumbnail_url FROM (
        SELECT 'pipe' AS kind, id, name, brand, thumbnail_url, rating_avg, rating_count
        FROM pipes WHERE status = 'active'
        UNION ALL
        SELECT 'tobacco' AS kind, id, name, brand, thumbnail_url, rating_avg, rating_count
        FROM tobaccos WHERE status = 'active'
    ) AS rated
    WHERE rating_count > 0
    ORDER BY rating_avg DESC, rating_count DESC
    LIMIT $1
"#;

const COUNTS_SQL: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM pipes WHERE status = 'active') AS pipes,
        (SELECT COUNT(*) FROM tobaccos WHERE status = 'active') AS tobaccos,
        (SELECT COUNT(*) FROM accessories WHERE status = 'active') AS accessories,
        (SELECT COUNT(*) FROM reviews WHERE status = 'approved') AS approved_reviews
"#;

/// Escapes LIKE metacharacters in a user-supplied search term.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl CatalogQueryRepository for PgCatalogQueryRepository {
    async fn search(&self, query: &str, limit: i64) -> BriarResult<Vec<SearchHit>> {
        debug!("Searching catalog for: {}", query);

        let pattern = format!("%{}%", escape_like(query));
        let rows = sqlx::query_as::<_, HitRow>(SEARCH_SQL)
            .bind(pattern)
            .bind(limit)
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(HitRow::into_hit).collect()
    }

    async fn catalog_counts(&self) -> BriarResult<CatalogCounts> {
        let row = sqlx::query_as::<_, CountsRow>(COUNTS_SQL)
            .fetch_one(self.pool.inner())
            .await?;

        Ok(CatalogCounts {
            pipes: row.pipes,
            tobaccos: row.tobaccos,
            accessories: row.accessories,
            approved_reviews: row.approved_reviews,
        })
    }

    async fn top_rated(&self, limit: i64) -> BriarResult<Vec<SearchHit>> {
        let rows = sqlx::query_as::<_, HitRow>(TOP_RATED_SQL)
            .bind(limit)
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(HitRow::into_hit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50% virginia"), "50\\% virginia");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
