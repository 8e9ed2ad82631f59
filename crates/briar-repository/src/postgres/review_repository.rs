//! Postgres review repository implementation.

use crate::{traits::ReviewRepository, DatabasePool};
use async_trait::async_trait;
use briar_core::domain::{CatalogKind, RatingSummary, Review, ReviewStatus};
use briar_core::{BriarError, BriarResult, Page, PageRequest, ReviewId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres review repository.
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: Arc<DatabasePool>,
}

impl PgReviewRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

const REVIEW_COLUMNS: &str =
    "id, entity_kind, entity_id, author, rating, body, status, created_at";

/// Database row representation of a review.
#[derive(Debug, FromRow)]
struct ReviewRow {
    id: Uuid,
    entity_kind: String,
    entity_id: Uuid,
    author: String,
    rating: i16,
    body: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = BriarError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let entity_kind = row
            .entity_kind
            .parse::<CatalogKind>()
            .map_err(BriarError::Internal)?;

        Ok(Self {
            id: ReviewId::from_uuid(row.id),
            entity_kind,
            entity_id: row.entity_id,
            author: row.author,
            rating: row.rating,
            body: row.body,
            status: ReviewStatus::from_db(&row.status),
            created_at: row.created_at,
        })
    }
}

/// Row shape for the aggregate rating query.
#[derive(Debug, FromRow)]
struct SummaryRow {
    average: Option<f64>,
    count: i64,
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn find_by_id(&self, id: ReviewId) -> BriarResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Review::try_from).transpose()
    }

    async fn find_approved_for_entity(
        &self,
        kind: CatalogKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> BriarResult<Page<Review>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews \
             WHERE entity_kind = $1 AND entity_id = $2 AND status = 'approved'",
        )
        .bind(kind.singular())
        .bind(entity_id)
        .fetch_one(self.pool.inner())
        .await?;

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE entity_kind = $1 AND entity_id = $2 AND status = 'approved' \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(kind.singular())
        .bind(entity_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let content = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page.page, page.size, total as u64))
    }

    async fn find_by_status(
        &self,
        status: ReviewStatus,
        page: PageRequest,
    ) -> BriarResult<Page<Review>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE status = $1")
            .bind(status.as_db())
            .fetch_one(self.pool.inner())
            .await?;

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE status = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        ))
        .bind(status.as_db())
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool.inner())
        .await?;

        let content = rows
            .into_iter()
            .map(Review::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, page.page, page.size, total as u64))
    }

    async fn save(&self, review: &Review) -> BriarResult<Review> {
        debug!("Saving review: {}", review.id);

        sqlx::query(
            r#"
            INSERT INTO reviews (id, entity_kind, entity_id, author, rating, body,
                                 status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(review.id.into_inner())
        .bind(review.entity_kind.singular())
        .bind(review.entity_id)
        .bind(&review.author)
        .bind(review.rating)
        .bind(&review.body)
        .bind(review.status.as_db())
        .bind(review.created_at)
        .execute(self.pool.inner())
        .await?;

        Ok(review.clone())
    }

    async fn set_status(&self, id: ReviewId, status: ReviewStatus) -> BriarResult<bool> {
        let result = sqlx::query("UPDATE reviews SET status = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(status.as_db())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn rating_summary(
        &self,
        kind: CatalogKind,
        entity_id: Uuid,
    ) -> BriarResult<RatingSummary> {
        let row = sqlx::query_as::<_, SummaryRow>(
            "SELECT AVG(rating)::float8 AS average, COUNT(*) AS count FROM reviews \
             WHERE entity_kind = $1 AND entity_id = $2 AND status = 'approved'",
        )
        .bind(kind.singular())
        .bind(entity_id)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(RatingSummary {
            average: row.average,
            count: row.count,
        })
    }

    async fn delete(&self, id: ReviewId) -> BriarResult<bool> {
        debug!("Deleting review: {}", id);

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
