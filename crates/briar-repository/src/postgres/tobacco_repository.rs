//! Postgres tobacco repository implementation.

use crate::{traits::TobaccoRepository, DatabasePool};
use async_trait::async_trait;
use briar_core::domain::{
    BlendType, ItemStatus, RatingSummary, Tobacco, TobaccoCut, TobaccoFilter,
};
use briar_core::{BriarResult, Page, TobaccoId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres tobacco repository.
#[derive(Clone)]
pub struct PgTobaccoRepository {
    pool: Arc<DatabasePool>,
}

impl PgTobaccoRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

const TOBACCO_COLUMNS: &str = "id, name, brand, blend_type, cut, tin_size_grams, price_cents, \
     stock, description, image_url, thumbnail_url, status, rating_avg, rating_count, \
     created_at, updated_at";

/// Database row representation of a tobacco blend.
#[derive(Debug, FromRow)]
struct TobaccoRow {
    id: Uuid,
    name: String,
    brand: String,
    blend_type: String,
    cut: String,
    tin_size_grams: i32,
    price_cents: i64,
    stock: i32,
    description: Option<String>,
    image_url: Option<String>,
    thumbnail_url: Option<String>,
    status: String,
    rating_avg: Option<f64>,
    rating_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TobaccoRow> for Tobacco {
    fn from(row: TobaccoRow) -> Self {
        Self {
            id: TobaccoId::from_uuid(row.id),
            name: row.name,
            brand: row.brand,
            blend_type: BlendType::from_db(&row.blend_type),
            cut: TobaccoCut::from_db(&row.cut),
            tin_size_grams: row.tin_size_grams,
            price_cents: row.price_cents,
            stock: row.stock,
            description: row.description,
            image_url: row.image_url,
            thumbnail_url: row.thumbnail_url,
            status: ItemStatus::from_db(&row.status),
            rating_avg: row.rating_avg,
            rating_count: row.rating_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &TobaccoFilter) {
    if let Some(brand) = &filter.brand {
        qb.push(" AND brand = ").push_bind(brand.clone());
    }
    if let Some(blend_type) = filter.blend_type {
        qb.push(" AND blend_type = ").push_bind(blend_type.as_db());
    }
    if let Some(cut) = filter.cut {
        qb.push(" AND cut = ").push_bind(cut.as_db());
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_db());
    }
}

#[async_trait]
impl TobaccoRepository for PgTobaccoRepository {
    async fn find_by_id(&self, id: TobaccoId) -> BriarResult<Option<Tobacco>> {
        debug!("Finding tobacco by id: {}", id);

        let row = sqlx::query_as::<_, TobaccoRow>(&format!(
            "SELECT {TOBACCO_COLUMNS} FROM tobaccos WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Tobacco::from))
    }

    async fn find_all(&self, filter: &TobaccoFilter) -> BriarResult<Page<Tobacco>> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tobaccos WHERE 1=1");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {TOBACCO_COLUMNS} FROM tobaccos WHERE 1=1"
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(filter.sort.order_by())
            .push(" LIMIT ")
            .push_bind(filter.page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(filter.page.offset() as i64);

        let rows: Vec<TobaccoRow> = qb.build_query_as().fetch_all(self.pool.inner()).await?;
        let content = rows.into_iter().map(Tobacco::from).collect();

        Ok(Page::new(
            content,
            filter.page.page,
            filter.page.size,
            total as u64,
        ))
    }

    async fn save(&self, tobacco: &Tobacco) -> BriarResult<Tobacco> {
        debug!("Saving tobacco: {}", tobacco.id);

        sqlx::query(
            r#"
            INSERT INTO tobaccos (id, name, brand, blend_type, cut, tin_size_grams,
                                  price_cents, stock, description, image_url,
                                  thumbnail_url, status, rating_avg, rating_count,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(tobacco.id.into_inner())
        .bind(&tobacco.name)
        .bind(&tobacco.brand)
        .bind(tobacco.blend_type.as_db())
        .bind(tobacco.cut.as_db())
        .bind(tobacco.tin_size_grams)
        .bind(tobacco.price_cents)
        .bind(tobacco.stock)
        .bind(&tobacco.description)
        .bind(&tobacco.image_url)
        .bind(&tobacco.thumbnail_url)
        .bind(tobacco.status.as_db())
        .bind(tobacco.rating_avg)
        .bind(tobacco.rating_count)
        .bind(tobacco.created_at)
        .bind(tobacco.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(tobacco.clone())
    }

    async fn update(&self, tobacco: &Tobacco) -> BriarResult<Tobacco> {
        debug!("Updating tobacco: {}", tobacco.id);

        let result = sqlx::query(
            r#"
            UPDATE tobaccos
            SET name = $2, brand = $3, blend_type = $4, cut = $5, tin_size_grams = $6,
                price_cents = $7, stock = $8, description = $9, image_url = $10,
                thumbnail_url = $11, status = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(tobacco.id.into_inner())
        .bind(&tobacco.name)
        .bind(&tobacco.brand)
        .bind(tobacco.blend_type.as_db())
        .bind(tobacco.cut.as_db())
        .bind(tobacco.tin_size_grams)
        .bind(tobacco.price_cents)
        .bind(tobacco.stock)
        .bind(&tobacco.description)
        .bind(&tobacco.image_url)
        .bind(&tobacco.thumbnail_url)
        .bind(tobacco.status.as_db())
        .bind(Utc::now())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(briar_core::BriarError::not_found("tobacco", tobacco.id));
        }
        Ok(tobacco.clone())
    }

    async fn set_status(&self, id: TobaccoId, status: ItemStatus) -> BriarResult<bool> {
        let result =
            sqlx::query("UPDATE tobaccos SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(status.as_db())
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_rating(&self, id: TobaccoId, summary: &RatingSummary) -> BriarResult<bool> {
        let result = sqlx::query(
            "UPDATE tobaccos SET rating_avg = $2, rating_count = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(summary.average)
        .bind(summary.count)
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TobaccoId) -> BriarResult<bool> {
        debug!("Deleting tobacco: {}", id);

        let result = sqlx::query("DELETE FROM tobaccos WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
