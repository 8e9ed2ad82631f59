//! Postgres pipe repository implementation.

use crate::{traits::PipeRepository, DatabasePool};
use async_trait::async_trait;
use briar_core::domain::{ItemStatus, Pipe, PipeFilter, PipeShape, RatingSummary};
use briar_core::{BriarResult, Page, PipeId};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres pipe repository.
#[derive(Clone)]
pub struct PgPipeRepository {
    pool: Arc<DatabasePool>,
}

impl PgPipeRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

const PIPE_COLUMNS: &str = "id, name, brand, shape, material, finish, price_cents, stock, \
     description, image_url, thumbnail_url, status, rating_avg, rating_count, \
     created_at, updated_at";

/// Database row representation of a pipe.
#[derive(Debug, FromRow)]
struct PipeRow {
    id: Uuid,
    name: String,
    brand: String,
    shape: String,
    material: String,
    finish: Option<String>,
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

impl From<PipeRow> for Pipe {
    fn from(row: PipeRow) -> Self {
        Self {
            id: PipeId::from_uuid(row.id),
            name: row.name,
            brand: row.brand,
            shape: PipeShape::from_db(&row.shape),
            material: row.material,
            finish: row.finish,
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

/// Appends the filter predicates to a query that already ends in `WHERE 1=1`.
fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &PipeFilter) {
    if let Some(brand) = &filter.brand {
        qb.push(" AND brand = ").push_bind(brand.clone());
    }
    if let Some(shape) = filter.shape {
        qb.push(" AND shape = ").push_bind(shape.as_db());
    }
    if let Some(material) = &filter.material {
        qb.push(" AND material = ").push_bind(material.clone());
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_db());
    }
}

#[async_trait]
impl PipeRepository for PgPipeRepository {
    async fn find_by_id(&self, id: PipeId) -> BriarResult<Option<Pipe>> {
        debug!("Finding pipe by id: {}", id);

        let row = sqlx::query_as::<_, PipeRow>(&format!(
            "SELECT {PIPE_COLUMNS} FROM pipes WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Pipe::from))
    }

    async fn find_all(&self, filter: &PipeFilter) -> BriarResult<Page<Pipe>> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM pipes WHERE 1=1");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PIPE_COLUMNS} FROM pipes WHERE 1=1"
        ));
        push_filters(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(filter.sort.order_by())
            .push(" LIMIT ")
            .push_bind(filter.page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(filter.page.offset() as i64);

        let rows: Vec<PipeRow> = qb.build_query_as().fetch_all(self.pool.inner()).await?;
        let content = rows.into_iter().map(Pipe::from).collect();

        Ok(Page::new(
            content,
            filter.page.page,
            filter.page.size,
            total as u64,
        ))
    }

    async fn save(&self, pipe: &Pipe) -> BriarResult<Pipe> {
        debug!("Saving pipe: {}", pipe.id);

        sqlx::query(
            r#"
            INSERT INTO pipes (id, name, brand, shape, material, finish, price_cents,
                               stock, description, image_url, thumbnail_url, status,
                               rating_avg, rating_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(pipe.id.into_inner())
        .bind(&pipe.name)
        .bind(&pipe.brand)
        .bind(pipe.shape.as_db())
        .bind(&pipe.material)
        .bind(&pipe.finish)
        .bind(pipe.price_cents)
        .bind(pipe.stock)
        .bind(&pipe.description)
        .bind(&pipe.image_url)
        .bind(&pipe.thumbnail_url)
        .bind(pipe.status.as_db())
        .bind(pipe.rating_avg)
        .bind(pipe.rating_count)
        .bind(pipe.created_at)
        .bind(pipe.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(pipe.clone())
    }

    async fn update(&self, pipe: &Pipe) -> BriarResult<Pipe> {
        debug!("Updating pipe: {}", pipe.id);

        let result = sqlx::query(
            r#"
            UPDATE pipes
            SET name = $2, brand = $3, shape = $4, material = $5, finish = $6,
                price_cents = $7, stock = $8, description = $9, image_url = $10,
                thumbnail_url = $11, status = $12, updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(pipe.id.into_inner())
        .bind(&pipe.name)
        .bind(&pipe.brand)
        .bind(pipe.shape.as_db())
        .bind(&pipe.material)
        .bind(&pipe.finish)
        .bind(pipe.price_cents)
        .bind(pipe.stock)
        .bind(&pipe.description)
        .bind(&pipe.image_url)
        .bind(&pipe.thumbnail_url)
        .bind(pipe.status.as_db())
        .bind(Utc::now())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(briar_core::BriarError::not_found("pipe", pipe.id));
        }
        Ok(pipe.clone())
    }

    async fn set_status(&self, id: PipeId, status: ItemStatus) -> BriarResult<bool> {
        let result =
            sqlx::query("UPDATE pipes SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(status.as_db())
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_rating(&self, id: PipeId, summary: &RatingSummary) -> BriarResult<bool> {
        let result = sqlx::query(
            "UPDATE pipes SET rating_avg = $2, rating_count = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(summary.average)
        .bind(summary.count)
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: PipeId) -> BriarResult<bool> {
        debug!("Deleting pipe: {}", id);

        let result = sqlx::query("DELETE FROM pipes WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
