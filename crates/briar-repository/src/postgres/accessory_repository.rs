//! Postgres accessory repository implementation.

use crate::{traits::AccessoryRepository, DatabasePool};
use async_trait::async_trait;
use briar_core::domain::{Accessory, AccessoryFilter, AccessoryKind, ItemStatus};
use briar_core::{AccessoryId, BriarResult, Page};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres accessory repository.
#[derive(Clone)]
pub struct PgAccessoryRepository {
    pool: Arc<DatabasePool>,
}

impl PgAccessoryRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

const ACCESSORY_COLUMNS: &str = "id, name, kind, brand, price_cents, stock, description, \
     image_url, thumbnail_url, status, created_at, updated_at";

/// Database row representation of an accessory.
#[derive(Debug, FromRow)]
struct AccessoryRow {
    id: Uuid,
    name: String,
    kind: String,
    brand: Option<String>,
    price_cents: i64,
    stock: i32,
    description: Option<String>,
    image_url: Option<String>,
    thumbnail_url: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccessoryRow> for Accessory {
    fn from(row: AccessoryRow) -> Self {
        Self {
            id: AccessoryId::from_uuid(row.id),
            name: row.name,
            kind: AccessoryKind::from_db(&row.kind),
            brand: row.brand,
            price_cents: row.price_cents,
            stock: row.stock,
            description: row.description,
            image_url: row.image_url,
            thumbnail_url: row.thumbnail_url,
            status: ItemStatus::from_db(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &AccessoryFilter) {
    if let Some(brand) = &filter.brand {
        qb.push(" AND brand = ").push_bind(brand.clone());
    }
    if let Some(kind) = filter.kind {
        qb.push(" AND kind = ").push_bind(kind.as_db());
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.as_db());
    }
}

#[async_trait]
impl AccessoryRepository for PgAccessoryRepository {
    async fn find_by_id(&self, id: AccessoryId) -> BriarResult<Option<Accessory>> {
        debug!("Finding accessory by id: {}", id);

        let row = sqlx::query_as::<_, AccessoryRow>(&format!(
            "SELECT {ACCESSORY_COLUMNS} FROM accessories WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Accessory::from))
    }

    async fn find_all(&self, filter: &AccessoryFilter) -> BriarResult<Page<Accessory>> {
        let mut count_qb =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM accessories WHERE 1=1");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ACCESSORY_COLUMNS} FROM accessories WHERE 1=1"
        ));
        push_filters(&mut qb, filter);
        // Accessories carry no rating columns, so rating sorts fall back to newest.
        let order_by = match filter.sort {
            briar_core::domain::CatalogSort::RatingDesc => "created_at DESC",
            other => other.order_by(),
        };
        qb.push(" ORDER BY ")
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(filter.page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(filter.page.offset() as i64);

        let rows: Vec<AccessoryRow> = qb.build_query_as().fetch_all(self.pool.inner()).await?;
        let content = rows.into_iter().map(Accessory::from).collect();

        Ok(Page::new(
            content,
            filter.page.page,
            filter.page.size,
            total as u64,
        ))
    }

    async fn save(&self, accessory: &Accessory) -> BriarResult<Accessory> {
        debug!("Saving accessory: {}", accessory.id);

        sqlx::query(
            r#"
            INSERT INTO accessories (id, name, kind, brand, price_cents, stock,
                                     description, image_url, thumbnail_url, status,
                                     created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(accessory.id.into_inner())
        .bind(&accessory.name)
        .bind(accessory.kind.as_db())
        .bind(&accessory.brand)
        .bind(accessory.price_cents)
        .bind(accessory.stock)
        .bind(&accessory.description)
        .bind(&accessory.image_url)
        .bind(&accessory.thumbnail_url)
        .bind(accessory.status.as_db())
        .bind(accessory.created_at)
        .bind(accessory.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(accessory.clone())
    }

    async fn update(&self, accessory: &Accessory) -> BriarResult<Accessory> {
        debug!("Updating accessory: {}", accessory.id);

        let result = sqlx::query(
            r#"
            UPDATE accessories
            SET name = $2, kind = $3, brand = $4, price_cents = $5, stock = $6,
                description = $7, image_url = $8, thumbnail_url = $9, status = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(accessory.id.into_inner())
        .bind(&accessory.name)
        .bind(accessory.kind.as_db())
        .bind(&accessory.brand)
        .bind(accessory.price_cents)
        .bind(accessory.stock)
        .bind(&accessory.description)
        .bind(&accessory.image_url)
        .bind(&accessory.thumbnail_url)
        .bind(accessory.status.as_db())
        .bind(Utc::now())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(briar_core::BriarError::not_found(
                "accessory",
                accessory.id,
            ));
        }
        Ok(accessory.clone())
    }

    async fn set_status(&self, id: AccessoryId, status: ItemStatus) -> BriarResult<bool> {
        let result =
            sqlx::query("UPDATE accessories SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.into_inner())
                .bind(status.as_db())
                .execute(self.pool.inner())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: AccessoryId) -> BriarResult<bool> {
        debug!("Deleting accessory: {}", id);

        let result = sqlx::query("DELETE FROM accessories WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
