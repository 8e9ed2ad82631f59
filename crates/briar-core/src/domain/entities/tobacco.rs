//! Tobacco entity.

use crate::{BlendType, ItemStatus, TobaccoId, TobaccoCut};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tobacco blend in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tobacco {
    pub id: TobaccoId,

    /// Blend name, unique per brand.
    pub name: String,

    /// Blending house.
    pub brand: String,

    /// Blend family.
    pub blend_type: BlendType,

    /// Cut of the leaf.
    pub cut: TobaccoCut,

    /// Tin weight in grams.
    pub tin_size_grams: i32,

    /// Price in cents.
    pub price_cents: i64,

    /// Tins in stock.
    pub stock: i32,

    pub description: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: ItemStatus,
    pub rating_avg: Option<f64>,
    pub rating_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tobacco {
    /// Creates a new blend with `Hidden` status.
    #[must_use]
    pub fn new(
        name: String,
        brand: String,
        blend_type: BlendType,
        cut: TobaccoCut,
        tin_size_grams: i32,
        price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TobaccoId::new(),
            name,
            brand,
            blend_type,
            cut,
            tin_size_grams,
            price_cents: price_cents.max(0),
            stock: 0,
            description: None,
            image_url: None,
            thumbnail_url: None,
            status: ItemStatus::Hidden,
            rating_avg: None,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the blend is publicly visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ItemStatus::Active)
    }

    /// Applies a new rating summary after review moderation.
    pub fn set_rating(&mut self, avg: Option<f64>, count: i64) {
        self.rating_avg = avg;
        self.rating_count = count;
        self.updated_at = Utc::now();
    }
}
