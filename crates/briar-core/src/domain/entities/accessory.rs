//! Accessory entity.

use crate::{AccessoryId, AccessoryKind, ItemStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pipe-smoking accessory in the catalog. Accessories are not reviewable,
/// so they carry no rating summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accessory {
    pub id: AccessoryId,
    pub name: String,
    pub kind: AccessoryKind,
    pub brand: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Accessory {
    /// Creates a new accessory with `Hidden` status.
    #[must_use]
    pub fn new(name: String, kind: AccessoryKind, price_cents: i64) -> Self {
        let now = Utc::now();
        Self {
            id: AccessoryId::new(),
            name,
            kind,
            brand: None,
            price_cents: price_cents.max(0),
            stock: 0,
            description: None,
            image_url: None,
            thumbnail_url: None,
            status: ItemStatus::Hidden,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks if the accessory is publicly visible.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, ItemStatus::Active)
    }
}
