//! Pipe entity.

use crate::{ItemStatus, PipeId, PipeShape};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pipe in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Unique identifier.
    pub id: PipeId,

    /// Model name, unique per brand.
    pub name: String,

    /// Maker or workshop.
    pub brand: String,

    /// Bowl shape.
    pub shape: PipeShape,

    /// Bowl material (briar, meerschaum, corncob, ...).
    pub material: String,

    /// Stem/finish description.
    pub finish: Option<String>,

    /// Price in cents, avoiding float currency.
    pub price_cents: i64,

    /// Units in stock.
    pub stock: i32,

    /// Long-form description.
    pub description: Option<String>,

    /// Full-size image path, if one has been uploaded.
    pub image_url: Option<String>,

    /// Resized thumbnail path.
    pub thumbnail_url: Option<String>,

    /// Visibility status.
    pub status: ItemStatus,

    /// Average approved-review rating, if any reviews exist.
    pub rating_avg: Option<f64>,

    /// Number of approved reviews.
    pub rating_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pipe {
    /// Creates a new pipe with no reviews and `Hidden` status; items become
    /// visible only when an admin activates them.
    #[must_use]
    pub fn new(
        name: String,
        brand: String,
        shape: PipeShape,
        material: String,
        price_cents: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PipeId::new(),
            name,
            brand,
            shape,
            material,
            finish: None,
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

    /// Checks if the pipe is publicly visible.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pipe_starts_hidden() {
        let pipe = Pipe::new(
            "System Standard".into(),
            "Peterson".into(),
            PipeShape::Bent,
            "briar".into(),
            9_500,
        );
        assert_eq!(pipe.status, ItemStatus::Hidden);
        assert!(!pipe.is_active());
        assert_eq!(pipe.rating_count, 0);
        assert!(pipe.rating_avg.is_none());
    }

    #[test]
    fn test_negative_price_clamped() {
        let pipe = Pipe::new("X".into(), "Y".into(), PipeShape::Billiard, "briar".into(), -5);
        assert_eq!(pipe.price_cents, 0);
    }
}
