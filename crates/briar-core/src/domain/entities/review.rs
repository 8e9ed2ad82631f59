//! Review entity and rating aggregation.

use crate::{CatalogKind, ReviewId, ReviewStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visitor review of a pipe or tobacco.
///
/// Reviews reference their subject by kind + raw UUID rather than a typed
/// ID, since the same table holds reviews for every reviewable kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,

    /// Kind of the reviewed item.
    pub entity_kind: CatalogKind,

    /// ID of the reviewed item.
    pub entity_id: Uuid,

    /// Display name supplied by the reviewer.
    pub author: String,

    /// Rating, 1..=5.
    pub rating: i16,

    /// Review text.
    pub body: Option<String>,

    /// Moderation status; only approved reviews are public and counted.
    pub status: ReviewStatus,

    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a new pending review.
    #[must_use]
    pub fn new(
        entity_kind: CatalogKind,
        entity_id: Uuid,
        author: String,
        rating: i16,
        body: Option<String>,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            entity_kind,
            entity_id,
            author,
            rating: rating.clamp(1, 5),
            body,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Checks if the review counts towards the public rating summary.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self.status, ReviewStatus::Approved)
    }
}

/// Aggregated rating over the approved reviews of one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean rating; `None` when there are no approved reviews.
    pub average: Option<f64>,
    /// Number of approved reviews.
    pub count: i64,
}

impl RatingSummary {
    /// The empty summary.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            average: None,
            count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_review_is_pending() {
        let review = Review::new(
            CatalogKind::Pipe,
            Uuid::now_v7(),
            "Arto".into(),
            4,
            None,
        );
        assert_eq!(review.status, ReviewStatus::Pending);
        assert!(!review.is_approved());
    }

    #[test]
    fn test_rating_clamped_to_range() {
        let low = Review::new(CatalogKind::Tobacco, Uuid::now_v7(), "a".into(), 0, None);
        let high = Review::new(CatalogKind::Tobacco, Uuid::now_v7(), "b".into(), 9, None);
        assert_eq!(low.rating, 1);
        assert_eq!(high.rating, 5);
    }
}
