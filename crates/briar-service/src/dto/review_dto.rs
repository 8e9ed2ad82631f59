//! Review DTOs.

use briar_core::domain::{CatalogKind, Review, ReviewStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Public request to submit a review. Lands in the pending queue.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    #[validate(length(min = 1, max = 60, message = "Author name must be 1-60 characters"))]
    pub author: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = 4000))]
    pub body: Option<String>,
}

impl SubmitReviewRequest {
    #[must_use]
    pub fn into_entity(self, kind: CatalogKind, entity_id: Uuid) -> Review {
        Review::new(kind, entity_id, self.author, self.rating, self.body)
    }
}

/// Moderation decision on a pending review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateReviewRequest {
    pub status: ReviewStatus,
}

/// Review as exposed on the public API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub author: String,
    pub rating: i16,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into_inner(),
            author: review.author,
            rating: review.rating,
            body: review.body,
            created_at: review.created_at,
        }
    }
}

/// Review as exposed to moderators, including its subject and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationReviewResponse {
    pub id: Uuid,
    pub entity_kind: CatalogKind,
    pub entity_id: Uuid,
    pub author: String,
    pub rating: i16,
    pub body: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ModerationReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.into_inner(),
            entity_kind: review.entity_kind,
            entity_id: review.entity_id,
            author: review.author,
            rating: review.rating,
            body: review.body,
            status: review.status,
            created_at: review.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_review_rejects_out_of_range_rating() {
        let request = SubmitReviewRequest {
            author: "Arto".to_string(),
            rating: 6,
            body: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_submit_review_lands_pending() {
        let request = SubmitReviewRequest {
            author: "Arto".to_string(),
            rating: 4,
            body: Some("Smokes cool and dry.".to_string()),
        };
        let review = request.into_entity(CatalogKind::Pipe, Uuid::now_v7());
        assert_eq!(review.status, ReviewStatus::Pending);
        assert_eq!(review.rating, 4);
    }
}
