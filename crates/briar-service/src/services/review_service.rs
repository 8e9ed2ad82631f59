//! Review submission and moderation.

use crate::cache::Cache;
use crate::dto::{ModerateReviewRequest, SubmitReviewRequest};
use briar_core::domain::{CatalogKind, Review, ReviewStatus};
use briar_core::{
    BriarError, BriarResult, Page, PageRequest, PipeId, ReviewId, TobaccoId, ValidateExt,
};
use briar_repository::{PipeRepository, ReviewRepository, TobaccoRepository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Review service.
///
/// Holds the pipe and tobacco repositories as well, because a moderation
/// decision rewrites the denormalized rating columns on the reviewed item.
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    pipes: Arc<dyn PipeRepository>,
    tobaccos: Arc<dyn TobaccoRepository>,
    cache: Arc<Cache>,
}

impl ReviewService {
    #[must_use]
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        pipes: Arc<dyn PipeRepository>,
        tobaccos: Arc<dyn TobaccoRepository>,
        cache: Arc<Cache>,
    ) -> Self {
        Self {
            reviews,
            pipes,
            tobaccos,
            cache,
        }
    }

    /// Checks the reviewed item exists and is publicly visible.
    async fn ensure_reviewable(&self, kind: CatalogKind, entity_id: Uuid) -> BriarResult<()> {
        let active = match kind {
            CatalogKind::Pipe => self
                .pipes
                .find_by_id(PipeId::from_uuid(entity_id))
                .await?
                .is_some_and(|p| p.is_active()),
            CatalogKind::Tobacco => self
                .tobaccos
                .find_by_id(TobaccoId::from_uuid(entity_id))
                .await?
                .is_some_and(|t| t.is_active()),
            CatalogKind::Accessory => {
                return Err(BriarError::validation("Accessories cannot be reviewed"));
            }
        };
        if !active {
            return Err(BriarError::not_found(kind.singular(), entity_id));
        }
        Ok(())
    }

    /// Public submission. The review lands pending and stays invisible
    /// until approved, so nothing is invalidated here.
    pub async fn submit(
        &self,
        kind: CatalogKind,
        entity_id: Uuid,
        request: SubmitReviewRequest,
    ) -> BriarResult<Review> {
        request.validate_request()?;
        self.ensure_reviewable(kind, entity_id).await?;

        let review = request.into_entity(kind, entity_id);
        let saved = self.reviews.save(&review).await?;

        info!(
            "Review {} submitted for {} {}",
            saved.id, kind, entity_id
        );
        Ok(saved)
    }

    /// Approved reviews for one item, newest first.
    pub async fn list_approved(
        &self,
        kind: CatalogKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> BriarResult<Page<Review>> {
        self.reviews
            .find_approved_for_entity(kind, entity_id, page)
            .await
    }

    /// The moderation queue, oldest first.
    pub async fn list_pending(&self, page: PageRequest) -> BriarResult<Page<Review>> {
        self.reviews.find_by_status(ReviewStatus::Pending, page).await
    }

    /// Applies a moderation decision: persists the new status, recomputes
    /// the item's rating summary from approved reviews, writes it back, and
    /// invalidates the item before acknowledging.
    pub async fn moderate(
        &self,
        id: ReviewId,
        request: ModerateReviewRequest,
    ) -> BriarResult<Review> {
        if request.status == ReviewStatus::Pending {
            return Err(BriarError::validation(
                "Moderation must approve or reject",
            ));
        }

        let mut review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("review", id))?;
        if review.status != ReviewStatus::Pending {
            return Err(BriarError::conflict("Review has already been moderated"));
        }

        self.reviews.set_status(id, request.status).await?;
        review.status = request.status;

        let summary = self
            .reviews
            .rating_summary(review.entity_kind, review.entity_id)
            .await?;
        match review.entity_kind {
            CatalogKind::Pipe => {
                self.pipes
                    .set_rating(PipeId::from_uuid(review.entity_id), &summary)
                    .await?;
            }
            CatalogKind::Tobacco => {
                self.tobaccos
                    .set_rating(TobaccoId::from_uuid(review.entity_id), &summary)
                    .await?;
            }
            // Unreachable for stored reviews, but harmless.
            CatalogKind::Accessory => {}
        }

        self.cache
            .invalidate_entity(review.entity_kind, Some(review.entity_id))
            .await;

        info!(
            "Review {} {} for {} {}",
            id, review.status, review.entity_kind, review.entity_id
        );
        Ok(review)
    }
}
