//! Tobacco catalog service.

use crate::cache::{cache_keys, Cache, DEFAULT_TTL};
use crate::dto::{CreateTobaccoRequest, SetStatusRequest, UpdateTobaccoRequest};
use briar_core::domain::{CatalogKind, Tobacco, TobaccoFilter};
use briar_core::{BriarError, BriarResult, Page, TobaccoId, ValidateExt};
use briar_repository::TobaccoRepository;
use std::sync::Arc;
use tracing::info;

/// Catalog service for tobacco blends: cached reads, invalidating writes.
pub struct TobaccoService {
    repository: Arc<dyn TobaccoRepository>,
    cache: Arc<Cache>,
}

impl TobaccoService {
    #[must_use]
    pub fn new(repository: Arc<dyn TobaccoRepository>, cache: Arc<Cache>) -> Self {
        Self { repository, cache }
    }

    async fn fetch(&self, id: TobaccoId) -> BriarResult<Tobacco> {
        let key = cache_keys::entity_key(CatalogKind::Tobacco, id.into_inner());
        self.cache
            .get_or_compute(&key, DEFAULT_TTL, || async {
                self.repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| BriarError::not_found("tobacco", id))
            })
            .await
    }

    /// Public lookup; hidden and discontinued blends read as absent.
    pub async fn get_public(&self, id: TobaccoId) -> BriarResult<Tobacco> {
        let tobacco = self.fetch(id).await?;
        if !tobacco.is_active() {
            return Err(BriarError::not_found("tobacco", id));
        }
        Ok(tobacco)
    }

    /// Admin lookup, any status.
    pub async fn get_admin(&self, id: TobaccoId) -> BriarResult<Tobacco> {
        self.fetch(id).await
    }

    /// Filtered, paged list, cached under the filter fingerprint.
    pub async fn list(&self, filter: &TobaccoFilter) -> BriarResult<Page<Tobacco>> {
        let key = cache_keys::list_key(CatalogKind::Tobacco, filter);
        self.cache
            .get_or_compute(&key, DEFAULT_TTL, || async {
                self.repository.find_all(filter).await
            })
            .await
    }

    pub async fn create(&self, request: CreateTobaccoRequest) -> BriarResult<Tobacco> {
        request.validate_request()?;

        let tobacco = request.into_entity();
        let saved = self.repository.save(&tobacco).await?;
        self.cache
            .invalidate_entity(CatalogKind::Tobacco, Some(saved.id.into_inner()))
            .await;

        info!(
            "Created tobacco {} ({} {})",
            saved.id, saved.brand, saved.name
        );
        Ok(saved)
    }

    pub async fn update(
        &self,
        id: TobaccoId,
        request: UpdateTobaccoRequest,
    ) -> BriarResult<Tobacco> {
        request.validate_request()?;

        let mut tobacco = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("tobacco", id))?;
        request.apply(&mut tobacco);

        let updated = self.repository.update(&tobacco).await?;
        self.cache
            .invalidate_entity(CatalogKind::Tobacco, Some(id.into_inner()))
            .await;

        info!("Updated tobacco {}", id);
        Ok(updated)
    }

    pub async fn set_status(&self, id: TobaccoId, request: SetStatusRequest) -> BriarResult<()> {
        let changed = self.repository.set_status(id, request.status).await?;
        if !changed {
            return Err(BriarError::not_found("tobacco", id));
        }
        self.cache
            .invalidate_entity(CatalogKind::Tobacco, Some(id.into_inner()))
            .await;

        info!("Set tobacco {} status to {}", id, request.status);
        Ok(())
    }

    /// Records uploaded image paths on the blend.
    pub async fn set_images(
        &self,
        id: TobaccoId,
        image_url: String,
        thumbnail_url: String,
    ) -> BriarResult<Tobacco> {
        let mut tobacco = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("tobacco", id))?;
        tobacco.image_url = Some(image_url);
        tobacco.thumbnail_url = Some(thumbnail_url);

        let updated = self.repository.update(&tobacco).await?;
        self.cache
            .invalidate_entity(CatalogKind::Tobacco, Some(id.into_inner()))
            .await;
        Ok(updated)
    }

    pub async fn delete(&self, id: TobaccoId) -> BriarResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(BriarError::not_found("tobacco", id));
        }
        self.cache
            .invalidate_entity(CatalogKind::Tobacco, Some(id.into_inner()))
            .await;

        info!("Deleted tobacco {}", id);
        Ok(())
    }
}
