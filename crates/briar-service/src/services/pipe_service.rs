//! Pipe catalog service.

use crate::cache::{cache_keys, Cache, DEFAULT_TTL};
use crate::dto::{CreatePipeRequest, SetStatusRequest, UpdatePipeRequest};
use briar_core::domain::{CatalogKind, Pipe, PipeFilter};
use briar_core::{BriarError, BriarResult, Page, PipeId, ValidateExt};
use briar_repository::PipeRepository;
use std::sync::Arc;
use tracing::info;

/// Catalog service for pipes: cached reads, invalidating writes.
pub struct PipeService {
    repository: Arc<dyn PipeRepository>,
    cache: Arc<Cache>,
}

impl PipeService {
    #[must_use]
    pub fn new(repository: Arc<dyn PipeRepository>, cache: Arc<Cache>) -> Self {
        Self { repository, cache }
    }

    /// Cached single-entity read, any status.
    async fn fetch(&self, id: PipeId) -> BriarResult<Pipe> {
        let key = cache_keys::entity_key(CatalogKind::Pipe, id.into_inner());
        self.cache
            .get_or_compute(&key, DEFAULT_TTL, || async {
                self.repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| BriarError::not_found("pipe", id))
            })
            .await
    }

    /// Public lookup; hidden and discontinued pipes read as absent.
    pub async fn get_public(&self, id: PipeId) -> BriarResult<Pipe> {
        let pipe = self.fetch(id).await?;
        if !pipe.is_active() {
            return Err(BriarError::not_found("pipe", id));
        }
        Ok(pipe)
    }

    /// Admin lookup, any status.
    pub async fn get_admin(&self, id: PipeId) -> BriarResult<Pipe> {
        self.fetch(id).await
    }

    /// Filtered, paged list, cached under the filter fingerprint.
    pub async fn list(&self, filter: &PipeFilter) -> BriarResult<Page<Pipe>> {
        let key = cache_keys::list_key(CatalogKind::Pipe, filter);
        self.cache
            .get_or_compute(&key, DEFAULT_TTL, || async {
                self.repository.find_all(filter).await
            })
            .await
    }

    pub async fn create(&self, request: CreatePipeRequest) -> BriarResult<Pipe> {
        request.validate_request()?;

        let pipe = request.into_entity();
        let saved = self.repository.save(&pipe).await?;
        self.cache
            .invalidate_entity(CatalogKind::Pipe, Some(saved.id.into_inner()))
            .await;

        info!("Created pipe {} ({} {})", saved.id, saved.brand, saved.name);
        Ok(saved)
    }

    pub async fn update(&self, id: PipeId, request: UpdatePipeRequest) -> BriarResult<Pipe> {
        request.validate_request()?;

        // Load from the store, not the cache, so the update bases on the
        // freshest row.
        let mut pipe = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("pipe", id))?;
        request.apply(&mut pipe);

        let updated = self.repository.update(&pipe).await?;
        self.cache
            .invalidate_entity(CatalogKind::Pipe, Some(id.into_inner()))
            .await;

        info!("Updated pipe {}", id);
        Ok(updated)
    }

    pub async fn set_status(&self, id: PipeId, request: SetStatusRequest) -> BriarResult<()> {
        let changed = self.repository.set_status(id, request.status).await?;
        if !changed {
            return Err(BriarError::not_found("pipe", id));
        }
        self.cache
            .invalidate_entity(CatalogKind::Pipe, Some(id.into_inner()))
            .await;

        info!("Set pipe {} status to {}", id, request.status);
        Ok(())
    }

    /// Records uploaded image paths on the pipe.
    pub async fn set_images(
        &self,
        id: PipeId,
        image_url: String,
        thumbnail_url: String,
    ) -> BriarResult<Pipe> {
        let mut pipe = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("pipe", id))?;
        pipe.image_url = Some(image_url);
        pipe.thumbnail_url = Some(thumbnail_url);

        let updated = self.repository.update(&pipe).await?;
        self.cache
            .invalidate_entity(CatalogKind::Pipe, Some(id.into_inner()))
            .await;
        Ok(updated)
    }

    pub async fn delete(&self, id: PipeId) -> BriarResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(BriarError::not_found("pipe", id));
        }
        self.cache
            .invalidate_entity(CatalogKind::Pipe, Some(id.into_inner()))
            .await;

        info!("Deleted pipe {}", id);
        Ok(())
    }
}
