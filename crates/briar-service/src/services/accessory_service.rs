//! Accessory catalog service.

use crate::cache::{cache_keys, Cache, DEFAULT_TTL};
use crate::dto::{CreateAccessoryRequest, SetStatusRequest, UpdateAccessoryRequest};
use briar_core::domain::{Accessory, AccessoryFilter, CatalogKind};
use briar_core::{AccessoryId, BriarError, BriarResult, Page, ValidateExt};
use briar_repository::AccessoryRepository;
use std::sync::Arc;
use tracing::info;

/// Catalog service for accessories: cached reads, invalidating writes.
pub struct AccessoryService {
    repository: Arc<dyn AccessoryRepository>,
    cache: Arc<Cache>,
}

impl AccessoryService {
    #[must_use]
    pub fn new(repository: Arc<dyn AccessoryRepository>, cache: Arc<Cache>) -> Self {
        Self { repository, cache }
    }

    async fn fetch(&self, id: AccessoryId) -> BriarResult<Accessory> {
        let key = cache_keys::entity_key(CatalogKind::Accessory, id.into_inner());
        self.cache
            .get_or_compute(&key, DEFAULT_TTL, || async {
                self.repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| BriarError::not_found("accessory", id))
            })
            .await
    }

    /// Public lookup; hidden and discontinued accessories read as absent.
    pub async fn get_public(&self, id: AccessoryId) -> BriarResult<Accessory> {
        let accessory = self.fetch(id).await?;
        if !accessory.is_active() {
            return Err(BriarError::not_found("accessory", id));
        }
        Ok(accessory)
    }

    /// Admin lookup, any status.
    pub async fn get_admin(&self, id: AccessoryId) -> BriarResult<Accessory> {
        self.fetch(id).await
    }

    /// Filtered, paged list, cached under the filter fingerprint.
    pub async fn list(&self, filter: &AccessoryFilter) -> BriarResult<Page<Accessory>> {
        let key = cache_keys::list_key(CatalogKind::Accessory, filter);
        self.cache
            .get_or_compute(&key, DEFAULT_TTL, || async {
                self.repository.find_all(filter).await
            })
            .await
    }

    pub async fn create(&self, request: CreateAccessoryRequest) -> BriarResult<Accessory> {
        request.validate_request()?;

        let accessory = request.into_entity();
        let saved = self.repository.save(&accessory).await?;
        self.cache
            .invalidate_entity(CatalogKind::Accessory, Some(saved.id.into_inner()))
            .await;

        info!("Created accessory {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn update(
        &self,
        id: AccessoryId,
        request: UpdateAccessoryRequest,
    ) -> BriarResult<Accessory> {
        request.validate_request()?;

        let mut accessory = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("accessory", id))?;
        request.apply(&mut accessory);

        let updated = self.repository.update(&accessory).await?;
        self.cache
            .invalidate_entity(CatalogKind::Accessory, Some(id.into_inner()))
            .await;

        info!("Updated accessory {}", id);
        Ok(updated)
    }

    pub async fn set_status(&self, id: AccessoryId, request: SetStatusRequest) -> BriarResult<()> {
        let changed = self.repository.set_status(id, request.status).await?;
        if !changed {
            return Err(BriarError::not_found("accessory", id));
        }
        self.cache
            .invalidate_entity(CatalogKind::Accessory, Some(id.into_inner()))
            .await;

        info!("Set accessory {} status to {}", id, request.status);
        Ok(())
    }

    /// Records uploaded image paths on the accessory.
    pub async fn set_images(
        &self,
        id: AccessoryId,
        image_url: String,
        thumbnail_url: String,
    ) -> BriarResult<Accessory> {
        let mut accessory = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BriarError::not_found("accessory", id))?;
        accessory.image_url = Some(image_url);
        accessory.thumbnail_url = Some(thumbnail_url);

        let updated = self.repository.update(&accessory).await?;
        self.cache
            .invalidate_entity(CatalogKind::Accessory, Some(id.into_inner()))
            .await;
        Ok(updated)
    }

    pub async fn delete(&self, id: AccessoryId) -> BriarResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(BriarError::not_found("accessory", id));
        }
        self.cache
            .invalidate_entity(CatalogKind::Accessory, Some(id.into_inner()))
            .await;

        info!("Deleted accessory {}", id);
        Ok(())
    }
}
