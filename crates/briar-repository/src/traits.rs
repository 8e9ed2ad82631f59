//! Repository trait definitions.

use briar_core::domain::{
    Accessory, AccessoryFilter, CatalogKind, ItemStatus, Pipe, PipeFilter, RatingSummary, Review,
    ReviewStatus, Tobacco, TobaccoFilter, User,
};
use briar_core::{AccessoryId, BriarResult, Page, PageRequest, PipeId, ReviewId, TobaccoId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pipe repository trait.
#[async_trait]
pub trait PipeRepository: Send + Sync {
    /// Finds a pipe by ID.
    async fn find_by_id(&self, id: PipeId) -> BriarResult<Option<Pipe>>;

    /// Finds pipes matching a filter, paginated.
    async fn find_all(&self, filter: &PipeFilter) -> BriarResult<Page<Pipe>>;

    /// Saves a new pipe.
    async fn save(&self, pipe: &Pipe) -> BriarResult<Pipe>;

    /// Updates an existing pipe.
    async fn update(&self, pipe: &Pipe) -> BriarResult<Pipe>;

    /// Updates only the status of a pipe.
    async fn set_status(&self, id: PipeId, status: ItemStatus) -> BriarResult<bool>;

    /// Updates the denormalized rating columns of a pipe.
    async fn set_rating(&self, id: PipeId, summary: &RatingSummary) -> BriarResult<bool>;

    /// Deletes a pipe by ID.
    async fn delete(&self, id: PipeId) -> BriarResult<bool>;
}

/// Tobacco repository trait.
#[async_trait]
pub trait TobaccoRepository: Send + Sync {
    /// Finds a tobacco blend by ID.
    async fn find_by_id(&self, id: TobaccoId) -> BriarResult<Option<Tobacco>>;

    /// Finds tobacco blends matching a filter, paginated.
    async fn find_all(&self, filter: &TobaccoFilter) -> BriarResult<Page<Tobacco>>;

    /// Saves a new tobacco blend.
    async fn save(&self, tobacco: &Tobacco) -> BriarResult<Tobacco>;

    /// Updates an existing tobacco blend.
    async fn update(&self, tobacco: &Tobacco) -> BriarResult<Tobacco>;

    /// Updates only the status of a tobacco blend.
    async fn set_status(&self, id: TobaccoId, status: ItemStatus) -> BriarResult<bool>;

    /// Updates the denormalized rating columns of a tobacco blend.
    async fn set_rating(&self, id: TobaccoId, summary: &RatingSummary) -> BriarResult<bool>;

    /// Deletes a tobacco blend by ID.
    async fn delete(&self, id: TobaccoId) -> BriarResult<bool>;
}

/// Accessory repository trait.
#[async_trait]
pub trait AccessoryRepository: Send + Sync {
    /// Finds an accessory by ID.
    async fn find_by_id(&self, id: AccessoryId) -> BriarResult<Option<Accessory>>;

    /// Finds accessories matching a filter, paginated.
    async fn find_all(&self, filter: &AccessoryFilter) -> BriarResult<Page<Accessory>>;

    /// Saves a new accessory.
    async fn save(&self, accessory: &Accessory) -> BriarResult<Accessory>;

    /// Updates an existing accessory.
    async fn update(&self, accessory: &Accessory) -> BriarResult<Accessory>;

    /// Updates only the status of an accessory.
    async fn set_status(&self, id: AccessoryId, status: ItemStatus) -> BriarResult<bool>;

    /// Deletes an accessory by ID.
    async fn delete(&self, id: AccessoryId) -> BriarResult<bool>;
}

/// Review repository trait.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Finds a review by ID.
    async fn find_by_id(&self, id: ReviewId) -> BriarResult<Option<Review>>;

    /// Finds approved reviews for a catalog entity, newest first.
    async fn find_approved_for_entity(
        &self,
        kind: CatalogKind,
        entity_id: Uuid,
        page: PageRequest,
    ) -> BriarResult<Page<Review>>;

    /// Finds reviews by moderation status, oldest first.
    async fn find_by_status(
        &self,
        status: ReviewStatus,
        page: PageRequest,
    ) -> BriarResult<Page<Review>>;

    /// Saves a new review.
    async fn save(&self, review: &Review) -> BriarResult<Review>;

    /// Updates the moderation status of a review.
    async fn set_status(&self, id: ReviewId, status: ReviewStatus) -> BriarResult<bool>;

    /// Computes the approved-review rating summary for a catalog entity.
    async fn rating_summary(
        &self,
        kind: CatalogKind,
        entity_id: Uuid,
    ) -> BriarResult<RatingSummary>;

    /// Deletes a review by ID.
    async fn delete(&self, id: ReviewId) -> BriarResult<bool>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> BriarResult<Option<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> BriarResult<Option<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> BriarResult<User>;

    /// Records a successful login.
    async fn touch_last_login(&self, id: UserId) -> BriarResult<()>;
}

/// A single full-text search hit across the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub kind: CatalogKind,
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub thumbnail_url: Option<String>,
}

/// Cross-entity search and aggregate queries.
#[async_trait]
pub trait CatalogQueryRepository: Send + Sync {
    /// Case-insensitive name/brand search across active catalog entities.
    async fn search(&self, query: &str, limit: i64) -> BriarResult<Vec<SearchHit>>;

    /// Counts active entities per catalog kind plus approved reviews.
    async fn catalog_counts(&self) -> BriarResult<CatalogCounts>;

    /// The highest-rated active pipes and tobaccos with at least one approved review.
    async fn top_rated(&self, limit: i64) -> BriarResult<Vec<SearchHit>>;
}

/// Raw counts backing the public stats endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub pipes: i64,
    pub tobaccos: i64,
    pub accessories: i64,
    pub approved_reviews: i64,
}
