//! Service-level tests over mocked repositories and a real in-memory cache:
//! reads populate the cache, writes invalidate it, and store errors pass
//! through untouched.

use async_trait::async_trait;
use briar_core::domain::{
    CatalogKind, ItemStatus, Pipe, PipeFilter, PipeShape, RatingSummary, Review, ReviewStatus,
    Tobacco, TobaccoFilter,
};
use briar_core::{BriarError, BriarResult, Page, PageRequest, PipeId, ReviewId, TobaccoId};
use briar_repository::{PipeRepository, ReviewRepository, TobaccoRepository};
use briar_service::cache::{cache_keys, Cache, MemoryCacheBackend, DEFAULT_TTL};
use briar_service::dto::{CreatePipeRequest, ModerateReviewRequest};
use briar_service::{PipeService, ReviewService};
use mockall::mock;
use mockall::predicate::eq;
use std::sync::Arc;
use uuid::Uuid;

mock! {
    PipeRepo {}

    #[async_trait]
    impl PipeRepository for PipeRepo {
        async fn find_by_id(&self, id: PipeId) -> BriarResult<Option<Pipe>>;
        async fn find_all(&self, filter: &PipeFilter) -> BriarResult<Page<Pipe>>;
        async fn save(&self, pipe: &Pipe) -> BriarResult<Pipe>;
        async fn update(&self, pipe: &Pipe) -> BriarResult<Pipe>;
        async fn set_status(&self, id: PipeId, status: ItemStatus) -> BriarResult<bool>;
        async fn set_rating(&self, id: PipeId, summary: &RatingSummary) -> BriarResult<bool>;
        async fn delete(&self, id: PipeId) -> BriarResult<bool>;
    }
}

mock! {
    TobaccoRepo {}

    #[async_trait]
    impl TobaccoRepository for TobaccoRepo {
        async fn find_by_id(&self, id: TobaccoId) -> BriarResult<Option<Tobacco>>;
        async fn find_all(&self, filter: &TobaccoFilter) -> BriarResult<Page<Tobacco>>;
        async fn save(&self, tobacco: &Tobacco) -> BriarResult<Tobacco>;
        async fn update(&self, tobacco: &Tobacco) -> BriarResult<Tobacco>;
        async fn set_status(&self, id: TobaccoId, status: ItemStatus) -> BriarResult<bool>;
        async fn set_rating(&self, id: TobaccoId, summary: &RatingSummary) -> BriarResult<bool>;
        async fn delete(&self, id: TobaccoId) -> BriarResult<bool>;
    }
}

mock! {
    ReviewRepo {}

    #[async_trait]
    impl ReviewRepository for ReviewRepo {
        async fn find_by_id(&self, id: ReviewId) -> BriarResult<Option<Review>>;
        async fn find_approved_for_entity(
            &self,
            kind: CatalogKind,
            entity_id: Uuid,
            page: PageRequest,
        ) -> BriarResult<Page<Review>>;
        async fn find_by_status(
            &self,
            status: ReviewStatus,
            page: PageRequest,
        ) -> BriarResult<Page<Review>>;
        async fn save(&self, review: &Review) -> BriarResult<Review>;
        async fn set_status(&self, id: ReviewId, status: ReviewStatus) -> BriarResult<bool>;
        async fn rating_summary(
            &self,
            kind: CatalogKind,
            entity_id: Uuid,
        ) -> BriarResult<RatingSummary>;
        async fn delete(&self, id: ReviewId) -> BriarResult<bool>;
    }
}

fn memory_cache() -> Arc<Cache> {
    Arc::new(Cache::new(Arc::new(MemoryCacheBackend::new())))
}

fn active_pipe() -> Pipe {
    let mut pipe = Pipe::new(
        "System Standard".to_string(),
        "Peterson".to_string(),
        PipeShape::Bent,
        "briar".to_string(),
        9_500,
    );
    pipe.status = ItemStatus::Active;
    pipe
}

#[tokio::test]
async fn list_hits_the_store_once_per_filter_fingerprint() {
    let mut repo = MockPipeRepo::new();
    let pipe = active_pipe();
    repo.expect_find_all()
        .times(1)
        .returning(move |filter| Ok(Page::new(vec![pipe.clone()], filter.page.page, filter.page.size, 1)));

    let service = PipeService::new(Arc::new(repo), memory_cache());
    let filter = PipeFilter {
        status: Some(ItemStatus::Active),
        ..Default::default()
    };

    let first = service.list(&filter).await.unwrap();
    let second = service.list(&filter).await.unwrap();
    assert_eq!(first.content.len(), 1);
    assert_eq!(second.content.len(), 1);
    // times(1) on the mock proves the second call was served from cache.
}

#[tokio::test]
async fn get_public_hides_inactive_pipes() {
    let hidden = Pipe::new(
        "Prince".to_string(),
        "Savinelli".to_string(),
        PipeShape::Apple,
        "briar".to_string(),
        12_000,
    );
    let id = hidden.id;

    let mut repo = MockPipeRepo::new();
    repo.expect_find_by_id()
        .with(eq(id))
        .returning(move |_| Ok(Some(hidden.clone())));

    let service = PipeService::new(Arc::new(repo), memory_cache());

    assert!(matches!(
        service.get_public(id).await,
        Err(BriarError::NotFound { .. })
    ));
    // The admin path still sees it.
    assert!(service.get_admin(id).await.is_ok());
}

#[tokio::test]
async fn create_invalidates_cached_lists() {
    let mut repo = MockPipeRepo::new();
    let pipe = active_pipe();
    // Two store hits prove the cached list was dropped in between.
    repo.expect_find_all()
        .times(2)
        .returning(move |filter| Ok(Page::new(vec![pipe.clone()], filter.page.page, filter.page.size, 1)));
    repo.expect_save().returning(|pipe| Ok(pipe.clone()));

    let cache = memory_cache();
    let service = PipeService::new(Arc::new(repo), cache.clone());
    let filter = PipeFilter::default();

    service.list(&filter).await.unwrap();

    service
        .create(CreatePipeRequest {
            name: "Author".to_string(),
            brand: "Stanwell".to_string(),
            shape: PipeShape::Freehand,
            material: "briar".to_string(),
            finish: None,
            price_cents: 8_000,
            stock: 1,
            description: None,
        })
        .await
        .unwrap();

    service.list(&filter).await.unwrap();
}

#[tokio::test]
async fn store_errors_propagate_unmodified() {
    let mut repo = MockPipeRepo::new();
    repo.expect_find_all()
        .returning(|_| Err(BriarError::Database("connection refused".to_string())));

    let service = PipeService::new(Arc::new(repo), memory_cache());

    match service.list(&PipeFilter::default()).await {
        Err(BriarError::Database(msg)) => assert_eq!(msg, "connection refused"),
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[tokio::test]
async fn moderation_rewrites_the_rating_and_invalidates_the_entity() {
    let entity_id = Uuid::now_v7();
    let review = Review::new(
        CatalogKind::Pipe,
        entity_id,
        "Arto".to_string(),
        5,
        None,
    );
    let review_id = review.id;
    let summary = RatingSummary {
        average: Some(5.0),
        count: 1,
    };

    let mut reviews = MockReviewRepo::new();
    reviews
        .expect_find_by_id()
        .with(eq(review_id))
        .returning(move |_| Ok(Some(review.clone())));
    reviews
        .expect_set_status()
        .with(eq(review_id), eq(ReviewStatus::Approved))
        .times(1)
        .returning(|_, _| Ok(true));
    reviews
        .expect_rating_summary()
        .with(eq(CatalogKind::Pipe), eq(entity_id))
        .returning(move |_, _| Ok(summary));

    let mut pipes = MockPipeRepo::new();
    pipes
        .expect_set_rating()
        .withf(move |id, s| id.into_inner() == entity_id && s.count == 1)
        .times(1)
        .returning(|_, _| Ok(true));

    let tobaccos = MockTobaccoRepo::new();

    let cache = memory_cache();
    let entity_key = cache_keys::entity_key(CatalogKind::Pipe, entity_id);
    cache.set(&entity_key, &1u64, DEFAULT_TTL).await;
    cache.set("pipes:{}", &2u64, DEFAULT_TTL).await;
    cache.set(cache_keys::STATS_KEY, &3u64, DEFAULT_TTL).await;

    let service = ReviewService::new(
        Arc::new(reviews),
        Arc::new(pipes),
        Arc::new(tobaccos),
        cache.clone(),
    );

    let moderated = service
        .moderate(
            review_id,
            ModerateReviewRequest {
                status: ReviewStatus::Approved,
            },
        )
        .await
        .unwrap();
    assert_eq!(moderated.status, ReviewStatus::Approved);

    assert_eq!(cache.get::<u64>(&entity_key).await, None);
    assert_eq!(cache.get::<u64>("pipes:{}").await, None);
    assert_eq!(cache.get::<u64>(cache_keys::STATS_KEY).await, None);
}

#[tokio::test]
async fn moderating_twice_conflicts() {
    let mut approved = Review::new(
        CatalogKind::Tobacco,
        Uuid::now_v7(),
        "Juno".to_string(),
        3,
        None,
    );
    approved.status = ReviewStatus::Approved;
    let review_id = approved.id;

    let mut reviews = MockReviewRepo::new();
    reviews
        .expect_find_by_id()
        .returning(move |_| Ok(Some(approved.clone())));

    let service = ReviewService::new(
        Arc::new(reviews),
        Arc::new(MockPipeRepo::new()),
        Arc::new(MockTobaccoRepo::new()),
        memory_cache(),
    );

    assert!(matches!(
        service
            .moderate(
                review_id,
                ModerateReviewRequest {
                    status: ReviewStatus::Rejected,
                }
            )
            .await,
        Err(BriarError::Conflict(_))
    ));
}
