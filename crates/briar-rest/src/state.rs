//! Shared application state.

use briar_service::{
    AccessoryService, AuthService, ImageService, PipeService, ReviewService, SearchService,
    StatsService, TobaccoService,
};
use std::sync::Arc;

/// Handles to every service, cloned into each handler.
#[derive(Clone)]
pub struct AppState {
    pub pipes: Arc<PipeService>,
    pub tobaccos: Arc<TobaccoService>,
    pub accessories: Arc<AccessoryService>,
    pub reviews: Arc<ReviewService>,
    pub stats: Arc<StatsService>,
    pub search: Arc<SearchService>,
    pub auth: Arc<AuthService>,
    pub images: Arc<ImageService>,
}
