//! Aggregate catalog stats controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{extract::State, routing::get, Router};
use briar_service::CatalogStatsResponse;

/// Creates the stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(stats))
}

/// Catalog counts plus the top-rated items.
async fn stats(State(state): State<AppState>) -> ApiResult<CatalogStatsResponse> {
    let response = state.stats.stats().await?;
    ok(response)
}
