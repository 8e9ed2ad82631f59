//! Catalog search controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use briar_service::{SearchQuery, SearchResponse};
use serde::Deserialize;

/// Creates the search router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(search))
}

/// Raw query parameters; normalization happens in [`SearchQuery::new`].
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<i64>,
}

/// Search active catalog items by name or brand.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<SearchResponse> {
    let query = SearchQuery::new(&params.q, params.limit);
    let response = state.search.search(query).await?;
    ok(response)
}
