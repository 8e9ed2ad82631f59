//! Review submission and moderation controller.
//!
//! Public routes hang off the pipe and tobacco routers; accessories have no
//! review routes at all. Moderation lives under `/reviews` behind the admin
//! gate.

use crate::{
    extractors::{PaginationQuery, RequireAdmin},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use briar_core::{BriarError, CatalogKind, Page, ReviewId};
use briar_service::{
    ModerateReviewRequest, ModerationReviewResponse, ReviewResponse, SubmitReviewRequest,
};
use tracing::debug;
use uuid::Uuid;

/// Review routes for pipes, mounted under `/pipes`.
pub fn pipe_review_router() -> Router<AppState> {
    Router::new().route(
        "/:id/reviews",
        get(list_pipe_reviews).post(submit_pipe_review),
    )
}

/// Review routes for tobaccos, mounted under `/tobaccos`.
pub fn tobacco_review_router() -> Router<AppState> {
    Router::new().route(
        "/:id/reviews",
        get(list_tobacco_reviews).post(submit_tobacco_review),
    )
}

/// Moderation routes, mounted under `/reviews`.
pub fn moderation_router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(list_pending_reviews))
        .route("/:id", patch(moderate_review))
}

async fn list_pipe_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Page<ReviewResponse>> {
    list_reviews(&state, CatalogKind::Pipe, &id, pagination).await
}

async fn list_tobacco_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Page<ReviewResponse>> {
    list_reviews(&state, CatalogKind::Tobacco, &id, pagination).await
}

async fn submit_pipe_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    submit_review(&state, CatalogKind::Pipe, &id, request).await
}

async fn submit_tobacco_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    submit_review(&state, CatalogKind::Tobacco, &id, request).await
}

/// Approved reviews for one catalog item, newest first.
async fn list_reviews(
    state: &AppState,
    kind: CatalogKind,
    id: &str,
    pagination: PaginationQuery,
) -> ApiResult<Page<ReviewResponse>> {
    let entity_id = parse_entity_id(id)?;
    let page = state
        .reviews
        .list_approved(kind, entity_id, pagination.into())
        .await?;
    ok(page.map(ReviewResponse::from))
}

/// Anonymous review submission. The review lands in the moderation queue.
async fn submit_review(
    state: &AppState,
    kind: CatalogKind,
    id: &str,
    request: SubmitReviewRequest,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    let entity_id = parse_entity_id(id)?;
    debug!("Review submission for {} {}", kind, entity_id);

    let review = state.reviews.submit(kind, entity_id, request).await?;
    Ok(created(ReviewResponse::from(review)))
}

/// The moderation queue, oldest first (admin only).
async fn list_pending_reviews(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Page<ModerationReviewResponse>> {
    let page = state.reviews.list_pending(pagination.into()).await?;
    ok(page.map(ModerationReviewResponse::from))
}

/// Approve or reject a pending review (admin only).
async fn moderate_review(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Path(id): Path<String>,
    Json(request): Json<ModerateReviewRequest>,
) -> ApiResult<ModerationReviewResponse> {
    let id = ReviewId::parse(&id)
        .map_err(|_| AppError(BriarError::validation(format!("Invalid review ID: {id}"))))?;
    let review = state.reviews.moderate(id, request).await?;
    ok(ModerationReviewResponse::from(review))
}

fn parse_entity_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id)
        .map_err(|_| AppError(BriarError::validation(format!("Invalid item ID: {id}"))))
}
