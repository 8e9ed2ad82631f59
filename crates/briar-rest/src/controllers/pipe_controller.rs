//! Pipe catalog controller.

use crate::{
    controllers::read_image_upload,
    extractors::{CurrentUser, RequireAdmin, RequireEditor},
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use briar_core::{
    BriarError, CatalogSort, ItemStatus, Page, Pipe, PipeFilter, PipeId, PipeShape,
};
use briar_service::{CreatePipeRequest, SetStatusRequest, UpdatePipeRequest};
use serde::Deserialize;
use tracing::debug;

/// Creates the pipe router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pipes).post(create_pipe))
        .route(
            "/:id",
            get(get_pipe).put(update_pipe).delete(delete_pipe),
        )
        .route("/:id/status", patch(set_pipe_status))
        .route("/:id/image", post(upload_pipe_image))
}

/// Query parameters for pipe lists.
#[derive(Debug, Default, Deserialize)]
pub struct PipeListQuery {
    pub brand: Option<String>,
    pub shape: Option<PipeShape>,
    pub material: Option<String>,
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub sort: CatalogSort,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl PipeListQuery {
    /// Builds the repository filter. Anonymous callers only ever see active
    /// items; an authenticated session may filter by any status, where a
    /// missing status means all of them.
    fn into_filter(self, authenticated: bool) -> PipeFilter {
        PipeFilter {
            brand: self.brand,
            shape: self.shape,
            material: self.material,
            status: if authenticated {
                self.status
            } else {
                Some(ItemStatus::Active)
            },
            sort: self.sort,
            page: crate::extractors::PaginationQuery {
                page: self.page,
                size: self.size,
            }
            .into(),
        }
    }
}

/// List pipes.
async fn list_pipes(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Query(query): Query<PipeListQuery>,
) -> ApiResult<Page<Pipe>> {
    let filter = query.into_filter(user.is_some());
    let page = state.pipes.list(&filter).await?;
    ok(page)
}

/// Get a pipe by ID.
async fn get_pipe(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Pipe> {
    let id = parse_pipe_id(&id)?;
    let pipe = if user.is_some() {
        state.pipes.get_admin(id).await?
    } else {
        state.pipes.get_public(id).await?
    };
    ok(pipe)
}

/// Create a pipe (editor or admin).
async fn create_pipe(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Json(request): Json<CreatePipeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Pipe>>), AppError> {
    debug!("Create pipe request: {}", request.name);

    let pipe = state.pipes.create(request).await?;
    Ok(created(pipe))
}

/// Update a pipe (editor or admin).
async fn update_pipe(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    Json(request): Json<UpdatePipeRequest>,
) -> ApiResult<Pipe> {
    let id = parse_pipe_id(&id)?;
    let pipe = state.pipes.update(id, request).await?;
    ok(pipe)
}

/// Change a pipe's status (editor or admin).
async fn set_pipe_status(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_pipe_id(&id)?;
    state.pipes.set_status(id, request).await?;
    Ok(no_content())
}

/// Upload a pipe image (editor or admin).
async fn upload_pipe_image(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Pipe> {
    let id = parse_pipe_id(&id)?;

    // Make sure the pipe exists before touching the filesystem.
    state.pipes.get_admin(id).await?;

    let (content_type, bytes) = read_image_upload(multipart).await?;
    let stored = state
        .images
        .store(briar_core::CatalogKind::Pipe, id.into_inner(), &content_type, bytes)
        .await?;
    let pipe = state
        .pipes
        .set_images(id, stored.image_url, stored.thumbnail_url)
        .await?;
    ok(pipe)
}

/// Delete a pipe (admin only).
async fn delete_pipe(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_pipe_id(&id)?;
    state.pipes.delete(id).await?;
    Ok(no_content())
}

fn parse_pipe_id(id: &str) -> Result<PipeId, AppError> {
    PipeId::parse(id)
        .map_err(|_| AppError(BriarError::validation(format!("Invalid pipe ID: {id}"))))
}
