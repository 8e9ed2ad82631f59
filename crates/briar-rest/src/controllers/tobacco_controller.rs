//! Tobacco catalog controller.

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
    BlendType, BriarError, CatalogSort, ItemStatus, Page, Tobacco, TobaccoCut, TobaccoFilter,
    TobaccoId,
};
use briar_service::{CreateTobaccoRequest, SetStatusRequest, UpdateTobaccoRequest};
use serde::Deserialize;
use tracing::debug;

/// Creates the tobacco router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tobaccos).post(create_tobacco))
        .route(
            "/:id",
            get(get_tobacco).put(update_tobacco).delete(delete_tobacco),
        )
        .route("/:id/status", patch(set_tobacco_status))
        .route("/:id/image", post(upload_tobacco_image))
}

/// Query parameters for tobacco lists.
#[derive(Debug, Default, Deserialize)]
pub struct TobaccoListQuery {
    pub brand: Option<String>,
    pub blend_type: Option<BlendType>,
    pub cut: Option<TobaccoCut>,
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub sort: CatalogSort,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl TobaccoListQuery {
    fn into_filter(self, authenticated: bool) -> TobaccoFilter {
        TobaccoFilter {
            brand: self.brand,
            blend_type: self.blend_type,
            cut: self.cut,
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

/// List tobaccos.
async fn list_tobaccos(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Query(query): Query<TobaccoListQuery>,
) -> ApiResult<Page<Tobacco>> {
    let filter = query.into_filter(user.is_some());
    let page = state.tobaccos.list(&filter).await?;
    ok(page)
}

/// Get a tobacco by ID.
async fn get_tobacco(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Tobacco> {
    let id = parse_tobacco_id(&id)?;
    let tobacco = if user.is_some() {
        state.tobaccos.get_admin(id).await?
    } else {
        state.tobaccos.get_public(id).await?
    };
    ok(tobacco)
}

/// Create a tobacco (editor or admin).
async fn create_tobacco(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Json(request): Json<CreateTobaccoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Tobacco>>), AppError> {
    debug!("Create tobacco request: {}", request.name);

    let tobacco = state.tobaccos.create(request).await?;
    Ok(created(tobacco))
}

/// Update a tobacco (editor or admin).
async fn update_tobacco(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    Json(request): Json<UpdateTobaccoRequest>,
) -> ApiResult<Tobacco> {
    let id = parse_tobacco_id(&id)?;
    let tobacco = state.tobaccos.update(id, request).await?;
    ok(tobacco)
}

/// Change a tobacco's status (editor or admin).
async fn set_tobacco_status(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_tobacco_id(&id)?;
    state.tobaccos.set_status(id, request).await?;
    Ok(no_content())
}

/// Upload a tobacco image (editor or admin).
async fn upload_tobacco_image(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Tobacco> {
    let id = parse_tobacco_id(&id)?;
    state.tobaccos.get_admin(id).await?;

    let (content_type, bytes) = read_image_upload(multipart).await?;
    let stored = state
        .images
        .store(
            briar_core::CatalogKind::Tobacco,
            id.into_inner(),
            &content_type,
            bytes,
        )
        .await?;
    let tobacco = state
        .tobaccos
        .set_images(id, stored.image_url, stored.thumbnail_url)
        .await?;
    ok(tobacco)
}

/// Delete a tobacco (admin only).
async fn delete_tobacco(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_tobacco_id(&id)?;
    state.tobaccos.delete(id).await?;
    Ok(no_content())
}

fn parse_tobacco_id(id: &str) -> Result<TobaccoId, AppError> {
    TobaccoId::parse(id)
        .map_err(|_| AppError(BriarError::validation(format!("Invalid tobacco ID: {id}"))))
}
