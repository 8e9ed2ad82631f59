//! Accessory catalog controller.
//!
//! Accessories carry no reviews or ratings, so this router has no review
//! routes and no rating-driven sorting beyond what the filter allows.

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
    Accessory, AccessoryFilter, AccessoryId, AccessoryKind, BriarError, CatalogSort, ItemStatus,
    Page,
};
use briar_service::{CreateAccessoryRequest, SetStatusRequest, UpdateAccessoryRequest};
use serde::Deserialize;
use tracing::debug;

/// Creates the accessory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accessories).post(create_accessory))
        .route(
            "/:id",
            get(get_accessory)
                .put(update_accessory)
                .delete(delete_accessory),
        )
        .route("/:id/status", patch(set_accessory_status))
        .route("/:id/image", post(upload_accessory_image))
}

/// Query parameters for accessory lists.
#[derive(Debug, Default, Deserialize)]
pub struct AccessoryListQuery {
    pub brand: Option<String>,
    pub kind: Option<AccessoryKind>,
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub sort: CatalogSort,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl AccessoryListQuery {
    fn into_filter(self, authenticated: bool) -> AccessoryFilter {
        AccessoryFilter {
            brand: self.brand,
            kind: self.kind,
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

/// List accessories.
async fn list_accessories(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Query(query): Query<AccessoryListQuery>,
) -> ApiResult<Page<Accessory>> {
    let filter = query.into_filter(user.is_some());
    let page = state.accessories.list(&filter).await?;
    ok(page)
}

/// Get an accessory by ID.
async fn get_accessory(
    State(state): State<AppState>,
    user: Option<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Accessory> {
    let id = parse_accessory_id(&id)?;
    let accessory = if user.is_some() {
        state.accessories.get_admin(id).await?
    } else {
        state.accessories.get_public(id).await?
    };
    ok(accessory)
}

/// Create an accessory (editor or admin).
async fn create_accessory(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Json(request): Json<CreateAccessoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Accessory>>), AppError> {
    debug!("Create accessory request: {}", request.name);

    let accessory = state.accessories.create(request).await?;
    Ok(created(accessory))
}

/// Update an accessory (editor or admin).
async fn update_accessory(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    Json(request): Json<UpdateAccessoryRequest>,
) -> ApiResult<Accessory> {
    let id = parse_accessory_id(&id)?;
    let accessory = state.accessories.update(id, request).await?;
    ok(accessory)
}

/// Change an accessory's status (editor or admin).
async fn set_accessory_status(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_accessory_id(&id)?;
    state.accessories.set_status(id, request).await?;
    Ok(no_content())
}

/// Upload an accessory image (editor or admin).
async fn upload_accessory_image(
    State(state): State<AppState>,
    RequireEditor(_session): RequireEditor,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Accessory> {
    let id = parse_accessory_id(&id)?;
    state.accessories.get_admin(id).await?;

    let (content_type, bytes) = read_image_upload(multipart).await?;
    let stored = state
        .images
        .store(
            briar_core::CatalogKind::Accessory,
            id.into_inner(),
            &content_type,
            bytes,
        )
        .await?;
    let accessory = state
        .accessories
        .set_images(id, stored.image_url, stored.thumbnail_url)
        .await?;
    ok(accessory)
}

/// Delete an accessory (admin only).
async fn delete_accessory(
    State(state): State<AppState>,
    RequireAdmin(_session): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_accessory_id(&id)?;
    state.accessories.delete(id).await?;
    Ok(no_content())
}

fn parse_accessory_id(id: &str) -> Result<AccessoryId, AppError> {
    AccessoryId::parse(id)
        .map_err(|_| AppError(BriarError::validation(format!("Invalid accessory ID: {id}"))))
}
