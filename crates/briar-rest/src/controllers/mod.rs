//! HTTP controllers.

pub mod accessory_controller;
pub mod auth_controller;
pub mod health_controller;
pub mod pipe_controller;
pub mod review_controller;
pub mod search_controller;
pub mod stats_controller;
pub mod tobacco_controller;

use crate::responses::AppError;
use axum::extract::Multipart;
use briar_core::BriarError;

/// Pulls the first file field out of a multipart upload, returning its
/// declared content type and bytes. The field name is conventionally
/// `file` but any field carrying a content type is accepted.
pub(crate) async fn read_image_upload(
    mut multipart: Multipart,
) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError(BriarError::validation(format!("Malformed upload: {e}"))))?
    {
        let Some(content_type) = field.content_type().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError(BriarError::validation(format!("Failed to read upload: {e}"))))?;
        return Ok((content_type, bytes.to_vec()));
    }
    Err(AppError(BriarError::validation(
        "Multipart upload contains no file field",
    )))
}
