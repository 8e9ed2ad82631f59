//! Image upload pipeline.
//!
//! Validates the declared content type, decodes the upload, produces a
//! bounding-box JPEG thumbnail, and persists both variants under the
//! uploads directory. Decode and resize run on the blocking pool.

use briar_config::UploadsConfig;
use briar_core::domain::CatalogKind;
use briar_core::{BriarError, BriarResult};
use image::ImageFormat;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// Public paths of the stored variants.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub image_url: String,
    pub thumbnail_url: String,
}

/// Image decode/resize/persist service.
pub struct ImageService {
    config: UploadsConfig,
}

impl ImageService {
    #[must_use]
    pub fn new(config: UploadsConfig) -> Self {
        Self { config }
    }

    fn format_for(content_type: &str) -> BriarResult<(ImageFormat, &'static str)> {
        match content_type {
            "image/jpeg" => Ok((ImageFormat::Jpeg, "jpg")),
            "image/png" => Ok((ImageFormat::Png, "png")),
            "image/webp" => Ok((ImageFormat::WebP, "webp")),
            other => Err(BriarError::Image(format!(
                "Unsupported content type '{other}'"
            ))),
        }
    }

    /// Stores an uploaded image and its thumbnail for a catalog entity,
    /// returning their public paths.
    pub async fn store(
        &self,
        kind: CatalogKind,
        id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> BriarResult<StoredImage> {
        if bytes.is_empty() {
            return Err(BriarError::Image("Empty upload".to_string()));
        }
        if bytes.len() > self.config.max_bytes {
            return Err(BriarError::Image(format!(
                "Upload exceeds the {} byte limit",
                self.config.max_bytes
            )));
        }
        let (format, ext) = Self::format_for(content_type)?;

        let max_px = self.config.thumbnail_max_px;
        let (original, thumbnail) =
            tokio::task::spawn_blocking(move || -> BriarResult<(Vec<u8>, Vec<u8>)> {
                let img = image::load_from_memory_with_format(&bytes, format)
                    .map_err(|e| BriarError::Image(format!("Failed to decode image: {e}")))?;

                // thumbnail() fits the image inside a max_px square while
                // preserving aspect ratio.
                let thumb = img.thumbnail(max_px, max_px);
                let mut out = Cursor::new(Vec::new());
                thumb
                    .to_rgb8()
                    .write_to(&mut out, ImageFormat::Jpeg)
                    .map_err(|e| BriarError::Image(format!("Failed to encode thumbnail: {e}")))?;

                Ok((bytes, out.into_inner()))
            })
            .await
            .map_err(|e| BriarError::internal(format!("Image task panicked: {e}")))??;

        let dir = PathBuf::from(&self.config.dir).join(kind.plural());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| BriarError::internal(format!("Failed to create uploads dir: {e}")))?;

        let image_name = format!("{id}.{ext}");
        let thumb_name = format!("{id}_thumb.jpg");
        tokio::fs::write(dir.join(&image_name), &original)
            .await
            .map_err(|e| BriarError::internal(format!("Failed to write image: {e}")))?;
        tokio::fs::write(dir.join(&thumb_name), &thumbnail)
            .await
            .map_err(|e| BriarError::internal(format!("Failed to write thumbnail: {e}")))?;

        info!("Stored image for {} {}", kind, id);
        Ok(StoredImage {
            image_url: format!("{}/{}/{}", self.config.public_prefix, kind.plural(), image_name),
            thumbnail_url: format!(
                "{}/{}/{}",
                self.config.public_prefix,
                kind.plural(),
                thumb_name
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_known_types() {
        assert!(ImageService::format_for("image/jpeg").is_ok());
        assert!(ImageService::format_for("image/png").is_ok());
        assert!(ImageService::format_for("image/webp").is_ok());
        assert!(matches!(
            ImageService::format_for("image/gif"),
            Err(BriarError::Image(_))
        ));
    }
}
