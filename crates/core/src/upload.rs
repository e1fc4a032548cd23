//! Cover image upload rules.
//!
//! Uploads are not stored: an accepted image only produces a placeholder
//! URL that is recorded on the book.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "imagen";

/// Maximum accepted image size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Check the declared content type and payload size of an upload.
pub fn validate_image(content_type: Option<&str>, len: usize) -> Result<(), CoreError> {
    let is_image = content_type
        .map(|ct| ct.trim().to_ascii_lowercase())
        .is_some_and(|ct| ct.starts_with("image/"));
    if !is_image {
        return Err(CoreError::UploadRejected("Solo se permiten imágenes".to_string()));
    }
    if len == 0 {
        return Err(CoreError::UploadRejected("La imagen está vacía".to_string()));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(CoreError::UploadRejected(format!(
            "La imagen supera el tamaño máximo de {} MB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

/// File extension for an image MIME type.
pub fn image_extension(content_type: &str) -> &'static str {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "img",
    }
}

/// Placeholder URL recorded for an accepted upload.
///
/// Convention: `/imagenes/libro-{id}-{unix_millis}.{ext}`
pub fn placeholder_image_url(book_id: DbId, content_type: &str, uploaded_at: Timestamp) -> String {
    format!(
        "/imagenes/libro-{book_id}-{}.{}",
        uploaded_at.timestamp_millis(),
        image_extension(content_type)
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn accepts_images_within_limit() {
        assert!(validate_image(Some("image/png"), 1024).is_ok());
        assert!(validate_image(Some("IMAGE/JPEG"), MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn rejects_non_image_content() {
        assert_matches!(
            validate_image(Some("application/pdf"), 10),
            Err(CoreError::UploadRejected(_))
        );
        assert_matches!(validate_image(None, 10), Err(CoreError::UploadRejected(_)));
    }

    #[test]
    fn rejects_oversized_and_empty_payloads() {
        assert_matches!(
            validate_image(Some("image/png"), MAX_IMAGE_BYTES + 1),
            Err(CoreError::UploadRejected(msg)) if msg.contains("5 MB")
        );
        assert_matches!(
            validate_image(Some("image/png"), 0),
            Err(CoreError::UploadRejected(_))
        );
    }

    #[test]
    fn placeholder_url_encodes_id_time_and_extension() {
        let at = chrono::Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            placeholder_image_url(7, "image/jpeg", at),
            "/imagenes/libro-7-1700000000123.jpg"
        );
        assert_eq!(
            placeholder_image_url(7, "image/x-unknown", at),
            "/imagenes/libro-7-1700000000123.img"
        );
    }
}
