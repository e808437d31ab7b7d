//! Image upload gateway.
//!
//! Accepts one multipart file field, validates it, forwards it to the
//! image CDN, and answers with the stored asset's public URL. Validation
//! runs in full before any provider call, and every outcome, including a
//! malformed multipart body, is the fixed `{"url"}` / `{"error"}` JSON
//! envelope.
//!
//! Repeated uploads of identical bytes create distinct assets; there is
//! no idempotency key and no deduplication.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use noty_core::defaults::MAX_UPLOAD_BYTES;

use crate::error::ApiError;
use crate::state::AppState;

/// Response for a stored upload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Public HTTPS URL of the stored image.
    pub url: String,
}

/// Upload one image to the CDN.
///
/// # Request Body
/// Multipart form with a single file field named `file`.
///
/// # Returns
/// - 200 OK with the stored asset's URL
/// - 400 Bad Request when the file is missing, not an image, or over 10 MiB
/// - 500 Internal Server Error when provider configuration is missing or
///   the provider rejects the upload
#[utoipa::path(post, path = "/api/upload", tag = "Upload",
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Missing or invalid file"),
        (status = 500, description = "Provider unconfigured or rejected the upload"),
    ))]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // Configuration is checked first: without provider credentials no
    // network call may happen, whatever else is wrong with the request.
    let media = state.media.as_ref().ok_or_else(|| {
        ApiError::Internal(
            "Image provider configuration is missing. Please check environment variables.".into(),
        )
    })?;

    let mut multipart =
        multipart.map_err(|_| ApiError::BadRequest("Request must be multipart form data".into()))?;

    let mut file: Option<(Vec<u8>, String)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {e}")))?;
        file = Some((bytes.to_vec(), content_type));
        break;
    }

    let (bytes, content_type) = match file {
        Some((bytes, _)) if bytes.is_empty() => {
            return Err(ApiError::BadRequest("No file provided".into()))
        }
        Some(file) => file,
        None => return Err(ApiError::BadRequest("No file provided".into())),
    };

    if !content_type.starts_with("image/") {
        return Err(ApiError::BadRequest("File must be an image".into()));
    }

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::BadRequest(
            "File size must be less than 10MB".into(),
        ));
    }

    let url = media.upload(&bytes, &content_type).await?;
    info!(%url, size = bytes.len(), "Image uploaded");

    Ok(Json(UploadResponse { url }))
}
