//! Upload handlers: multipart intake plus the media library listing.

use std::time::Instant;

use axum::Json;
use axum::extract::{Multipart, Path, State};

use folio_types::error::UploadError;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/upload - Store one file from a multipart form.
///
/// Reads the `file` field, hands the bytes to the configured media backend,
/// and returns the recorded upload with its public URL. Uploading does not
/// touch the public cache: nothing rendered changes until the URL is
/// attached to a project or the profile.
pub async fn upload(
    State(state): State<AppState>,
    _auth: Authenticated,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let upload = state.media_service.upload(&original_name, &data).await?;
        let elapsed = start.elapsed().as_millis() as u64;

        let upload_json = serde_json::to_value(&upload).unwrap();
        let resp = ApiResponse::success(upload_json, request_id, elapsed)
            .with_link("self", &format!("/api/v1/uploads/{}", upload.id))
            .with_link("uploads", "/api/v1/uploads");

        return Ok(Json(resp));
    }

    Err(AppError::Upload(UploadError::Empty))
}

/// GET /api/v1/uploads - All recorded uploads, newest first.
pub async fn list_uploads(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let uploads = state.media_service.list().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let uploads_json: Vec<serde_json::Value> = uploads
        .iter()
        .map(|u| serde_json::to_value(u).unwrap())
        .collect();

    let resp = ApiResponse::success(uploads_json, request_id, elapsed)
        .with_link("self", "/api/v1/uploads");

    Ok(Json(resp))
}

/// DELETE /api/v1/uploads/:id - Delete an upload record and its file.
pub async fn delete_upload(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = id
        .parse()
        .map_err(|_| AppError::Upload(UploadError::NotFound))?;
    state.media_service.delete(&id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
