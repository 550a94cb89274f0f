//! Dashboard statistics endpoint.
//!
//! GET /api/v1/stats - Aggregate counts for the admin dashboard.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use sqlx::Row;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/stats - Aggregate dashboard statistics.
///
/// Returns project counts by status, the featured count, the five most
/// recent projects, and totals for experiences and uploads. The side
/// counts use COUNT(*) queries directly on the reader pool.
pub async fn get_stats(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let project_stats = state.project_service.stats().await?;

    let experience_row = sqlx::query("SELECT COUNT(*) as cnt FROM experiences")
        .fetch_one(&state.db_pool.reader)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to query experience count: {e}")))?;
    let total_experiences: i64 = experience_row.try_get("cnt").unwrap_or(0);

    let upload_row = sqlx::query("SELECT COUNT(*) as cnt FROM uploads")
        .fetch_one(&state.db_pool.reader)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to query upload count: {e}")))?;
    let total_uploads: i64 = upload_row.try_get("cnt").unwrap_or(0);

    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::json!({
        "total_projects": project_stats.total,
        "published_projects": project_stats.published,
        "draft_projects": project_stats.draft,
        "featured_projects": project_stats.featured,
        "total_experiences": total_experiences,
        "total_uploads": total_uploads,
        "recent_projects": project_stats.recent,
    });

    let resp = ApiResponse::success(data, request_id, elapsed)
        .with_link("self", "/api/v1/stats")
        .with_link("projects", "/api/v1/admin/projects");

    Ok(Json(resp))
}
