//! Experience timeline handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};

use folio_types::error::ExperienceError;
use folio_types::experience::{CreateExperienceRequest, UpdateExperienceRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

const EXPERIENCES_CACHE_KEY: &str = "/api/v1/experiences";

/// GET /api/v1/experiences - The public work timeline, newest first.
pub async fn list_experiences(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let payload = match state.cache.get(EXPERIENCES_CACHE_KEY) {
        Some(cached) => cached,
        None => {
            let experiences = state.experience_service.list().await?;
            let payload = serde_json::to_value(&experiences).unwrap();
            state.cache.put(EXPERIENCES_CACHE_KEY, payload.clone());
            payload
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("self", "/api/v1/experiences");

    Ok(Json(resp))
}

/// POST /api/v1/experiences - Add a timeline entry.
pub async fn create_experience(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(body): Json<CreateExperienceRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let experience = state
        .experience_service
        .add(&auth.profile.id, body)
        .await?;
    state.cache.invalidate_all();
    let elapsed = start.elapsed().as_millis() as u64;

    let experience_json = serde_json::to_value(&experience).unwrap();
    let resp = ApiResponse::success(experience_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/experiences/{}", experience.id));

    Ok(Json(resp))
}

/// PUT /api/v1/experiences/:id - Rewrite a timeline entry.
pub async fn update_experience(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
    Json(body): Json<UpdateExperienceRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = id
        .parse()
        .map_err(|_| AppError::Experience(ExperienceError::NotFound))?;
    let experience = state.experience_service.update(&id, body).await?;
    state.cache.invalidate_all();
    let elapsed = start.elapsed().as_millis() as u64;

    let experience_json = serde_json::to_value(&experience).unwrap();
    let resp = ApiResponse::success(experience_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/experiences/{}", experience.id));

    Ok(Json(resp))
}

/// DELETE /api/v1/experiences/:id - Remove a timeline entry.
pub async fn delete_experience(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let id = id
        .parse()
        .map_err(|_| AppError::Experience(ExperienceError::NotFound))?;
    state.experience_service.remove(&id).await?;
    state.cache.invalidate_all();
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
