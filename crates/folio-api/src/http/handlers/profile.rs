//! Profile handlers: the public read and the admin settings write.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use folio_types::profile::{ProfileView, UpdateProfileRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

const PROFILE_CACHE_KEY: &str = "/api/v1/profile";

/// GET /api/v1/profile - The site owner's public profile.
///
/// Served from the public cache when warm; otherwise rendered from the
/// database and cached for the next minute.
pub async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let payload = match state.cache.get(PROFILE_CACHE_KEY) {
        Some(cached) => cached,
        None => {
            let profile = state.profile_service.public_profile().await?;
            let view: ProfileView = profile.into();
            let payload = serde_json::to_value(&view).unwrap();
            state.cache.put(PROFILE_CACHE_KEY, payload.clone());
            payload
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("self", "/api/v1/profile")
        .with_link("projects", "/api/v1/projects")
        .with_link("experiences", "/api/v1/experiences");

    Ok(Json(resp))
}

/// PUT /api/v1/profile - Apply the settings form.
///
/// The write runs the schema-healing fallback chain; when a degraded path
/// was taken the response carries a `message` or `warning` alongside the
/// saved profile so the form can tell the owner what actually happened.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: Authenticated,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let outcome = state
        .profile_service
        .update_profile(&auth.profile.id, body)
        .await?;
    state.cache.invalidate_all();

    let message = outcome.message();
    let warning = outcome.warning();
    let view: ProfileView = outcome.into_profile().into();

    let mut payload = serde_json::json!({
        "profile": serde_json::to_value(&view).unwrap(),
    });
    if let Some(message) = message {
        payload["message"] = message.into();
    }
    if let Some(warning) = warning {
        payload["warning"] = warning.into();
    }

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("self", "/api/v1/profile");

    Ok(Json(resp))
}
