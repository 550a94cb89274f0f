//! Account and session handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::State;

use folio_types::auth::{LoginRequest, RegisterRequest};
use folio_types::profile::ProfileView;

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/auth/register - Create the admin account over HTTP.
///
/// Refused with 403 unless `registration_enabled` is set in config; a live
/// portfolio does not take signups.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let profile = state.auth_service.register(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let view: ProfileView = profile.into();
    let resp = ApiResponse::success(serde_json::to_value(&view).unwrap(), request_id, elapsed)
        .with_link("login", "/api/v1/auth/login");

    Ok(Json(resp))
}

/// POST /api/v1/auth/login - Exchange credentials for a session token.
///
/// The token appears in this response and nowhere else; the server keeps
/// only its hash.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let session = state.auth_service.login(body).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(serde_json::to_value(&session).unwrap(), request_id, elapsed)
        .with_link("session", "/api/v1/auth/session")
        .with_link("logout", "/api/v1/auth/logout");

    Ok(Json(resp))
}

/// GET /api/v1/auth/session - The profile behind the presented token.
pub async fn session(
    auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let view: ProfileView = auth.profile.into();
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(serde_json::to_value(&view).unwrap(), request_id, elapsed)
        .with_link("self", "/api/v1/auth/session");

    Ok(Json(resp))
}

/// POST /api/v1/auth/logout - Delete the presented session.
pub async fn logout(
    State(state): State<AppState>,
    auth: Authenticated,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    state.auth_service.logout(&auth.token).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"logged_out": true}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
