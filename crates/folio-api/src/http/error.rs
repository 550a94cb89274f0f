//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use folio_types::error::{AuthError, ExperienceError, ProfileError, ProjectError, UploadError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Account and session errors.
    Auth(AuthError),
    /// Profile errors.
    Profile(ProfileError),
    /// Project errors.
    Project(ProjectError),
    /// Experience timeline errors.
    Experience(ExperienceError),
    /// Upload errors.
    Upload(UploadError),
    /// Authentication failure.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        AppError::Profile(e)
    }
}

impl From<ProjectError> for AppError {
    fn from(e: ProjectError) -> Self {
        AppError::Project(e)
    }
}

impl From<ExperienceError> for AppError {
    fn from(e: ExperienceError) -> Self {
        AppError::Experience(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Upload(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Auth(AuthError::RegistrationDisabled) => (
                StatusCode::FORBIDDEN,
                "REGISTRATION_DISABLED",
                "Registration is currently disabled by administrator".to_string(),
            ),
            AppError::Auth(AuthError::MissingFields(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Auth(AuthError::WeakPassword(min)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Password must be at least {min} characters"),
            ),
            AppError::Auth(AuthError::EmailTaken) => (
                StatusCode::CONFLICT,
                "EMAIL_TAKEN",
                "An account with this email already exists".to_string(),
            ),
            AppError::Auth(AuthError::InvalidCredentials) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".to_string(),
            ),
            AppError::Auth(AuthError::InvalidSession) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_SESSION",
                "Invalid or expired session".to_string(),
            ),
            AppError::Auth(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ERROR", e.to_string())
            }
            AppError::Profile(ProfileError::NotFound) => (
                StatusCode::NOT_FOUND,
                "PROFILE_NOT_FOUND",
                "Profile not found".to_string(),
            ),
            AppError::Profile(e @ ProfileError::UpdateFailed { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PROFILE_UPDATE_FAILED",
                e.to_string(),
            ),
            AppError::Profile(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PROFILE_ERROR", e.to_string())
            }
            AppError::Project(ProjectError::NotFound) => (
                StatusCode::NOT_FOUND,
                "PROJECT_NOT_FOUND",
                "Project not found".to_string(),
            ),
            AppError::Project(ProjectError::SlugConflict(slug)) => (
                StatusCode::CONFLICT,
                "SLUG_CONFLICT",
                format!("Slug '{slug}' already exists"),
            ),
            AppError::Project(ProjectError::InvalidTitle(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Project(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PROJECT_ERROR", e.to_string())
            }
            AppError::Experience(ExperienceError::NotFound) => (
                StatusCode::NOT_FOUND,
                "EXPERIENCE_NOT_FOUND",
                "Experience not found".to_string(),
            ),
            AppError::Experience(ExperienceError::Invalid(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Experience(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "EXPERIENCE_ERROR",
                e.to_string(),
            ),
            AppError::Upload(UploadError::Empty) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "No file uploaded".to_string(),
            ),
            AppError::Upload(e @ UploadError::TooLarge { .. }) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                e.to_string(),
            ),
            AppError::Upload(UploadError::InvalidFilename(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Upload(UploadError::NotFound) => (
                StatusCode::NOT_FOUND,
                "UPLOAD_NOT_FOUND",
                "Upload not found".to_string(),
            ),
            AppError::Upload(UploadError::StoreFailed(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "MEDIA_STORE_ERROR",
                msg.clone(),
            ),
            AppError::Upload(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UPLOAD_ERROR", e.to_string())
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = AppError::Project(ProjectError::NotFound).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_registration_disabled_maps_to_403() {
        let resp = AppError::Auth(AuthError::RegistrationDisabled).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_slug_conflict_maps_to_409() {
        let resp =
            AppError::Project(ProjectError::SlugConflict("brand-refresh".to_string()))
                .into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_oversized_upload_maps_to_413() {
        let resp = AppError::Upload(UploadError::TooLarge { size: 30, max: 25 }).into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_invalid_session_maps_to_401() {
        let resp = AppError::Auth(AuthError::InvalidSession).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
