use thiserror::Error;

/// Errors related to registration, login, and sessions.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("registration is currently disabled by administrator")]
    RegistrationDisabled,

    #[error("missing required fields: {0}")]
    MissingFields(String),

    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired session")]
    InvalidSession,

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile not found")]
    NotFound,

    /// All three update attempts failed. `details` is the final failure,
    /// `original` the one that started the fallback chain.
    #[error("failed to update profile: {details} (original error: {original})")]
    UpdateFailed { details: String, original: String },

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project not found")]
    NotFound,

    #[error("slug '{0}' already exists")]
    SlugConflict(String),

    #[error("invalid project title: {0}")]
    InvalidTitle(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to experience timeline operations.
#[derive(Debug, Error)]
pub enum ExperienceError {
    #[error("experience not found")]
    NotFound,

    #[error("invalid experience: {0}")]
    Invalid(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to file uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    Empty,

    #[error("file is {size} bytes, exceeding the {max} byte limit")]
    TooLarge { size: u64, max: u64 },

    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    #[error("upload not found")]
    NotFound,

    #[error("media store error: {0}")]
    StoreFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in folio-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::RegistrationDisabled;
        assert_eq!(
            err.to_string(),
            "registration is currently disabled by administrator"
        );
    }

    #[test]
    fn test_profile_update_failed_carries_both_errors() {
        let err = ProfileError::UpdateFailed {
            details: "no such column: cv_url".to_string(),
            original: "table profiles has no column named cv_url".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("no such column: cv_url"));
        assert!(s.contains("original error"));
    }

    #[test]
    fn test_project_error_display() {
        let err = ProjectError::SlugConflict("brand-refresh".to_string());
        assert_eq!(err.to_string(), "slug 'brand-refresh' already exists");
    }

    #[test]
    fn test_upload_too_large_display() {
        let err = UploadError::TooLarge { size: 100, max: 50 };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
