//! Session authentication extractor.
//!
//! Extracts and verifies session tokens from:
//! - `Authorization: Bearer <token>` header
//! - `folio_session` cookie
//!
//! Tokens are SHA-256 hashed and resolved against the `sessions` table via
//! the auth service, which also expires stale sessions on sight.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use folio_types::profile::Profile;

use crate::http::error::AppError;
use crate::state::AppState;

/// Name of the session cookie set by browser clients.
pub const SESSION_COOKIE: &str = "folio_session";

/// Authenticated request marker. Extracting this validates the session token
/// and carries the profile it belongs to.
pub struct Authenticated {
    /// The site owner's profile, resolved from the session.
    pub profile: Profile,
    /// The raw token the request carried. Logout hashes it to find the row.
    pub token: String,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(parts)?;
        let profile = state.auth_service.authenticate(&token).await?;
        Ok(Authenticated { profile, token })
    }
}

/// Extract the session token from request headers.
fn extract_session_token(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <token>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    // Try the session cookie
    if let Some(cookie) = parts.headers.get("cookie") {
        let cookie_str = cookie
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Cookie header encoding".to_string()))?;
        for pair in cookie_str.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE {
                    return Ok(value.trim().to_string());
                }
            }
        }
    }

    Err(AppError::Unauthorized(
        "Missing session token. Provide via 'Authorization: Bearer <token>' header or the 'folio_session' cookie.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = axum::http::Request::builder().uri("/api/v1/stats");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_extracts_bearer_token() {
        let parts = parts_with_headers(&[("authorization", "Bearer folio_abc123")]);
        assert_eq!(extract_session_token(&parts).unwrap(), "folio_abc123");
    }

    #[test]
    fn test_extracts_session_cookie() {
        let parts = parts_with_headers(&[("cookie", "theme=dark; folio_session=folio_xyz; lang=en")]);
        assert_eq!(extract_session_token(&parts).unwrap(), "folio_xyz");
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let parts = parts_with_headers(&[
            ("authorization", "Bearer folio_header"),
            ("cookie", "folio_session=folio_cookie"),
        ]);
        assert_eq!(extract_session_token(&parts).unwrap(), "folio_header");
    }

    #[test]
    fn test_missing_token_rejected() {
        let parts = parts_with_headers(&[]);
        assert!(extract_session_token(&parts).is_err());
    }
}
