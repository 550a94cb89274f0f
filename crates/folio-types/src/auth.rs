//! Authentication types: credentials requests, sessions, and the session
//! token format.
//!
//! A session token is an opaque `folio_` + 64 hex chars string handed to the
//! client once at login. Only its SHA-256 hash is persisted, so a leaked
//! database cannot be replayed against the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::profile::{ProfileId, ProfileView};

/// Prefix on every session token, so tokens are recognizable in logs and
/// password managers without revealing anything.
pub const SESSION_TOKEN_PREFIX: &str = "folio_";

/// Unique identifier for a session row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A login session. `token_hash` is the SHA-256 hex digest of the bearer
/// token; the token itself is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub profile_id: ProfileId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Request to create the owner account. Gated behind `registration_enabled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// What a successful login returns: the bearer token (shown exactly once)
/// plus its expiry and the profile it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: ProfileView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = Session {
            id: SessionId::new(),
            profile_id: ProfileId::new(),
            token_hash: "abc".to_string(),
            created_at: now,
            expires_at: now + Duration::hours(1),
            last_used_at: None,
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));
        assert!(session.is_expired(session.expires_at));
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(SESSION_TOKEN_PREFIX, "folio_");
    }
}
