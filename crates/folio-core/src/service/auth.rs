//! Authentication service.
//!
//! Orchestrates account creation, credential login, and session lifecycle.
//! Passwords are hashed behind the [`PasswordHasher`] port; session tokens
//! are random, handed out once, and stored only as SHA-256 hashes.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};

use folio_types::auth::{LoginRequest, RegisterRequest, SESSION_TOKEN_PREFIX, Session, SessionId, SessionInfo};
use folio_types::error::{AuthError, RepositoryError};
use folio_types::profile::{Profile, ProfileId};

use crate::repository::profile::ProfileRepository;
use crate::repository::session::SessionRepository;
use crate::service::password::PasswordHasher;

/// Minimum accepted password length.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Knobs the auth service takes from site configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Whether HTTP registration is open.
    pub registration_enabled: bool,
    /// Session lifetime in hours.
    pub session_ttl_hours: i64,
}

/// Service orchestrating accounts and sessions.
///
/// Generic over repository and hashing traits to maintain clean
/// architecture -- folio-core never depends on folio-infra.
pub struct AuthService<P: ProfileRepository, S: SessionRepository, H: PasswordHasher> {
    profiles: P,
    sessions: S,
    hasher: H,
    config: AuthConfig,
}

impl<P: ProfileRepository, S: SessionRepository, H: PasswordHasher> AuthService<P, S, H> {
    pub fn new(profiles: P, sessions: S, hasher: H, config: AuthConfig) -> Self {
        Self {
            profiles,
            sessions,
            hasher,
            config,
        }
    }

    /// Create an account through the public registration endpoint.
    ///
    /// Refused outright unless registration is enabled in config -- a
    /// deployed portfolio must not quietly grow extra admins. New accounts
    /// get the placeholder role "ADMIN" until the profile form overwrites it
    /// with a real job title.
    pub async fn register(&self, request: RegisterRequest) -> Result<Profile, AuthError> {
        if !self.config.registration_enabled {
            return Err(AuthError::RegistrationDisabled);
        }

        let name = request
            .name
            .and_then(|n| {
                let trimmed = n.trim().to_string();
                (!trimmed.is_empty()).then_some(trimmed)
            })
            .unwrap_or_else(|| "Admin".to_string());

        self.create_profile(&request.email, &request.password, name, Some("ADMIN".to_string()))
            .await
    }

    /// Create an account directly, bypassing the registration gate.
    ///
    /// This is the CLI bootstrap path (`folio account create`) for the very
    /// first login on a fresh data dir.
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Profile, AuthError> {
        let name = if name.trim().is_empty() {
            "Admin".to_string()
        } else {
            name.trim().to_string()
        };
        self.create_profile(email, password, name, None).await
    }

    async fn create_profile(
        &self,
        email: &str,
        password: &str,
        name: String,
        role: Option<String>,
    ) -> Result<Profile, AuthError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields(
                "email and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthError::WeakPassword(MIN_PASSWORD_CHARS));
        }

        let existing = self
            .profiles
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;
        if existing.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let now = Utc::now();
        let profile = Profile {
            id: ProfileId::new(),
            email,
            name,
            password_hash: self.hasher.hash_password(password)?,
            role,
            bio: None,
            country: None,
            avatar_url: None,
            cv_url: None,
            works_intro: None,
            created_at: now,
            updated_at: now,
        };

        self.profiles.insert(&profile).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::StorageError(other.to_string()),
        })
    }

    /// Verify credentials and mint a session.
    ///
    /// Unknown email and wrong password fail identically, so the endpoint
    /// cannot be used to probe which address the owner registered with.
    pub async fn login(&self, request: LoginRequest) -> Result<SessionInfo, AuthError> {
        let email = request.email.trim().to_lowercase();
        let profile = self
            .profiles
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .hasher
            .verify_password(&request.password, &profile.password_hash)?
        {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();

        // Opportunistic sweep of expired sessions; login still succeeds if
        // it fails.
        if let Err(e) = self.sessions.delete_expired(now).await {
            tracing::debug!(error = %e, "expired session sweep failed");
        }

        let token = generate_session_token();
        let session = Session {
            id: SessionId::new(),
            profile_id: profile.id.clone(),
            token_hash: hash_session_token(&token),
            created_at: now,
            expires_at: now + Duration::hours(self.config.session_ttl_hours),
            last_used_at: None,
        };
        let session = self
            .sessions
            .insert(&session)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?;

        Ok(SessionInfo {
            token,
            expires_at: session.expires_at,
            profile: profile.into(),
        })
    }

    /// Resolve a bearer token to the profile it belongs to.
    ///
    /// Expired sessions are deleted on sight. The last_used_at touch is best
    /// effort -- a failed touch never rejects a valid token.
    pub async fn authenticate(&self, token: &str) -> Result<Profile, AuthError> {
        let token_hash = hash_session_token(token);
        let session = self
            .sessions
            .find_by_token_hash(&token_hash)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidSession)?;

        let now = Utc::now();
        if session.is_expired(now) {
            if let Err(e) = self.sessions.delete_by_token_hash(&token_hash).await {
                tracing::debug!(error = %e, "failed to delete expired session");
            }
            return Err(AuthError::InvalidSession);
        }

        if let Err(e) = self.sessions.touch(&session.id, now).await {
            tracing::debug!(error = %e, "failed to touch session");
        }

        self.profiles
            .find_by_id(&session.profile_id)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidSession)
    }

    /// Drop the session for a token. Idempotent: logging out twice is fine.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.sessions
            .delete_by_token_hash(&hash_session_token(token))
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))
    }
}

/// Generate a fresh session token: `folio_` + 64 hex chars from the OS CSPRNG.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    format!(
        "{SESSION_TOKEN_PREFIX}{}",
        bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
    )
}

/// Compute SHA-256 hash of a session token (lowercase hex).
pub fn hash_session_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_have_prefix_and_length() {
        let token = generate_session_token();
        assert!(token.starts_with(SESSION_TOKEN_PREFIX));
        assert_eq!(token.len(), SESSION_TOKEN_PREFIX.len() + 64);
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_deterministic_hex() {
        let h1 = hash_session_token("folio_abc");
        let h2 = hash_session_token("folio_abc");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_different_tokens_hash_differently() {
        assert_ne!(
            hash_session_token("folio_aaa"),
            hash_session_token("folio_bbb")
        );
    }
}
