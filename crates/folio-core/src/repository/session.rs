//! Session repository trait definition.

use chrono::{DateTime, Utc};
use folio_types::auth::{Session, SessionId};
use folio_types::error::RepositoryError;
use folio_types::profile::ProfileId;

/// Repository trait for login sessions.
///
/// Sessions are looked up by the SHA-256 hash of the bearer token; the token
/// itself never reaches storage.
pub trait SessionRepository: Send + Sync {
    /// Persist a freshly minted session.
    fn insert(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<Session, RepositoryError>> + Send;

    /// Look up a session by token hash.
    fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Record that a session was just used.
    fn touch(
        &self,
        id: &SessionId,
        at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a session by token hash (logout). Deleting a session that is
    /// already gone is not an error.
    fn delete_by_token_hash(
        &self,
        token_hash: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete every session that expired at or before `now`. Returns how
    /// many rows went away.
    fn delete_expired(
        &self,
        now: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete every session belonging to a profile.
    fn delete_for_profile(
        &self,
        profile_id: &ProfileId,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
