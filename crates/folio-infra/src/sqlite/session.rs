//! SQLite session repository implementation.
//!
//! Sessions are keyed by the SHA-256 hash of the bearer token. The plain
//! token exists only in the login response and in the client's cookie.

use folio_core::repository::session::SessionRepository;
use folio_types::auth::{Session, SessionId};
use folio_types::error::RepositoryError;
use folio_types::profile::ProfileId;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn session_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Session, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let profile_id: String = row
        .try_get("profile_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let token_hash: String = row
        .try_get("token_hash")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let expires_at: String = row
        .try_get("expires_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let last_used_at: Option<String> = row
        .try_get("last_used_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Session {
        id: id
            .parse::<SessionId>()
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?,
        profile_id: profile_id
            .parse::<ProfileId>()
            .map_err(|e| RepositoryError::Query(format!("invalid profile id: {e}")))?,
        token_hash,
        created_at: parse_datetime(&created_at)?,
        expires_at: parse_datetime(&expires_at)?,
        last_used_at: last_used_at.as_deref().map(parse_datetime).transpose()?,
    })
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl SessionRepository for SqliteSessionRepository {
    async fn insert(&self, session: &Session) -> Result<Session, RepositoryError> {
        sqlx::query(
            "INSERT INTO sessions (id, profile_id, token_hash, created_at, expires_at, last_used_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(session.id.to_string())
        .bind(session.profile_id.to_string())
        .bind(&session.token_hash)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.expires_at))
        .bind(session.last_used_at.as_ref().map(format_datetime))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(session.clone())
    }

    async fn find_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(session_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn touch(&self, id: &SessionId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE sessions SET last_used_at = ? WHERE id = ?")
            .bind(format_datetime(&at))
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<(), RepositoryError> {
        // Logging out an already-dead session is fine, so no NotFound here.
        sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(format_datetime(&now))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_for_profile(&self, profile_id: &ProfileId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE profile_id = ?")
            .bind(profile_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
