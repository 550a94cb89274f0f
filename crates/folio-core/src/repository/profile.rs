//! Profile repository trait definition.

use folio_types::error::RepositoryError;
use folio_types::profile::{Profile, ProfileId};

/// Which optional columns a profile UPDATE statement mentions.
///
/// A database that predates the cv_url migration rejects any statement that
/// names the column, so the update fallback chain narrows the column set on
/// each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileColumns {
    /// Every mutable profile column.
    Full,
    /// Everything except works_intro (the retry after patching in cv_url).
    SkipWorksIntro,
    /// Everything except cv_url and works_intro (stale-schema fallback).
    SkipCvAndWorksIntro,
}

/// Repository trait for profile persistence.
///
/// Implementations live in folio-infra (e.g., SqliteProfileRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ProfileRepository: Send + Sync {
    /// Insert a new profile. Returns the created profile.
    fn insert(
        &self,
        profile: &Profile,
    ) -> impl std::future::Future<Output = Result<Profile, RepositoryError>> + Send;

    /// Get a profile by its unique ID.
    fn find_by_id(
        &self,
        id: &ProfileId,
    ) -> impl std::future::Future<Output = Result<Option<Profile>, RepositoryError>> + Send;

    /// Get a profile by its unique email (login identity).
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Profile>, RepositoryError>> + Send;

    /// Get the site profile. Single-user deployment: the first row wins.
    fn first(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Profile>, RepositoryError>> + Send;

    /// Number of profiles (0 or 1 outside of tests).
    fn count(&self)
    -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Write a profile's mutable fields, mentioning only the given column
    /// set. Returns the row as stored afterwards.
    fn update(
        &self,
        profile: &Profile,
        columns: ProfileColumns,
    ) -> impl std::future::Future<Output = Result<Profile, RepositoryError>> + Send;

    /// Add the cv_url column to a database that missed its migration.
    /// A duplicate-column error counts as success.
    fn add_cv_url_column(
        &self,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
