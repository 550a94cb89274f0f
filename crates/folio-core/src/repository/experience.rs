//! Experience repository trait definition.

use folio_types::error::RepositoryError;
use folio_types::experience::{Experience, ExperienceId};

/// Repository trait for the work-experience timeline.
///
/// Listings come back newest-first (start_date descending), which is the
/// only order the timeline renders in.
pub trait ExperienceRepository: Send + Sync {
    /// Create a new timeline entry. Returns the created entry.
    fn create(
        &self,
        experience: &Experience,
    ) -> impl std::future::Future<Output = Result<Experience, RepositoryError>> + Send;

    /// Get an entry by its unique ID.
    fn get_by_id(
        &self,
        id: &ExperienceId,
    ) -> impl std::future::Future<Output = Result<Option<Experience>, RepositoryError>> + Send;

    /// List all entries, start_date descending.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Experience>, RepositoryError>> + Send;

    /// Update an existing entry. Returns the updated entry.
    fn update(
        &self,
        experience: &Experience,
    ) -> impl std::future::Future<Output = Result<Experience, RepositoryError>> + Send;

    /// Permanently delete an entry by ID.
    fn delete(
        &self,
        id: &ExperienceId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
