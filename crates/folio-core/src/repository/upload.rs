//! Upload repository trait definition.

use folio_types::error::RepositoryError;
use folio_types::upload::{Upload, UploadId};

/// Repository trait for upload records.
pub trait UploadRepository: Send + Sync {
    /// Record a stored file.
    fn insert(
        &self,
        upload: &Upload,
    ) -> impl std::future::Future<Output = Result<Upload, RepositoryError>> + Send;

    /// Get an upload record by ID.
    fn get_by_id(
        &self,
        id: &UploadId,
    ) -> impl std::future::Future<Output = Result<Option<Upload>, RepositoryError>> + Send;

    /// List all uploads, newest first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Upload>, RepositoryError>> + Send;

    /// Delete an upload record by ID.
    fn delete(
        &self,
        id: &UploadId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
