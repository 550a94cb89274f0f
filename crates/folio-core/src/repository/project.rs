//! Project repository trait definition.

use folio_types::error::RepositoryError;
use folio_types::project::{MediaInput, Project, ProjectId, ProjectStatus};

use super::SortOrder;

/// Filter criteria for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Filter by publication status.
    pub status: Option<ProjectStatus>,
    /// Keep projects whose category contains this string (case-insensitive).
    pub category_contains: Option<String>,
    /// Filter by the featured flag.
    pub featured: Option<bool>,
    /// Field to sort by (e.g., "created_at", "title", "year").
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for project persistence.
///
/// Every returned project carries its media gallery, ordered by position.
pub trait ProjectRepository: Send + Sync {
    /// Create a project together with its media rows in one transaction.
    fn create(
        &self,
        project: &Project,
    ) -> impl std::future::Future<Output = Result<Project, RepositoryError>> + Send;

    /// Get a project by its unique ID.
    fn get_by_id(
        &self,
        id: &ProjectId,
    ) -> impl std::future::Future<Output = Result<Option<Project>, RepositoryError>> + Send;

    /// Get a project by its unique slug.
    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Project>, RepositoryError>> + Send;

    /// List projects with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<ProjectFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Project>, RepositoryError>> + Send;

    /// Update a project's scalar fields. When `media` is Some, the whole
    /// gallery is replaced in the same transaction; None leaves it alone.
    fn update(
        &self,
        project: &Project,
        media: Option<&[MediaInput]>,
    ) -> impl std::future::Future<Output = Result<Project, RepositoryError>> + Send;

    /// Permanently delete a project. Media rows cascade.
    fn delete(
        &self,
        id: &ProjectId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Count projects, optionally restricted to one status.
    fn count(
        &self,
        status: Option<ProjectStatus>,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;

    /// Count featured projects.
    fn count_featured(
        &self,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
