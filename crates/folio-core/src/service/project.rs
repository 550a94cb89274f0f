//! Project management service.
//!
//! Creating a project from just a title produces a draft with a unique slug.
//! Public listings only ever see published projects; direct lookups by slug
//! or ID return drafts too, which is how preview links work.

use chrono::Utc;
use serde::Serialize;

use folio_types::error::{ProjectError, RepositoryError};
use folio_types::project::{
    CreateProjectRequest, MediaId, MediaItem, Project, ProjectId, ProjectStatus,
    UpdateProjectRequest, slugify,
};

use crate::repository::SortOrder;
use crate::repository::project::{ProjectFilter, ProjectRepository};

/// Dashboard numbers plus the latest handful of projects.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    pub total: i64,
    pub published: i64,
    pub draft: i64,
    pub featured: i64,
    pub recent: Vec<Project>,
}

/// Service orchestrating the project lifecycle.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new project.
    ///
    /// The slug comes from the request when given, otherwise from the title;
    /// either way it is normalized and made unique by suffix probing.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<Project, ProjectError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(ProjectError::InvalidTitle("title cannot be empty".to_string()));
        }

        let base_slug = request
            .slug
            .as_deref()
            .map(slugify)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&title));
        if base_slug.is_empty() {
            return Err(ProjectError::InvalidTitle(
                "title must contain at least one alphanumeric character".to_string(),
            ));
        }
        let slug = self.ensure_unique_slug(&base_slug).await?;

        let now = Utc::now();
        let mut project = Project {
            id: ProjectId::new(),
            slug,
            title,
            category: request.category,
            thumbnail_url: request.thumbnail_url,
            summary: request.summary,
            body_html: request.body_html,
            client: request.client,
            role: request.role,
            year: request.year,
            technologies: request.technologies,
            link: request.link,
            status: request.status.unwrap_or_default(),
            featured: false,
            created_at: now,
            updated_at: now,
            media: Vec::new(),
        };

        // Gallery positions follow submission order.
        if let Some(inputs) = request.media {
            project.media = inputs
                .into_iter()
                .enumerate()
                .map(|(i, input)| MediaItem {
                    id: MediaId::new(),
                    project_id: project.id.clone(),
                    url: input.url,
                    kind: input.kind,
                    position: i as i32,
                    created_at: now,
                })
                .collect();
        }

        self.repo.create(&project).await.map_err(map_repo_err)
    }

    /// Resolve a project by slug or, failing that, by UUID.
    pub async fn get_project(&self, selector: &str) -> Result<Project, ProjectError> {
        if let Some(project) = self
            .repo
            .get_by_slug(selector)
            .await
            .map_err(|e| ProjectError::StorageError(e.to_string()))?
        {
            return Ok(project);
        }

        if let Ok(id) = selector.parse::<ProjectId>() {
            if let Some(project) = self
                .repo
                .get_by_id(&id)
                .await
                .map_err(|e| ProjectError::StorageError(e.to_string()))?
            {
                return Ok(project);
            }
        }

        Err(ProjectError::NotFound)
    }

    /// Published projects for the public site, newest first.
    pub async fn list_public(
        &self,
        category_contains: Option<String>,
        featured: Option<bool>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Project>, ProjectError> {
        let filter = ProjectFilter {
            status: Some(ProjectStatus::Published),
            category_contains,
            featured,
            sort_by: Some("created_at".to_string()),
            sort_order: Some(SortOrder::Desc),
            limit,
            offset,
        };
        self.repo
            .list(Some(filter))
            .await
            .map_err(|e| ProjectError::StorageError(e.to_string()))
    }

    /// Admin listing: any status, caller-controlled filter.
    pub async fn list_all(
        &self,
        filter: Option<ProjectFilter>,
    ) -> Result<Vec<Project>, ProjectError> {
        self.repo
            .list(filter)
            .await
            .map_err(|e| ProjectError::StorageError(e.to_string()))
    }

    /// Update a project's mutable fields; a provided media list replaces the
    /// whole gallery in the same transaction.
    pub async fn update_project(
        &self,
        selector: &str,
        request: UpdateProjectRequest,
    ) -> Result<Project, ProjectError> {
        let mut project = self.get_project(selector).await?;

        if let Some(title) = request.title {
            let trimmed = title.trim().to_string();
            if trimmed.is_empty() {
                return Err(ProjectError::InvalidTitle("title cannot be empty".to_string()));
            }
            project.title = trimmed;
        }
        if let Some(slug) = request.slug {
            let normalized = slugify(&slug);
            if !normalized.is_empty() && normalized != project.slug {
                project.slug = normalized;
            }
        }
        if let Some(category) = request.category {
            project.category = non_empty(category);
        }
        if let Some(thumbnail_url) = request.thumbnail_url {
            project.thumbnail_url = non_empty(thumbnail_url);
        }
        if let Some(summary) = request.summary {
            project.summary = non_empty(summary);
        }
        if let Some(body_html) = request.body_html {
            project.body_html = non_empty(body_html);
        }
        if let Some(client) = request.client {
            project.client = non_empty(client);
        }
        if let Some(role) = request.role {
            project.role = non_empty(role);
        }
        if let Some(year) = request.year {
            project.year = non_empty(year);
        }
        if let Some(technologies) = request.technologies {
            project.technologies = non_empty(technologies);
        }
        if let Some(link) = request.link {
            project.link = non_empty(link);
        }
        if let Some(status) = request.status {
            project.status = status;
        }
        if let Some(featured) = request.featured {
            project.featured = featured;
        }
        project.updated_at = Utc::now();

        self.repo
            .update(&project, request.media.as_deref())
            .await
            .map_err(map_repo_err)
    }

    /// Delete a project. Media rows cascade away with it.
    pub async fn delete_project(&self, selector: &str) -> Result<(), ProjectError> {
        let project = self.get_project(selector).await?;
        self.repo
            .delete(&project.id)
            .await
            .map_err(|e| ProjectError::StorageError(e.to_string()))
    }

    /// Dashboard stats: status counts and the five most recent projects.
    pub async fn stats(&self) -> Result<ProjectStats, ProjectError> {
        let total = self.repo.count(None).await.map_err(storage)?;
        let published = self
            .repo
            .count(Some(ProjectStatus::Published))
            .await
            .map_err(storage)?;
        let draft = self
            .repo
            .count(Some(ProjectStatus::Draft))
            .await
            .map_err(storage)?;
        let featured = self.repo.count_featured().await.map_err(storage)?;
        let recent = self
            .repo
            .list(Some(ProjectFilter {
                sort_by: Some("created_at".to_string()),
                sort_order: Some(SortOrder::Desc),
                limit: Some(5),
                ..Default::default()
            }))
            .await
            .map_err(storage)?;

        Ok(ProjectStats {
            total,
            published,
            draft,
            featured,
            recent,
        })
    }

    /// Ensure a slug is unique by appending -2, -3, etc. if needed.
    async fn ensure_unique_slug(&self, base_slug: &str) -> Result<String, ProjectError> {
        let mut slug = base_slug.to_string();
        let mut counter = 2;

        loop {
            let existing = self
                .repo
                .get_by_slug(&slug)
                .await
                .map_err(|e| ProjectError::StorageError(e.to_string()))?;

            if existing.is_none() {
                return Ok(slug);
            }

            slug = format!("{base_slug}-{counter}");
            counter += 1;

            // Safety valve: prevent infinite loops
            if counter > 100 {
                return Err(ProjectError::SlugConflict(format!(
                    "could not generate unique slug from '{base_slug}'"
                )));
            }
        }
    }
}

fn storage(e: RepositoryError) -> ProjectError {
    ProjectError::StorageError(e.to_string())
}

fn map_repo_err(e: RepositoryError) -> ProjectError {
    match e {
        RepositoryError::Conflict(msg) => ProjectError::SlugConflict(msg),
        RepositoryError::NotFound => ProjectError::NotFound,
        other => ProjectError::StorageError(other.to_string()),
    }
}

/// Empty or whitespace form values clear the field.
fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_minimal() {
        let req: CreateProjectRequest =
            serde_json::from_str(r#"{"title": "Brand Refresh"}"#).unwrap();
        assert_eq!(req.title, "Brand Refresh");
        assert!(req.slug.is_none());
        assert!(req.status.is_none());
    }

    #[test]
    fn test_non_empty_clears_blank_values() {
        assert_eq!(non_empty("".to_string()), None);
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" 2024 ".to_string()), Some("2024".to_string()));
    }

    #[test]
    fn test_stats_serialize() {
        let stats = ProjectStats {
            total: 3,
            published: 2,
            draft: 1,
            featured: 1,
            recent: Vec::new(),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"total\":3"));
        assert!(json.contains("\"draft\":1"));
    }
}
