//! SQLite project repository implementation.
//!
//! Implements `ProjectRepository` from `folio-core` using sqlx with split
//! read/write pools. Projects and their media galleries are written in one
//! transaction so a half-saved gallery can never be observed.

use std::collections::HashMap;

use folio_core::repository::project::{ProjectFilter, ProjectRepository};
use folio_core::repository::SortOrder;
use folio_types::error::RepositoryError;
use folio_types::project::{
    MediaId, MediaInput, MediaItem, MediaKind, Project, ProjectId, ProjectStatus,
};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProjectRepository`.
pub struct SqliteProjectRepository {
    pool: DatabasePool,
}

impl SqliteProjectRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Load the media galleries for a batch of projects in one query.
    async fn attach_media(&self, projects: &mut [Project]) -> Result<(), RepositoryError> {
        if projects.is_empty() {
            return Ok(());
        }

        // Project ids are UUIDs, safe to splice into the IN list.
        let ids = projects
            .iter()
            .map(|p| format!("'{}'", p.id))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT * FROM project_media WHERE project_id IN ({ids}) ORDER BY position ASC, created_at ASC"
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut by_project: HashMap<String, Vec<MediaItem>> = HashMap::new();
        for row in &rows {
            let item = media_from_row(row)?;
            by_project
                .entry(item.project_id.to_string())
                .or_default()
                .push(item);
        }

        for project in projects.iter_mut() {
            project.media = by_project
                .remove(&project.id.to_string())
                .unwrap_or_default();
        }

        Ok(())
    }
}

/// Internal row type for mapping SQLite rows to domain Project.
struct ProjectRow {
    id: String,
    slug: String,
    title: String,
    category: Option<String>,
    thumbnail_url: Option<String>,
    summary: Option<String>,
    body_html: Option<String>,
    client: Option<String>,
    role: Option<String>,
    year: Option<String>,
    technologies: Option<String>,
    link: Option<String>,
    status: String,
    featured: bool,
    created_at: String,
    updated_at: String,
}

impl ProjectRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            category: row.try_get("category")?,
            thumbnail_url: row.try_get("thumbnail_url")?,
            summary: row.try_get("summary")?,
            body_html: row.try_get("body_html")?,
            client: row.try_get("client")?,
            role: row.try_get("role")?,
            year: row.try_get("year")?,
            technologies: row.try_get("technologies")?,
            link: row.try_get("link")?,
            status: row.try_get("status")?,
            featured: row.try_get("featured")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_project(self) -> Result<Project, RepositoryError> {
        let id = self
            .id
            .parse::<ProjectId>()
            .map_err(|e| RepositoryError::Query(format!("invalid project id: {e}")))?;

        let status: ProjectStatus = self
            .status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Project {
            id,
            slug: self.slug,
            title: self.title,
            category: self.category,
            thumbnail_url: self.thumbnail_url,
            summary: self.summary,
            body_html: self.body_html,
            client: self.client,
            role: self.role,
            year: self.year,
            technologies: self.technologies,
            link: self.link,
            status,
            featured: self.featured,
            created_at,
            updated_at,
            media: Vec::new(),
        })
    }
}

fn media_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<MediaItem, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let project_id: String = row
        .try_get("project_id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let url: String = row
        .try_get("url")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let kind: String = row
        .try_get("kind")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let position: i32 = row
        .try_get("position")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(MediaItem {
        id: id
            .parse::<MediaId>()
            .map_err(|e| RepositoryError::Query(format!("invalid media id: {e}")))?,
        project_id: project_id
            .parse::<ProjectId>()
            .map_err(|e| RepositoryError::Query(format!("invalid project id: {e}")))?,
        url,
        kind: kind
            .parse::<MediaKind>()
            .map_err(|e: String| RepositoryError::Query(e))?,
        position,
        created_at: parse_datetime(&created_at)?,
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

impl ProjectRepository for SqliteProjectRepository {
    async fn create(&self, project: &Project) -> Result<Project, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO projects (id, slug, title, category, thumbnail_url, summary, body_html, client, role, year, technologies, link, status, featured, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(project.id.to_string())
        .bind(&project.slug)
        .bind(&project.title)
        .bind(&project.category)
        .bind(&project.thumbnail_url)
        .bind(&project.summary)
        .bind(&project.body_html)
        .bind(&project.client)
        .bind(&project.role)
        .bind(&project.year)
        .bind(&project.technologies)
        .bind(&project.link)
        .bind(project.status.to_string())
        .bind(project.featured)
        .bind(format_datetime(&project.created_at))
        .bind(format_datetime(&project.updated_at))
        .execute(&mut *tx)
        .await;

        if let Err(e) = result {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return Err(RepositoryError::Conflict(format!(
                        "slug '{}' already exists",
                        project.slug
                    )));
                }
            }
            return Err(RepositoryError::Query(e.to_string()));
        }

        for item in &project.media {
            sqlx::query(
                "INSERT INTO project_media (id, project_id, url, kind, position, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(item.id.to_string())
            .bind(item.project_id.to_string())
            .bind(&item.url)
            .bind(item.kind.to_string())
            .bind(item.position)
            .bind(format_datetime(&item.created_at))
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(project.clone())
    }

    async fn get_by_id(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let project_row = ProjectRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let mut projects = vec![project_row.into_project()?];
                self.attach_media(&mut projects).await?;
                Ok(projects.pop())
            }
            None => Ok(None),
        }
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM projects WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let project_row = ProjectRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let mut projects = vec![project_row.into_project()?];
                self.attach_media(&mut projects).await?;
                Ok(projects.pop())
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: Option<ProjectFilter>) -> Result<Vec<Project>, RepositoryError> {
        let mut sql = String::from("SELECT * FROM projects");
        let mut conditions: Vec<String> = Vec::new();

        let filter = filter.unwrap_or_default();

        if let Some(ref status) = filter.status {
            conditions.push(format!("status = '{}'", status));
        }
        // The category filter is arbitrary user text, so it goes through a
        // bind instead of string interpolation.
        let category_pattern = filter
            .category_contains
            .as_ref()
            .map(|c| format!("%{}%", c.to_lowercase()));
        if category_pattern.is_some() {
            conditions.push("LOWER(category) LIKE ?".to_string());
        }
        if let Some(featured) = filter.featured {
            conditions.push(format!("featured = {}", if featured { 1 } else { 0 }));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        // Sort
        let sort_field = filter.sort_by.as_deref().unwrap_or("created_at");
        // Whitelist allowed sort fields to prevent SQL injection
        let safe_sort = match sort_field {
            "title" | "slug" | "category" | "status" | "year" | "created_at" | "updated_at" => {
                sort_field
            }
            _ => "created_at",
        };
        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY {safe_sort} {order}"));

        // Pagination
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = filter.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let mut query = sqlx::query(&sql);
        if let Some(ref pattern) = category_pattern {
            query = query.bind(pattern);
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut projects = Vec::with_capacity(rows.len());
        for row in &rows {
            let project_row =
                ProjectRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            projects.push(project_row.into_project()?);
        }

        self.attach_media(&mut projects).await?;

        Ok(projects)
    }

    async fn update(
        &self,
        project: &Project,
        media: Option<&[MediaInput]>,
    ) -> Result<Project, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE projects SET slug = ?, title = ?, category = ?, thumbnail_url = ?, summary = ?, body_html = ?, client = ?, role = ?, year = ?, technologies = ?, link = ?, status = ?, featured = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&project.slug)
        .bind(&project.title)
        .bind(&project.category)
        .bind(&project.thumbnail_url)
        .bind(&project.summary)
        .bind(&project.body_html)
        .bind(&project.client)
        .bind(&project.role)
        .bind(&project.year)
        .bind(&project.technologies)
        .bind(&project.link)
        .bind(project.status.to_string())
        .bind(project.featured)
        .bind(format_datetime(&project.updated_at))
        .bind(project.id.to_string())
        .execute(&mut *tx)
        .await;

        let result = match result {
            Ok(r) => r,
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                return Err(RepositoryError::Conflict(format!(
                    "slug '{}' already exists",
                    project.slug
                )));
            }
            Err(e) => return Err(RepositoryError::Query(e.to_string())),
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        // A present media list replaces the whole gallery.
        let mut updated = project.clone();
        if let Some(inputs) = media {
            sqlx::query("DELETE FROM project_media WHERE project_id = ?")
                .bind(project.id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            let now = Utc::now();
            let mut items = Vec::with_capacity(inputs.len());
            for (position, input) in inputs.iter().enumerate() {
                let item = MediaItem {
                    id: MediaId::new(),
                    project_id: project.id.clone(),
                    url: input.url.clone(),
                    kind: input.kind,
                    position: position as i32,
                    created_at: now,
                };
                sqlx::query(
                    "INSERT INTO project_media (id, project_id, url, kind, position, created_at)
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(item.id.to_string())
                .bind(item.project_id.to_string())
                .bind(&item.url)
                .bind(item.kind.to_string())
                .bind(item.position)
                .bind(format_datetime(&item.created_at))
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
                items.push(item);
            }
            updated.media = items;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(updated)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn count(&self, status: Option<ProjectStatus>) -> Result<i64, RepositoryError> {
        let row: (i64,) = match status {
            Some(status) => {
                sqlx::query_as("SELECT COUNT(*) FROM projects WHERE status = ?")
                    .bind(status.to_string())
                    .fetch_one(&self.pool.reader)
                    .await
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM projects")
                    .fetch_one(&self.pool.reader)
                    .await
            }
        }
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0)
    }

    async fn count_featured(&self) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects WHERE featured = 1")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0)
    }
}
