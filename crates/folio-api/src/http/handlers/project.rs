//! Project CRUD handlers for the REST API.

use std::time::Instant;

use axum::Json;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::Uri;

use folio_core::repository::SortOrder;
use folio_core::repository::project::ProjectFilter;
use folio_types::project::{CreateProjectRequest, ProjectStatus, UpdateProjectRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::extractors::query::ProjectListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Cache key for a public GET: request path plus query string, so
/// `?featured=true` and the unfiltered listing are cached separately.
fn cache_key(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// GET /api/v1/projects - Published projects for the public site.
///
/// Honors `category`, `featured`, `limit`, and `offset`; always newest
/// first, always published only. Cached per path+query.
pub async fn list_projects(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let key = cache_key(&uri);
    let payload = match state.cache.get(&key) {
        Some(cached) => cached,
        None => {
            let projects = state
                .project_service
                .list_public(query.category.clone(), query.featured, query.limit, query.offset)
                .await?;
            let payload = serde_json::to_value(&projects).unwrap();
            state.cache.put(key, payload.clone());
            payload
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("self", "/api/v1/projects");

    Ok(Json(resp))
}

/// GET /api/v1/projects/:id - Get a project by slug or ID, media included.
///
/// Drafts resolve too; that is how preview links work before publishing.
pub async fn get_project(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let key = cache_key(&uri);
    let payload = match state.cache.get(&key) {
        Some(cached) => cached,
        None => {
            let project = state.project_service.get_project(&id_or_slug).await?;
            let payload = serde_json::to_value(&project).unwrap();
            state.cache.put(key, payload.clone());
            payload
        }
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(payload, request_id, elapsed)
        .with_link("self", &format!("/api/v1/projects/{id_or_slug}"));

    Ok(Json(resp))
}

/// GET /api/v1/admin/projects - List projects with filtering and sorting.
///
/// The admin listing sees every status and is never cached.
pub async fn admin_list_projects(
    State(state): State<AppState>,
    _auth: Authenticated,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let status_filter = match &query.status {
        Some(s) => Some(s.parse::<ProjectStatus>().map_err(|e| AppError::Validation(e))?),
        None => None,
    };

    let sort_order = match query.order.to_lowercase().as_str() {
        "asc" => Some(SortOrder::Asc),
        _ => Some(SortOrder::Desc),
    };

    let filter = Some(ProjectFilter {
        status: status_filter,
        category_contains: query.category.clone(),
        featured: query.featured,
        sort_by: Some(query.sort.clone()),
        sort_order,
        limit: query.limit,
        offset: query.offset,
    });

    let projects = state.project_service.list_all(filter).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let projects_json: Vec<serde_json::Value> = projects
        .iter()
        .map(|p| serde_json::to_value(p).unwrap())
        .collect();

    let resp = ApiResponse::success(projects_json, request_id, elapsed)
        .with_link("self", "/api/v1/admin/projects");

    Ok(Json(resp))
}

/// POST /api/v1/projects - Create a new project.
pub async fn create_project(
    State(state): State<AppState>,
    _auth: Authenticated,
    Json(body): Json<CreateProjectRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let project = state.project_service.create_project(body).await?;
    state.cache.invalidate_all();
    let elapsed = start.elapsed().as_millis() as u64;

    let project_json = serde_json::to_value(&project).unwrap();
    let resp = ApiResponse::success(project_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/projects/{}", project.slug));

    Ok(Json(resp))
}

/// PUT /api/v1/projects/:id - Update a project by slug or ID.
pub async fn update_project(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let updated = state.project_service.update_project(&id_or_slug, body).await?;
    state.cache.invalidate_all();
    let elapsed = start.elapsed().as_millis() as u64;

    let project_json = serde_json::to_value(&updated).unwrap();
    let resp = ApiResponse::success(project_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/projects/{}", updated.slug));

    Ok(Json(resp))
}

/// DELETE /api/v1/projects/:id - Delete a project permanently.
pub async fn delete_project(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(id_or_slug): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    // Resolve first so the response can name what went away.
    let project = state.project_service.get_project(&id_or_slug).await?;
    state.project_service.delete_project(&project.slug).await?;
    state.cache.invalidate_all();
    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "slug": project.slug}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
