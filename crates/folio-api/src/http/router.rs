//! Axum router configuration with middleware.
//!
//! All API routes are under `/api/v1/`.
//! Middleware: CORS, tracing, gzip compression, raised body limit for uploads.
//!
//! Uploaded files are served from `{data_dir}/uploads` under `/uploads/`.
//! In production, the built SPA is served from `web/dist/` (configurable
//! via `FOLIO_WEB_DIR`). API routes take priority; unknown paths fall
//! through to the SPA's `index.html` for client-side routing. If the
//! directory does not exist, only the API is served.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Multipart framing needs headroom above the configured file cap; the
    // service still enforces the cap itself and answers 413.
    let body_limit = (state.config.max_upload_bytes as usize).saturating_add(64 * 1024);

    // Created by the local media store on first upload; missing is a 404.
    let uploads_dir = state.data_dir.join("uploads");

    let api_routes = Router::new()
        // Profile
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        // Projects
        .route("/projects", get(handlers::project::list_projects))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{id}", get(handlers::project::get_project))
        .route("/projects/{id}", put(handlers::project::update_project))
        .route("/projects/{id}", delete(handlers::project::delete_project))
        .route("/admin/projects", get(handlers::project::admin_list_projects))
        // Experiences
        .route("/experiences", get(handlers::experience::list_experiences))
        .route("/experiences", post(handlers::experience::create_experience))
        .route("/experiences/{id}", put(handlers::experience::update_experience))
        .route(
            "/experiences/{id}",
            delete(handlers::experience::delete_experience),
        )
        // Auth
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/session", get(handlers::auth::session))
        .route("/auth/logout", post(handlers::auth::logout))
        // Uploads
        .route("/upload", post(handlers::upload::upload))
        .route("/uploads", get(handlers::upload::list_uploads))
        .route("/uploads/{id}", delete(handlers::upload::delete_upload))
        // Dashboard stats
        .route("/stats", get(handlers::stats::get_stats));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .nest_service("/uploads", ServeDir::new(&uploads_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state);

    // Serve the built SPA from disk if the directory exists.
    // API routes, /health, and /uploads take priority; unknown paths fall
    // through to index.html for client-side routing.
    let web_dir = std::env::var("FOLIO_WEB_DIR").unwrap_or_else(|_| "web/dist".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{}/index.html", web_dir);
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "SPA static file serving enabled");
    }

    router
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
