//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/store/hasher traits, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use folio_core::cache::PublicCache;
use folio_core::service::auth::{AuthConfig, AuthService};
use folio_core::service::experience::ExperienceService;
use folio_core::service::media::MediaService;
use folio_core::service::profile::ProfileService;
use folio_core::service::project::ProjectService;
use folio_infra::config::{load_site_config, resolve_data_dir};
use folio_infra::media::AnyMediaStore;
use folio_infra::password::Argon2PasswordHasher;
use folio_infra::sqlite::experience::SqliteExperienceRepository;
use folio_infra::sqlite::pool::DatabasePool;
use folio_infra::sqlite::profile::SqliteProfileRepository;
use folio_infra::sqlite::project::SqliteProjectRepository;
use folio_infra::sqlite::session::SqliteSessionRepository;
use folio_infra::sqlite::upload::SqliteUploadRepository;
use folio_types::config::SiteConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAuthService =
    AuthService<SqliteProfileRepository, SqliteSessionRepository, Argon2PasswordHasher>;

pub type ConcreteProfileService = ProfileService<SqliteProfileRepository>;

pub type ConcreteProjectService = ProjectService<SqliteProjectRepository>;

pub type ConcreteExperienceService = ExperienceService<SqliteExperienceRepository>;

pub type ConcreteMediaService = MediaService<AnyMediaStore, SqliteUploadRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub profile_service: Arc<ConcreteProfileService>,
    pub project_service: Arc<ConcreteProjectService>,
    pub experience_service: Arc<ConcreteExperienceService>,
    pub media_service: Arc<ConcreteMediaService>,
    pub cache: PublicCache,
    pub config: SiteConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, load config, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Initialize database
        let db_url = format!("sqlite://{}?mode=rwc", data_dir.join("folio.db").display());
        let db_pool = DatabasePool::new(&db_url).await?;

        // Site configuration from {data_dir}/config.toml, defaults when absent
        let config = load_site_config(&data_dir).await;

        let auth_service = AuthService::new(
            SqliteProfileRepository::new(db_pool.clone()),
            SqliteSessionRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            AuthConfig {
                registration_enabled: config.registration_enabled,
                session_ttl_hours: config.session_ttl_hours,
            },
        );

        let profile_service = ProfileService::new(SqliteProfileRepository::new(db_pool.clone()));
        let project_service = ProjectService::new(SqliteProjectRepository::new(db_pool.clone()));
        let experience_service =
            ExperienceService::new(SqliteExperienceRepository::new(db_pool.clone()));

        // Media backend comes from config: local disk by default, remote host
        // when [media] says so.
        let media_store = AnyMediaStore::from_config(&config, &data_dir);
        let media_service = MediaService::new(
            media_store,
            SqliteUploadRepository::new(db_pool.clone()),
            config.max_upload_bytes,
        );

        Ok(Self {
            auth_service: Arc::new(auth_service),
            profile_service: Arc::new(profile_service),
            project_service: Arc::new(project_service),
            experience_service: Arc::new(experience_service),
            media_service: Arc::new(media_service),
            cache: PublicCache::new(),
            config,
            data_dir,
            db_pool,
        })
    }
}
