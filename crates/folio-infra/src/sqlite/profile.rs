//! SQLite profile repository implementation.
//!
//! Implements `ProfileRepository` from `folio-core` using sqlx with split
//! read/write pools. The `cv_url` column arrived in a later migration, so
//! reads tolerate its absence and `add_cv_url_column` can patch an older
//! database in place.

use folio_core::repository::profile::{ProfileColumns, ProfileRepository};
use folio_types::error::RepositoryError;
use folio_types::profile::{Profile, ProfileId};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileRepository`.
pub struct SqliteProfileRepository {
    pool: DatabasePool,
}

impl SqliteProfileRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Profile.
struct ProfileRow {
    id: String,
    email: String,
    name: String,
    password_hash: String,
    role: Option<String>,
    bio: Option<String>,
    country: Option<String>,
    avatar_url: Option<String>,
    cv_url: Option<String>,
    works_intro: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
            bio: row.try_get("bio")?,
            country: row.try_get("country")?,
            avatar_url: row.try_get("avatar_url")?,
            // cv_url was added in a later migration. Databases created before
            // it may not have the column until the update path patches it.
            cv_url: column_or_none(row, "cv_url")?,
            works_intro: row.try_get("works_intro")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_profile(self) -> Result<Profile, RepositoryError> {
        let id = self
            .id
            .parse::<ProfileId>()
            .map_err(|e| RepositoryError::Query(format!("invalid profile id: {e}")))?;

        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Profile {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            role: self.role,
            bio: self.bio,
            country: self.country,
            avatar_url: self.avatar_url,
            cv_url: self.cv_url,
            works_intro: self.works_intro,
            created_at,
            updated_at,
        })
    }
}

fn column_or_none(
    row: &sqlx::sqlite::SqliteRow,
    name: &str,
) -> Result<Option<String>, sqlx::Error> {
    match row.try_get(name) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ProfileRepository for SqliteProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<Profile, RepositoryError> {
        // Only the identity columns are written at creation time. The biography
        // fields start NULL and arrive later through profile updates, which also
        // keeps inserts working on a database that predates the cv_url column.
        let result = sqlx::query(
            "INSERT INTO profiles (id, email, name, password_hash, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(profile.id.to_string())
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.password_hash)
        .bind(&profile.role)
        .bind(format_datetime(&profile.created_at))
        .bind(format_datetime(&profile.updated_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(profile.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "email '{}' already registered",
                    profile.email
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row = ProfileRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_profile()?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM profiles WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row = ProfileRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_profile()?))
            }
            None => Ok(None),
        }
    }

    async fn first(&self) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM profiles ORDER BY created_at ASC LIMIT 1")
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row = ProfileRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_profile()?))
            }
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0)
    }

    async fn update(
        &self,
        profile: &Profile,
        columns: ProfileColumns,
    ) -> Result<Profile, RepositoryError> {
        // Each variant mentions a different column set so the statement can be
        // prepared against schemas that predate cv_url or works_intro values.
        let result = match columns {
            ProfileColumns::Full => {
                sqlx::query(
                    "UPDATE profiles SET name = ?, role = ?, bio = ?, country = ?, avatar_url = ?, cv_url = ?, works_intro = ?, updated_at = ?
                     WHERE id = ?",
                )
                .bind(&profile.name)
                .bind(&profile.role)
                .bind(&profile.bio)
                .bind(&profile.country)
                .bind(&profile.avatar_url)
                .bind(&profile.cv_url)
                .bind(&profile.works_intro)
                .bind(format_datetime(&profile.updated_at))
                .bind(profile.id.to_string())
                .execute(&self.pool.writer)
                .await
            }
            ProfileColumns::SkipWorksIntro => {
                sqlx::query(
                    "UPDATE profiles SET name = ?, role = ?, bio = ?, country = ?, avatar_url = ?, cv_url = ?, updated_at = ?
                     WHERE id = ?",
                )
                .bind(&profile.name)
                .bind(&profile.role)
                .bind(&profile.bio)
                .bind(&profile.country)
                .bind(&profile.avatar_url)
                .bind(&profile.cv_url)
                .bind(format_datetime(&profile.updated_at))
                .bind(profile.id.to_string())
                .execute(&self.pool.writer)
                .await
            }
            ProfileColumns::SkipCvAndWorksIntro => {
                sqlx::query(
                    "UPDATE profiles SET name = ?, role = ?, bio = ?, country = ?, avatar_url = ?, updated_at = ?
                     WHERE id = ?",
                )
                .bind(&profile.name)
                .bind(&profile.role)
                .bind(&profile.bio)
                .bind(&profile.country)
                .bind(&profile.avatar_url)
                .bind(format_datetime(&profile.updated_at))
                .bind(profile.id.to_string())
                .execute(&self.pool.writer)
                .await
            }
        };

        let result = result.map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(profile.clone())
    }

    async fn add_cv_url_column(&self) -> Result<(), RepositoryError> {
        let result = sqlx::query("ALTER TABLE profiles ADD COLUMN cv_url TEXT")
            .execute(&self.pool.writer)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.message().contains("duplicate column") =>
            {
                // Already patched, nothing to do.
                Ok(())
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use folio_core::service::profile::ProfileService;
    use folio_types::profile::{ProfileUpdateOutcome, UpdateProfileRequest};

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_profile(email: &str) -> Profile {
        let now = Utc::now();
        Profile {
            id: ProfileId::new(),
            email: email.to_string(),
            name: "Suman".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Some("ADMIN".to_string()),
            bio: None,
            country: None,
            avatar_url: None,
            cv_url: None,
            works_intro: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reverts the profiles table to its pre-cv_url shape, as it looked before
    /// the second migration existed.
    async fn drop_cv_url_column(pool: &DatabasePool) {
        sqlx::query("ALTER TABLE profiles DROP COLUMN cv_url")
            .execute(&pool.writer)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_and_find_by_email() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);
        let profile = make_profile("suman@example.com");

        repo.insert(&profile).await.unwrap();

        let found = repo
            .find_by_email("suman@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Suman");
        assert_eq!(found.role.as_deref(), Some("ADMIN"));
        assert!(found.bio.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);
        let profile = make_profile("id-lookup@example.com");

        repo.insert(&profile).await.unwrap();

        let found = repo.find_by_id(&profile.id).await.unwrap().unwrap();
        assert_eq!(found.email, "id-lookup@example.com");
    }

    #[tokio::test]
    async fn test_email_conflict() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);
        let first = make_profile("taken@example.com");
        let mut second = make_profile("taken@example.com");
        second.id = ProfileId::new();

        repo.insert(&first).await.unwrap();
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_count_and_first() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.first().await.unwrap().is_none());

        let profile = make_profile("only@example.com");
        repo.insert(&profile).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let first = repo.first().await.unwrap().unwrap();
        assert_eq!(first.email, "only@example.com");
    }

    #[tokio::test]
    async fn test_update_full_writes_every_column() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);
        let mut profile = make_profile("full@example.com");
        repo.insert(&profile).await.unwrap();

        profile.bio = Some("Designer and developer".to_string());
        profile.cv_url = Some("/uploads/cv.pdf".to_string());
        profile.works_intro = Some("Selected works".to_string());
        profile.updated_at = Utc::now();

        repo.update(&profile, ProfileColumns::Full).await.unwrap();

        let found = repo.find_by_id(&profile.id).await.unwrap().unwrap();
        assert_eq!(found.bio.as_deref(), Some("Designer and developer"));
        assert_eq!(found.cv_url.as_deref(), Some("/uploads/cv.pdf"));
        assert_eq!(found.works_intro.as_deref(), Some("Selected works"));
    }

    #[tokio::test]
    async fn test_update_skip_works_intro_leaves_it_untouched() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);
        let mut profile = make_profile("skip@example.com");
        repo.insert(&profile).await.unwrap();

        profile.works_intro = Some("existing intro".to_string());
        repo.update(&profile, ProfileColumns::Full).await.unwrap();

        profile.works_intro = Some("should not land".to_string());
        profile.cv_url = Some("/uploads/resume.pdf".to_string());
        repo.update(&profile, ProfileColumns::SkipWorksIntro)
            .await
            .unwrap();

        let found = repo.find_by_id(&profile.id).await.unwrap().unwrap();
        assert_eq!(found.works_intro.as_deref(), Some("existing intro"));
        assert_eq!(found.cv_url.as_deref(), Some("/uploads/resume.pdf"));
    }

    #[tokio::test]
    async fn test_update_missing_profile_is_not_found() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);
        let profile = make_profile("ghost@example.com");

        let err = repo
            .update(&profile, ProfileColumns::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_reads_survive_missing_cv_url_column() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool.clone());
        let profile = make_profile("legacy@example.com");
        repo.insert(&profile).await.unwrap();

        drop_cv_url_column(&pool).await;

        let found = repo.find_by_email("legacy@example.com").await.unwrap();
        assert!(found.is_some());
        assert!(found.unwrap().cv_url.is_none());
    }

    #[tokio::test]
    async fn test_full_update_fails_until_column_is_patched() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool.clone());
        let mut profile = make_profile("patch@example.com");
        repo.insert(&profile).await.unwrap();

        drop_cv_url_column(&pool).await;

        profile.cv_url = Some("/uploads/cv.pdf".to_string());
        let err = repo
            .update(&profile, ProfileColumns::Full)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));

        repo.add_cv_url_column().await.unwrap();
        repo.update(&profile, ProfileColumns::Full).await.unwrap();

        let found = repo.find_by_id(&profile.id).await.unwrap().unwrap();
        assert_eq!(found.cv_url.as_deref(), Some("/uploads/cv.pdf"));
    }

    #[tokio::test]
    async fn test_add_cv_url_column_is_idempotent() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool);

        // Column already exists from migrations; duplicate counts as success.
        repo.add_cv_url_column().await.unwrap();
        repo.add_cv_url_column().await.unwrap();
    }

    #[tokio::test]
    async fn update_through_service_heals_missing_column() {
        let pool = test_pool().await;
        let repo = SqliteProfileRepository::new(pool.clone());
        let profile = make_profile("heal@example.com");
        repo.insert(&profile).await.unwrap();

        drop_cv_url_column(&pool).await;

        let service = ProfileService::new(SqliteProfileRepository::new(pool));
        let request = UpdateProfileRequest {
            cv_url: Some("/uploads/cv.pdf".to_string()),
            works_intro: Some("will be skipped on the retry".to_string()),
            ..Default::default()
        };

        let outcome = service.update_profile(&profile.id, request).await.unwrap();
        assert!(matches!(
            outcome,
            ProfileUpdateOutcome::UpdatedAfterSchemaPatch(_)
        ));
        assert_eq!(
            outcome.message(),
            Some("Profile updated after database patch.")
        );
        assert_eq!(
            outcome.profile().cv_url.as_deref(),
            Some("/uploads/cv.pdf")
        );
    }
}
