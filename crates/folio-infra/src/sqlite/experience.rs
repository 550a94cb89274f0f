//! SQLite experience repository implementation.
//!
//! Implements `ExperienceRepository` from `folio-core`. Dates are stored as
//! ISO `YYYY-MM-DD` text, which sorts correctly as a plain string.

use folio_core::repository::experience::ExperienceRepository;
use folio_types::error::RepositoryError;
use folio_types::experience::{Experience, ExperienceId};
use folio_types::profile::ProfileId;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ExperienceRepository`.
pub struct SqliteExperienceRepository {
    pool: DatabasePool,
}

impl SqliteExperienceRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Experience.
struct ExperienceRow {
    id: String,
    profile_id: String,
    company: String,
    role: String,
    start_date: String,
    end_date: Option<String>,
    is_current: bool,
    description: Option<String>,
    location: Option<String>,
    kind: Option<String>,
    logo_url: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ExperienceRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            profile_id: row.try_get("profile_id")?,
            company: row.try_get("company")?,
            role: row.try_get("role")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            is_current: row.try_get("is_current")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            kind: row.try_get("kind")?,
            logo_url: row.try_get("logo_url")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_experience(self) -> Result<Experience, RepositoryError> {
        let id = self
            .id
            .parse::<ExperienceId>()
            .map_err(|e| RepositoryError::Query(format!("invalid experience id: {e}")))?;
        let profile_id = self
            .profile_id
            .parse::<ProfileId>()
            .map_err(|e| RepositoryError::Query(format!("invalid profile id: {e}")))?;

        let start_date = parse_date(&self.start_date)?;
        let end_date = self.end_date.as_deref().map(parse_date).transpose()?;
        let created_at = parse_datetime(&self.created_at)?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(Experience {
            id,
            profile_id,
            company: self.company,
            role: self.role,
            start_date,
            end_date,
            is_current: self.is_current,
            description: self.description,
            location: self.location,
            kind: self.kind,
            logo_url: self.logo_url,
            created_at,
            updated_at,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    s.parse::<NaiveDate>()
        .map_err(|e| RepositoryError::Query(format!("invalid date: {e}")))
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ExperienceRepository for SqliteExperienceRepository {
    async fn create(&self, experience: &Experience) -> Result<Experience, RepositoryError> {
        sqlx::query(
            "INSERT INTO experiences (id, profile_id, company, role, start_date, end_date, is_current, description, location, kind, logo_url, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(experience.id.to_string())
        .bind(experience.profile_id.to_string())
        .bind(&experience.company)
        .bind(&experience.role)
        .bind(format_date(&experience.start_date))
        .bind(experience.end_date.as_ref().map(format_date))
        .bind(experience.is_current)
        .bind(&experience.description)
        .bind(&experience.location)
        .bind(&experience.kind)
        .bind(&experience.logo_url)
        .bind(format_datetime(&experience.created_at))
        .bind(format_datetime(&experience.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(experience.clone())
    }

    async fn get_by_id(&self, id: &ExperienceId) -> Result<Option<Experience>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM experiences WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let experience_row = ExperienceRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(experience_row.into_experience()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Experience>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM experiences ORDER BY start_date DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut experiences = Vec::with_capacity(rows.len());
        for row in &rows {
            let experience_row =
                ExperienceRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            experiences.push(experience_row.into_experience()?);
        }

        Ok(experiences)
    }

    async fn update(&self, experience: &Experience) -> Result<Experience, RepositoryError> {
        let result = sqlx::query(
            "UPDATE experiences SET company = ?, role = ?, start_date = ?, end_date = ?, is_current = ?, description = ?, location = ?, kind = ?, logo_url = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&experience.company)
        .bind(&experience.role)
        .bind(format_date(&experience.start_date))
        .bind(experience.end_date.as_ref().map(format_date))
        .bind(experience.is_current)
        .bind(&experience.description)
        .bind(&experience.location)
        .bind(&experience.kind)
        .bind(&experience.logo_url)
        .bind(format_datetime(&experience.updated_at))
        .bind(experience.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(experience.clone())
    }

    async fn delete(&self, id: &ExperienceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use crate::sqlite::profile::SqliteProfileRepository;
    use folio_core::repository::profile::ProfileRepository;
    use folio_types::profile::Profile;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_profile(pool: &DatabasePool) -> ProfileId {
        let now = Utc::now();
        let profile = Profile {
            id: ProfileId::new(),
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: None,
            bio: None,
            country: None,
            avatar_url: None,
            cv_url: None,
            works_intro: None,
            created_at: now,
            updated_at: now,
        };
        SqliteProfileRepository::new(pool.clone())
            .insert(&profile)
            .await
            .unwrap();
        profile.id
    }

    fn make_experience(profile_id: &ProfileId, company: &str, start: NaiveDate) -> Experience {
        let now = Utc::now();
        Experience {
            id: ExperienceId::new(),
            profile_id: profile_id.clone(),
            company: company.to_string(),
            role: "Design Engineer".to_string(),
            start_date: start,
            end_date: None,
            is_current: true,
            description: None,
            location: Some("Remote".to_string()),
            kind: Some("Full-time".to_string()),
            logo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_by_id() {
        let pool = test_pool().await;
        let profile_id = seed_profile(&pool).await;
        let repo = SqliteExperienceRepository::new(pool);

        let exp = make_experience(
            &profile_id,
            "Studio North",
            NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        );
        repo.create(&exp).await.unwrap();

        let found = repo.get_by_id(&exp.id).await.unwrap().unwrap();
        assert_eq!(found.company, "Studio North");
        assert_eq!(found.start_date, exp.start_date);
        assert!(found.is_current);
        assert!(found.end_date.is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = test_pool().await;
        let profile_id = seed_profile(&pool).await;
        let repo = SqliteExperienceRepository::new(pool);

        let older = make_experience(
            &profile_id,
            "First Job",
            NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
        );
        let newer = make_experience(
            &profile_id,
            "Current Job",
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        );

        repo.create(&older).await.unwrap();
        repo.create(&newer).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].company, "Current Job");
        assert_eq!(all[1].company, "First Job");
    }

    #[tokio::test]
    async fn test_update() {
        let pool = test_pool().await;
        let profile_id = seed_profile(&pool).await;
        let repo = SqliteExperienceRepository::new(pool);

        let mut exp = make_experience(
            &profile_id,
            "Changing",
            NaiveDate::from_ymd_opt(2021, 9, 1).unwrap(),
        );
        repo.create(&exp).await.unwrap();

        exp.is_current = false;
        exp.end_date = NaiveDate::from_ymd_opt(2023, 2, 28);
        exp.updated_at = Utc::now();
        repo.update(&exp).await.unwrap();

        let found = repo.get_by_id(&exp.id).await.unwrap().unwrap();
        assert!(!found.is_current);
        assert_eq!(found.end_date, NaiveDate::from_ymd_opt(2023, 2, 28));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let profile_id = seed_profile(&pool).await;
        let repo = SqliteExperienceRepository::new(pool);

        let exp = make_experience(
            &profile_id,
            "Gone",
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        repo.create(&exp).await.unwrap();
        repo.delete(&exp.id).await.unwrap();

        assert!(repo.get_by_id(&exp.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteExperienceRepository::new(pool);

        let err = repo.delete(&ExperienceId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_experiences_cascade_with_profile() {
        let pool = test_pool().await;
        let profile_id = seed_profile(&pool).await;
        let repo = SqliteExperienceRepository::new(pool.clone());

        let exp = make_experience(
            &profile_id,
            "Tied",
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        );
        repo.create(&exp).await.unwrap();

        sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(profile_id.to_string())
            .execute(&pool.writer)
            .await
            .unwrap();

        assert!(repo.list().await.unwrap().is_empty());
    }
}
