//! SQLite upload repository implementation.

use folio_core::repository::upload::UploadRepository;
use folio_types::error::RepositoryError;
use folio_types::upload::{Upload, UploadId};
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UploadRepository`.
pub struct SqliteUploadRepository {
    pool: DatabasePool,
}

impl SqliteUploadRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn upload_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Upload, RepositoryError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let filename: String = row
        .try_get("filename")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let original_name: String = row
        .try_get("original_name")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let mime_type: String = row
        .try_get("mime_type")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let size_bytes: i64 = row
        .try_get("size_bytes")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let url: String = row
        .try_get("url")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Upload {
        id: id
            .parse::<UploadId>()
            .map_err(|e| RepositoryError::Query(format!("invalid upload id: {e}")))?,
        filename,
        original_name,
        mime_type,
        size_bytes: size_bytes as u64,
        url,
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

impl UploadRepository for SqliteUploadRepository {
    async fn insert(&self, upload: &Upload) -> Result<Upload, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO uploads (id, filename, original_name, mime_type, size_bytes, url, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(upload.id.to_string())
        .bind(&upload.filename)
        .bind(&upload.original_name)
        .bind(&upload.mime_type)
        .bind(upload.size_bytes as i64)
        .bind(&upload.url)
        .bind(format_datetime(&upload.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(upload.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(RepositoryError::Conflict(format!(
                    "file '{}' already stored",
                    upload.filename
                )))
            }
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: &UploadId) -> Result<Option<Upload>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM uploads WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(upload_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Upload>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM uploads ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut uploads = Vec::with_capacity(rows.len());
        for row in &rows {
            uploads.push(upload_from_row(row)?);
        }

        Ok(uploads)
    }

    async fn delete(&self, id: &UploadId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM uploads WHERE id = ?")
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

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_upload(filename: &str) -> Upload {
        Upload {
            id: UploadId::new(),
            filename: filename.to_string(),
            original_name: "portrait.png".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 2048,
            url: format!("/uploads/{filename}"),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_by_id() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool);
        let upload = make_upload("abc-portrait.png");

        repo.insert(&upload).await.unwrap();

        let found = repo.get_by_id(&upload.id).await.unwrap().unwrap();
        assert_eq!(found.filename, "abc-portrait.png");
        assert_eq!(found.mime_type, "image/png");
        assert_eq!(found.size_bytes, 2048);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool);

        let mut first = make_upload("first.png");
        first.created_at = Utc::now() - chrono::Duration::minutes(5);
        let second = make_upload("second.png");

        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].filename, "second.png");
    }

    #[tokio::test]
    async fn test_duplicate_filename_conflicts() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool);

        let first = make_upload("same.png");
        let mut second = make_upload("same.png");
        second.id = UploadId::new();

        repo.insert(&first).await.unwrap();
        let err = repo.insert(&second).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool);
        let upload = make_upload("gone.png");

        repo.insert(&upload).await.unwrap();
        repo.delete(&upload.id).await.unwrap();

        assert!(repo.get_by_id(&upload.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent() {
        let pool = test_pool().await;
        let repo = SqliteUploadRepository::new(pool);

        let err = repo.delete(&UploadId::new()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
