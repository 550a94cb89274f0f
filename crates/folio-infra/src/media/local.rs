//! Local filesystem media store.
//!
//! Implements the `MediaStore` trait from `folio-core` with files written to
//! `{data_dir}/uploads/`. Stored names get a UUID v7 prefix, so two uploads
//! of `portrait.png` never collide and names stay time-sortable.

use std::path::PathBuf;

use folio_core::service::media::{MediaStore, StoredMedia};
use folio_types::error::UploadError;
use uuid::Uuid;

/// Filesystem-backed media store.
///
/// URLs are `{public_base_url}/uploads/{filename}`; with an empty base URL
/// they come out relative, which is what a single-host deployment serves.
pub struct LocalMediaStore {
    uploads_dir: PathBuf,
    public_base_url: String,
}

impl LocalMediaStore {
    /// Create a store writing into `uploads_dir`.
    pub fn new(uploads_dir: PathBuf, public_base_url: String) -> Self {
        Self {
            uploads_dir,
            public_base_url,
        }
    }
}

/// Collapse whitespace runs in an uploaded name to single hyphens.
fn safe_name(original: &str) -> String {
    original.split_whitespace().collect::<Vec<_>>().join("-")
}

impl MediaStore for LocalMediaStore {
    async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredMedia, UploadError> {
        tokio::fs::create_dir_all(&self.uploads_dir)
            .await
            .map_err(|e| UploadError::StoreFailed(format!("failed to create uploads dir: {e}")))?;

        let filename = format!("{}-{}", Uuid::now_v7().simple(), safe_name(original_name));
        let path = self.uploads_dir.join(&filename);

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| UploadError::StoreFailed(format!("failed to write file: {e}")))?;

        let url = format!(
            "{}/uploads/{}",
            self.public_base_url.trim_end_matches('/'),
            filename
        );

        Ok(StoredMedia { filename, url })
    }

    async fn remove(&self, filename: &str) -> Result<(), UploadError> {
        let path = self.uploads_dir.join(filename);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UploadError::StoreFailed(format!(
                "failed to remove file: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> (LocalMediaStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(dir.path().join("uploads"), String::new());
        (store, dir)
    }

    #[tokio::test]
    async fn test_store_writes_bytes_and_returns_relative_url() {
        let (store, dir) = make_store();

        let stored = store
            .store("My Portrait.png", b"fake image bytes")
            .await
            .unwrap();

        assert!(stored.filename.ends_with("-My-Portrait.png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.filename));

        let on_disk = tokio::fs::read(dir.path().join("uploads").join(&stored.filename))
            .await
            .unwrap();
        assert_eq!(on_disk, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_store_generates_unique_names() {
        let (store, _dir) = make_store();

        let first = store.store("same.png", b"one").await.unwrap();
        let second = store.store("same.png", b"two").await.unwrap();

        assert_ne!(first.filename, second.filename);
    }

    #[tokio::test]
    async fn test_base_url_prefixes_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalMediaStore::new(
            dir.path().to_path_buf(),
            "https://folio.example.com/".to_string(),
        );

        let stored = store.store("cv.pdf", b"%PDF-1.4").await.unwrap();
        assert!(stored
            .url
            .starts_with("https://folio.example.com/uploads/"));
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let (store, dir) = make_store();

        let stored = store.store("gone.png", b"bytes").await.unwrap();
        store.remove(&stored.filename).await.unwrap();

        assert!(!dir.path().join("uploads").join(&stored.filename).exists());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_ok() {
        let (store, _dir) = make_store();
        store.remove("never-stored.png").await.unwrap();
    }

    #[test]
    fn test_safe_name_collapses_whitespace() {
        assert_eq!(safe_name("My  Cool   File.png"), "My-Cool-File.png");
        assert_eq!(safe_name("plain.png"), "plain.png");
    }
}
