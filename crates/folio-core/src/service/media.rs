//! Media upload service.
//!
//! Uploaded bytes go to a [`MediaStore`] (local disk or a remote media host);
//! an `uploads` row records what went where. The editor gets back a URL it
//! can paste into thumbnails, galleries, avatars, or the CV link.

use chrono::Utc;

use folio_types::error::UploadError;
use folio_types::upload::{Upload, UploadId};

use crate::repository::upload::UploadRepository;

/// What a media store reports back after persisting bytes.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    /// Name the store filed the bytes under (unique per store).
    pub filename: String,
    /// Public URL the file is reachable at.
    pub url: String,
}

/// Abstraction over media byte storage.
///
/// Implementations live in folio-infra: `LocalMediaStore` writes under the
/// data dir, `RemoteMediaStore` pushes to a third-party host.
pub trait MediaStore: Send + Sync {
    /// Persist bytes under a name derived from `original_name`.
    fn store(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<StoredMedia, UploadError>> + Send;

    /// Remove a stored file. Removing a missing file is not an error.
    fn remove(
        &self,
        filename: &str,
    ) -> impl std::future::Future<Output = Result<(), UploadError>> + Send;
}

/// Service orchestrating uploads: size checks, MIME detection, storage, and
/// the bookkeeping row.
pub struct MediaService<S: MediaStore, R: UploadRepository> {
    store: S,
    repo: R,
    max_upload_bytes: u64,
}

impl<S: MediaStore, R: UploadRepository> MediaService<S, R> {
    pub fn new(store: S, repo: R, max_upload_bytes: u64) -> Self {
        Self {
            store,
            repo,
            max_upload_bytes,
        }
    }

    /// Store one uploaded file and record it.
    pub async fn upload(&self, original_name: &str, data: &[u8]) -> Result<Upload, UploadError> {
        if data.is_empty() {
            return Err(UploadError::Empty);
        }
        let size = data.len() as u64;
        if size > self.max_upload_bytes {
            return Err(UploadError::TooLarge {
                size,
                max: self.max_upload_bytes,
            });
        }
        validate_filename(original_name)?;

        let stored = self.store.store(original_name, data).await?;

        let upload = Upload {
            id: UploadId::new(),
            filename: stored.filename,
            original_name: original_name.to_string(),
            mime_type: detect_mime(original_name),
            size_bytes: size,
            url: stored.url,
            created_at: Utc::now(),
        };

        self.repo
            .insert(&upload)
            .await
            .map_err(|e| UploadError::StorageError(e.to_string()))
    }

    /// All uploads, newest first.
    pub async fn list(&self) -> Result<Vec<Upload>, UploadError> {
        self.repo
            .list()
            .await
            .map_err(|e| UploadError::StorageError(e.to_string()))
    }

    /// Delete an upload record and its stored bytes.
    ///
    /// The record goes first; file removal is best effort, since an orphaned
    /// file is harmless while a dangling record is confusing.
    pub async fn delete(&self, id: &UploadId) -> Result<(), UploadError> {
        let upload = self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| UploadError::StorageError(e.to_string()))?
            .ok_or(UploadError::NotFound)?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| UploadError::StorageError(e.to_string()))?;

        if let Err(e) = self.store.remove(&upload.filename).await {
            tracing::warn!(filename = %upload.filename, error = %e, "failed to remove stored file");
        }

        Ok(())
    }
}

/// Reject names that could escape the uploads directory.
fn validate_filename(filename: &str) -> Result<(), UploadError> {
    if filename.trim().is_empty() {
        return Err(UploadError::InvalidFilename("empty filename".to_string()));
    }
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(UploadError::InvalidFilename(
            "filename must not contain path separators or '..'".to_string(),
        ));
    }
    Ok(())
}

/// Detect MIME type from file extension.
///
/// PDFs matter here: remote media hosts mangle them unless they are flagged
/// as raw documents, so they get their exact type.
pub fn detect_mime(filename: &str) -> String {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",

        // Documents
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",

        // Archives
        "zip" => "application/zip",

        // Default
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime_images() {
        assert_eq!(detect_mime("photo.PNG"), "image/png");
        assert_eq!(detect_mime("shot.jpeg"), "image/jpeg");
        assert_eq!(detect_mime("anim.webp"), "image/webp");
    }

    #[test]
    fn test_detect_mime_pdf() {
        assert_eq!(detect_mime("cv.pdf"), "application/pdf");
    }

    #[test]
    fn test_detect_mime_unknown_falls_back() {
        assert_eq!(detect_mime("archive.rar"), "application/octet-stream");
        assert_eq!(detect_mime("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_validate_filename_rejects_traversal() {
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("a/b.png").is_err());
        assert!(validate_filename("a\\b.png").is_err());
        assert!(validate_filename("").is_err());
    }

    #[test]
    fn test_validate_filename_accepts_plain_names() {
        assert!(validate_filename("cv.pdf").is_ok());
        assert!(validate_filename("hero image.png").is_ok());
    }
}
