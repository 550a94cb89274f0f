//! Media byte storage backends.
//!
//! `LocalMediaStore` writes under the data directory and is the default.
//! `RemoteMediaStore` pushes bytes to a third-party media host over HTTP.
//! `AnyMediaStore` dispatches between them based on site configuration.

pub mod local;
pub mod remote;

use std::path::Path;

use folio_core::service::media::{MediaStore, StoredMedia};
use folio_types::config::{MediaBackend, SiteConfig};
use folio_types::error::UploadError;

use local::LocalMediaStore;
use remote::RemoteMediaStore;

/// Runtime-selected media store.
///
/// `MediaStore` is not object-safe (async trait methods), so backend
/// selection is an enum rather than a `Box<dyn ...>`.
pub enum AnyMediaStore {
    Local(LocalMediaStore),
    Remote(RemoteMediaStore),
}

impl AnyMediaStore {
    /// Build the store the site config asks for.
    ///
    /// A remote backend without an endpoint is a config mistake; it logs a
    /// warning and falls back to local storage so the server still starts.
    pub fn from_config(config: &SiteConfig, data_dir: &Path) -> Self {
        match config.media.backend {
            MediaBackend::Remote => match config.media.endpoint.clone() {
                Some(endpoint) => Self::Remote(RemoteMediaStore::new(
                    endpoint,
                    config.media.api_key.clone(),
                )),
                None => {
                    tracing::warn!(
                        "media backend is 'remote' but no endpoint is configured, using local storage"
                    );
                    Self::local(config, data_dir)
                }
            },
            MediaBackend::Local => Self::local(config, data_dir),
        }
    }

    fn local(config: &SiteConfig, data_dir: &Path) -> Self {
        Self::Local(LocalMediaStore::new(
            data_dir.join("uploads"),
            config.public_base_url.clone(),
        ))
    }
}

impl MediaStore for AnyMediaStore {
    async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredMedia, UploadError> {
        match self {
            Self::Local(store) => store.store(original_name, data).await,
            Self::Remote(store) => store.store(original_name, data).await,
        }
    }

    async fn remove(&self, filename: &str) -> Result<(), UploadError> {
        match self {
            Self::Local(store) => store.remove(filename).await,
            Self::Remote(store) => store.remove(filename).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_selects_local() {
        let config = SiteConfig::default();
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AnyMediaStore::from_config(&config, tmp.path()),
            AnyMediaStore::Local(_)
        ));
    }

    #[test]
    fn test_remote_config_selects_remote() {
        let mut config = SiteConfig::default();
        config.media.backend = MediaBackend::Remote;
        config.media.endpoint = Some("https://media.example.com/upload".to_string());
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AnyMediaStore::from_config(&config, tmp.path()),
            AnyMediaStore::Remote(_)
        ));
    }

    #[test]
    fn test_remote_without_endpoint_falls_back_to_local() {
        let mut config = SiteConfig::default();
        config.media.backend = MediaBackend::Remote;
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            AnyMediaStore::from_config(&config, tmp.path()),
            AnyMediaStore::Local(_)
        ));
    }
}
