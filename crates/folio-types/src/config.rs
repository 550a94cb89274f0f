//! Site configuration types.
//!
//! `SiteConfig` represents the top-level `config.toml` that controls
//! registration, session lifetime, upload limits, and the media backend.

use serde::{Deserialize, Serialize};

use crate::upload::DEFAULT_MAX_UPLOAD_BYTES;

/// Top-level configuration for a Folio deployment.
///
/// Loaded from `~/.folio/config.toml`. All fields have sensible defaults;
/// a missing file means "locked-down local setup".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Whether `POST /api/v1/auth/register` is open. Off by default so a
    /// deployed instance cannot grow a second admin by accident.
    #[serde(default)]
    pub registration_enabled: bool,

    /// Session lifetime in hours (default 30 days).
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// Per-file upload ceiling in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// Prefix for generated upload URLs. Empty means relative URLs
    /// (`/uploads/...`), which is right when the API serves the files itself.
    #[serde(default)]
    pub public_base_url: String,

    /// Where uploaded bytes live.
    #[serde(default)]
    pub media: MediaConfig,
}

fn default_session_ttl_hours() -> i64 {
    720
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            registration_enabled: false,
            session_ttl_hours: default_session_ttl_hours(),
            max_upload_bytes: default_max_upload_bytes(),
            public_base_url: String::new(),
            media: MediaConfig::default(),
        }
    }
}

/// Media storage backend selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default)]
    pub backend: MediaBackend,
    /// Upload endpoint for the remote backend.
    pub endpoint: Option<String>,
    /// Bearer key for the remote backend.
    pub api_key: Option<String>,
}

/// Which store receives uploaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaBackend {
    /// Files under `{data_dir}/uploads`, served by this process.
    Local,
    /// Files pushed to a third-party media host over HTTP.
    Remote,
}

impl Default for MediaBackend {
    fn default() -> Self {
        MediaBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_default_values() {
        let config = SiteConfig::default();
        assert!(!config.registration_enabled);
        assert_eq!(config.session_ttl_hours, 720);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.public_base_url.is_empty());
        assert_eq!(config.media.backend, MediaBackend::Local);
    }

    #[test]
    fn test_site_config_deserialize_with_defaults() {
        let toml_str = "";
        let config: SiteConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.registration_enabled);
        assert_eq!(config.session_ttl_hours, 720);
    }

    #[test]
    fn test_site_config_deserialize_with_values() {
        let toml_str = r#"
registration_enabled = true
session_ttl_hours = 24
public_base_url = "https://cdn.example.com"

[media]
backend = "remote"
endpoint = "https://media.example.com/upload"
api_key = "mk_123"
"#;
        let config: SiteConfig = toml::from_str(toml_str).unwrap();
        assert!(config.registration_enabled);
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.public_base_url, "https://cdn.example.com");
        assert_eq!(config.media.backend, MediaBackend::Remote);
        assert_eq!(
            config.media.endpoint.as_deref(),
            Some("https://media.example.com/upload")
        );
    }

    #[test]
    fn test_site_config_serde_roundtrip() {
        let config = SiteConfig {
            registration_enabled: true,
            session_ttl_hours: 48,
            max_upload_bytes: 1024,
            public_base_url: "https://example.com".to_string(),
            media: MediaConfig {
                backend: MediaBackend::Remote,
                endpoint: Some("https://media.example.com".to_string()),
                api_key: None,
            },
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.session_ttl_hours, 48);
        assert_eq!(parsed.media.backend, MediaBackend::Remote);
    }
}
