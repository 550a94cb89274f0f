//! Site configuration loader for Folio.
//!
//! Reads `config.toml` from the data directory (`~/.folio/` in production)
//! and deserializes it into [`SiteConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use folio_types::config::SiteConfig;

/// Load site configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`SiteConfig::default()`] (registration
///   closed, 30-day sessions, 25 MiB upload cap, local media store).
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_site_config(data_dir: &Path) -> SiteConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return SiteConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return SiteConfig::default();
        }
    };

    match toml::from_str::<SiteConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            SiteConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `FOLIO_DATA_DIR` environment variable
/// 2. Platform-specific data directory (e.g., `~/.folio` on macOS/Linux)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FOLIO_DATA_DIR") {
        return PathBuf::from(dir);
    }

    // Use home directory fallback: ~/.folio
    if let Some(home) = dirs::home_dir() {
        return home.join(".folio");
    }

    // Last resort: current directory
    PathBuf::from(".folio")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::config::MediaBackend;
    use folio_types::upload::DEFAULT_MAX_UPLOAD_BYTES;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_site_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_site_config(tmp.path()).await;
        assert!(!config.registration_enabled);
        assert_eq!(config.session_ttl_hours, 720);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.media.backend, MediaBackend::Local);
    }

    #[tokio::test]
    async fn load_site_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
registration_enabled = true
session_ttl_hours = 168
public_base_url = "https://folio.example.com"

[media]
backend = "remote"
endpoint = "https://media.example.com/upload"
api_key = "mk_test_123"
"#,
        )
        .await
        .unwrap();

        let config = load_site_config(tmp.path()).await;
        assert!(config.registration_enabled);
        assert_eq!(config.session_ttl_hours, 168);
        assert_eq!(config.public_base_url, "https://folio.example.com");
        assert_eq!(config.media.backend, MediaBackend::Remote);
        assert_eq!(
            config.media.endpoint.as_deref(),
            Some("https://media.example.com/upload")
        );
    }

    #[tokio::test]
    async fn load_site_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_site_config(tmp.path()).await;
        assert!(!config.registration_enabled);
        assert_eq!(config.session_ttl_hours, 720);
    }

    #[test]
    fn resolve_data_dir_falls_back_to_dot_folio() {
        if std::env::var("FOLIO_DATA_DIR").is_ok() {
            // Env override is honored verbatim; nothing to assert here.
            return;
        }
        let dir = resolve_data_dir();
        assert!(dir.to_string_lossy().ends_with(".folio"));
    }
}
