//! Remote media host store.
//!
//! Pushes uploads to a third-party media host: one multipart POST per file,
//! bearer-key auth, and a JSON `{"url": ...}` response telling us where the
//! file ended up.

use std::time::Duration;

use folio_core::service::media::{MediaStore, StoredMedia};
use folio_types::error::UploadError;
use serde::Deserialize;

/// Media store backed by an external host's upload endpoint.
pub struct RemoteMediaStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteMediaStore {
    /// Create a store posting to `endpoint`, optionally authenticated.
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            endpoint,
            api_key,
        }
    }
}

/// The media host's upload response.
#[derive(Debug, Deserialize)]
struct HostResponse {
    url: String,
}

/// Derive a stored filename from the URL the host handed back.
fn filename_from_url(url: &str, fallback: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

impl MediaStore for RemoteMediaStore {
    async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredMedia, UploadError> {
        let part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name(original_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::StoreFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UploadError::StoreFailed(format!(
                "media host returned {}",
                response.status()
            )));
        }

        let body: HostResponse = response
            .json()
            .await
            .map_err(|e| UploadError::StoreFailed(format!("invalid media host response: {e}")))?;

        let filename = filename_from_url(&body.url, original_name);

        Ok(StoredMedia {
            filename,
            url: body.url,
        })
    }

    async fn remove(&self, filename: &str) -> Result<(), UploadError> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), filename);

        let mut request = self.client.delete(&url);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UploadError::StoreFailed(e.to_string()))?;

        // The host not knowing the file is as good as deleted.
        if response.status().is_success() || response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(UploadError::StoreFailed(format!(
            "media host returned {}",
            response.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url_takes_last_segment() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/folio/abc-cv.pdf", "cv.pdf"),
            "abc-cv.pdf"
        );
    }

    #[test]
    fn test_filename_from_url_falls_back_on_trailing_slash() {
        assert_eq!(
            filename_from_url("https://cdn.example.com/folio/", "cv.pdf"),
            "cv.pdf"
        );
    }

    #[test]
    fn test_host_response_deserializes() {
        let body: HostResponse =
            serde_json::from_str(r#"{"url":"https://cdn.example.com/x.png"}"#).unwrap();
        assert_eq!(body.url, "https://cdn.example.com/x.png");
    }
}
