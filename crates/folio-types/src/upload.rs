//! Upload types.
//!
//! An `Upload` row records a file that went through the media store: the
//! generated storage filename, what the editor originally called it, and the
//! URL it is served from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Default ceiling for a single upload (25 MB). Overridable in config.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

/// Unique identifier for an upload record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadId(pub Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UploadId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A stored file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upload {
    pub id: UploadId,
    /// Name under which the media store keeps the file (unique).
    pub filename: String,
    /// What the file was called when submitted.
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Public URL the file is served from.
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_max_upload_bytes() {
        assert_eq!(DEFAULT_MAX_UPLOAD_BYTES, 26_214_400);
    }

    #[test]
    fn test_upload_serialize() {
        let upload = Upload {
            id: UploadId::new(),
            filename: "0192-cv.pdf".to_string(),
            original_name: "cv.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 2048,
            url: "/uploads/0192-cv.pdf".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&upload).unwrap();
        assert!(json.contains("\"original_name\":\"cv.pdf\""));
        assert!(json.contains("\"mime_type\":\"application/pdf\""));
    }
}
