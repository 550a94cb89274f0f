use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::profile::ProfileId;

/// Unique identifier for a timeline entry, wrapping a UUID v7.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperienceId(pub Uuid);

impl ExperienceId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ExperienceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExperienceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// One entry in the work-experience timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: ExperienceId,
    pub profile_id: ProfileId,
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    /// None while the position is ongoing.
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Freeform employment type ("Full-time", "Freelance").
    pub kind: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to add a timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExperienceRequest {
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    /// Forms submit an empty string for "no end date"; treated as None.
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: Option<String>,
    pub logo_url: Option<String>,
}

/// Request to rewrite a timeline entry. The edit form posts the full row, so
/// every content field is required except the optional ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateExperienceRequest {
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: Option<String>,
    pub logo_url: Option<String>,
}

/// Deserialize an optional date, mapping `""` (what date inputs submit when
/// cleared) to None instead of a parse error.
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_id_display() {
        let id = ExperienceId::new();
        let s = id.to_string();
        let parsed: ExperienceId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_empty_end_date_is_none() {
        let json = r#"{
            "company": "Studio",
            "role": "Designer",
            "start_date": "2023-01-10",
            "end_date": ""
        }"#;
        let req: CreateExperienceRequest = serde_json::from_str(json).unwrap();
        assert!(req.end_date.is_none());
        assert!(!req.is_current);
    }

    #[test]
    fn test_end_date_parses() {
        let json = r#"{
            "company": "Studio",
            "role": "Designer",
            "start_date": "2023-01-10",
            "end_date": "2024-06-30"
        }"#;
        let req: CreateExperienceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.end_date, Some(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
    }

    #[test]
    fn test_missing_end_date_is_none() {
        let json = r#"{
            "company": "Studio",
            "role": "Designer",
            "start_date": "2023-01-10"
        }"#;
        let req: CreateExperienceRequest = serde_json::from_str(json).unwrap();
        assert!(req.end_date.is_none());
    }

    #[test]
    fn test_bad_end_date_rejected() {
        let json = r#"{
            "company": "Studio",
            "role": "Designer",
            "start_date": "2023-01-10",
            "end_date": "junk"
        }"#;
        let result: Result<CreateExperienceRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
