use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a project, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    /// Create a new ProjectId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a ProjectId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a project media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaId(pub Uuid);

impl MediaId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MediaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A portfolio project.
///
/// Drafts are hidden from the public listing but remain reachable at their
/// direct URL, which is how preview links work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// URL-safe unique slug derived from the title ("Brand Refresh" -> "brand-refresh").
    pub slug: String,
    pub title: String,
    /// Freeform category label ("Web Design", "Visual Exploration"). The home
    /// page groups projects by keyword matches against this.
    pub category: Option<String>,
    /// Card image shown in listings.
    pub thumbnail_url: Option<String>,
    /// Short description for listing cards (1-2 sentences).
    pub summary: Option<String>,
    /// Long-form rich text (HTML) for the detail page.
    pub body_html: Option<String>,
    pub client: Option<String>,
    /// The owner's role on the project.
    pub role: Option<String>,
    /// Freeform year label ("2024", "2023 - 2024").
    pub year: Option<String>,
    /// Comma-separated list of tools and technologies.
    pub technologies: Option<String>,
    /// External link (live site, case study).
    pub link: Option<String>,
    pub status: ProjectStatus,
    /// Featured projects surface in the home page hero section.
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Gallery attachments, ordered by position.
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

/// Publication states for a project.
///
/// - Draft: visible only in the admin area and via direct URL
/// - Published: listed on the public site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Published,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Draft => write!(f, "draft"),
            ProjectStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ProjectStatus::Draft),
            "published" => Ok(ProjectStatus::Published),
            other => Err(format!("invalid project status: '{other}'")),
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Draft
    }
}

/// A gallery attachment on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    pub project_id: ProjectId,
    pub url: String,
    pub kind: MediaKind,
    /// Display order within the gallery, starting at 0.
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// What a media attachment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("invalid media kind: '{other}'")),
        }
    }
}

impl Default for MediaKind {
    fn default() -> Self {
        MediaKind::Image
    }
}

/// A media attachment as submitted by the editor (no id yet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInput {
    pub url: String,
    #[serde(default)]
    pub kind: MediaKind,
}

/// Request to create a project. Only `title` is required -- the slug is
/// generated from it when absent, and the status defaults to draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub summary: Option<String>,
    pub body_html: Option<String>,
    pub client: Option<String>,
    pub role: Option<String>,
    pub year: Option<String>,
    pub technologies: Option<String>,
    pub link: Option<String>,
    pub status: Option<ProjectStatus>,
    pub media: Option<Vec<MediaInput>>,
}

/// Request to update a project. Absent fields are left untouched; a present
/// `media` list replaces the whole gallery. Sending `featured` alone is how
/// the listing's star toggle works.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub thumbnail_url: Option<String>,
    pub summary: Option<String>,
    pub body_html: Option<String>,
    pub client: Option<String>,
    pub role: Option<String>,
    pub year: Option<String>,
    pub technologies: Option<String>,
    pub link: Option<String>,
    pub status: Option<ProjectStatus>,
    pub featured: Option<bool>,
    pub media: Option<Vec<MediaInput>>,
}

/// Generate a URL-safe slug from a display title.
///
/// Rules:
/// - Lowercase
/// - Replace non-alphanumeric characters with hyphens
/// - Collapse consecutive hyphens into one
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use folio_types::project::slugify;
///
/// assert_eq!(slugify("Brand Refresh"), "brand-refresh");
/// assert_eq!(slugify("My  Cool  Project!"), "my-cool-project");
/// assert_eq!(slugify("---hello---world---"), "hello-world");
/// ```
pub fn slugify(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse consecutive hyphens and trim edges
    let mut result = String::with_capacity(slug.len());
    let mut prev_was_hyphen = true; // treat start as hyphen to trim leading
    for c in slug.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                result.push('-');
            }
            prev_was_hyphen = true;
        } else {
            result.push(c);
            prev_was_hyphen = false;
        }
    }

    // Trim trailing hyphen
    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Brand Refresh"), "brand-refresh");
    }

    #[test]
    fn test_slugify_special_chars() {
        assert_eq!(slugify("My  Cool  Project!"), "my-cool-project");
    }

    #[test]
    fn test_slugify_leading_trailing() {
        assert_eq!(slugify("---hello---world---"), "hello-world");
    }

    #[test]
    fn test_slugify_numbers() {
        assert_eq!(slugify("Portfolio v2.0"), "portfolio-v2-0");
    }

    #[test]
    fn test_project_id_display() {
        let id = ProjectId::new();
        let s = id.to_string();
        let parsed: ProjectId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_project_status_roundtrip() {
        for status in [ProjectStatus::Draft, ProjectStatus::Published] {
            let s = status.to_string();
            let parsed: ProjectStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_project_status_serde_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
    }

    #[test]
    fn test_media_kind_roundtrip() {
        for kind in [MediaKind::Image, MediaKind::Video] {
            let s = kind.to_string();
            let parsed: MediaKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_media_input_default_kind() {
        let input: MediaInput = serde_json::from_str(r#"{"url":"/uploads/a.png"}"#).unwrap();
        assert_eq!(input.kind, MediaKind::Image);
    }

    #[test]
    fn test_update_request_partial_deserialize() {
        let req: UpdateProjectRequest = serde_json::from_str(r#"{"featured":true}"#).unwrap();
        assert_eq!(req.featured, Some(true));
        assert!(req.title.is_none());
        assert!(req.media.is_none());
    }
}
