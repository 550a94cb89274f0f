use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for the site profile, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    /// Create a new ProfileId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a ProfileId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProfileId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The site owner's account and public profile.
///
/// A portfolio has exactly one of these in practice -- the account created at
/// bootstrap. `role` is the displayed job title ("Design Engineer"), not an
/// authorization level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    /// Login identity, unique.
    pub email: String,
    /// Display name shown on the public site.
    pub name: String,
    /// Argon2id PHC string. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    /// Job title shown under the name.
    pub role: Option<String>,
    pub bio: Option<String>,
    pub country: Option<String>,
    pub avatar_url: Option<String>,
    /// Link to the downloadable CV. Lives in a column added by a later
    /// migration; the update path self-heals when it is missing.
    pub cv_url: Option<String>,
    /// Intro paragraph for the works page.
    pub works_intro: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The profile as served over the wire: everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: ProfileId,
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub country: Option<String>,
    pub avatar_url: Option<String>,
    pub cv_url: Option<String>,
    pub works_intro: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileView {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            email: p.email,
            name: p.name,
            role: p.role,
            bio: p.bio,
            country: p.country,
            avatar_url: p.avatar_url,
            cv_url: p.cv_url,
            works_intro: p.works_intro,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Request to update the profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub country: Option<String>,
    pub avatar_url: Option<String>,
    pub cv_url: Option<String>,
    pub works_intro: Option<String>,
}

/// How a profile update landed.
///
/// The update runs up to three attempts: a full write, a retry after adding
/// the missing `cv_url` column, and a final write that drops the fields the
/// stale schema cannot hold. Callers surface the notice text to the user.
#[derive(Debug, Clone)]
pub enum ProfileUpdateOutcome {
    /// Full update succeeded on the first attempt.
    Updated(Profile),
    /// The `cv_url` column was added on the fly and the retry succeeded
    /// (the retry does not write `works_intro`).
    UpdatedAfterSchemaPatch(Profile),
    /// Both writes involving `cv_url` failed; the profile was saved without
    /// the CV link or the works intro.
    SavedWithoutCv(Profile),
}

impl ProfileUpdateOutcome {
    pub fn profile(&self) -> &Profile {
        match self {
            Self::Updated(p) | Self::UpdatedAfterSchemaPatch(p) | Self::SavedWithoutCv(p) => p,
        }
    }

    pub fn into_profile(self) -> Profile {
        match self {
            Self::Updated(p) | Self::UpdatedAfterSchemaPatch(p) | Self::SavedWithoutCv(p) => p,
        }
    }

    /// Informational notice for a degraded-but-successful save.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::UpdatedAfterSchemaPatch(_) => Some("Profile updated after database patch."),
            _ => None,
        }
    }

    /// Warning for a save that lost data.
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            Self::SavedWithoutCv(_) => Some(
                "Profile saved, but the CV link could not be stored. \
                 Restart the server to apply pending database migrations, then save again.",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            id: ProfileId::new(),
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: Some("Design Engineer".to_string()),
            bio: None,
            country: Some("Portugal".to_string()),
            avatar_url: None,
            cv_url: Some("/uploads/cv.pdf".to_string()),
            works_intro: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_id_display() {
        let id = ProfileId::new();
        let s = id.to_string();
        let parsed: ProfileId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_string(&sample_profile()).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_profile_view_drops_password() {
        let view = ProfileView::from(sample_profile());
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"email\":\"owner@example.com\""));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_outcome_messages() {
        let p = sample_profile();
        assert!(ProfileUpdateOutcome::Updated(p.clone()).message().is_none());
        assert!(ProfileUpdateOutcome::Updated(p.clone()).warning().is_none());
        assert_eq!(
            ProfileUpdateOutcome::UpdatedAfterSchemaPatch(p.clone()).message(),
            Some("Profile updated after database patch.")
        );
        assert!(
            ProfileUpdateOutcome::SavedWithoutCv(p)
                .warning()
                .unwrap()
                .contains("CV link")
        );
    }
}
