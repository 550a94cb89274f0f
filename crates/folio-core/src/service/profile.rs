//! Profile management service.
//!
//! The public site reads the profile; the admin settings form writes it.
//! Writing is the interesting part: a deployed database may predate the
//! cv_url migration, so the update runs a three-attempt fallback chain that
//! patches the schema on the fly rather than failing the whole save.

use chrono::Utc;

use folio_types::error::ProfileError;
use folio_types::profile::{Profile, ProfileId, ProfileUpdateOutcome, UpdateProfileRequest};

use crate::repository::profile::{ProfileColumns, ProfileRepository};

/// Service orchestrating profile reads and the self-healing update.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The site profile, for public pages. Single-user deployment: there is
    /// exactly one, created at bootstrap.
    pub async fn public_profile(&self) -> Result<Profile, ProfileError> {
        self.repo
            .first()
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))?
            .ok_or(ProfileError::NotFound)
    }

    /// Get a profile by ID.
    pub async fn get(&self, id: &ProfileId) -> Result<Profile, ProfileError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))?
            .ok_or(ProfileError::NotFound)
    }

    /// Apply a settings-form submission, healing a stale schema if needed.
    ///
    /// 1. Write every column. Normally this is the end of it.
    /// 2. On failure, add the cv_url column with a raw ALTER (harmless when
    ///    it already exists) and retry without works_intro.
    /// 3. On failure, save without cv_url and works_intro so the rest of the
    ///    form is not lost.
    ///
    /// Only when all three writes fail does the caller see an error, and it
    /// carries both the final and the original failure.
    pub async fn update_profile(
        &self,
        id: &ProfileId,
        request: UpdateProfileRequest,
    ) -> Result<ProfileUpdateOutcome, ProfileError> {
        let mut profile = self.get(id).await?;

        if let Some(name) = request.name {
            let trimmed = name.trim().to_string();
            if !trimmed.is_empty() {
                profile.name = trimmed;
            }
        }
        if let Some(value) = normalize(request.role) {
            profile.role = value;
        }
        if let Some(value) = normalize(request.bio) {
            profile.bio = value;
        }
        if let Some(value) = normalize(request.country) {
            profile.country = value;
        }
        if let Some(value) = normalize(request.avatar_url) {
            profile.avatar_url = value;
        }
        if let Some(value) = normalize(request.cv_url) {
            profile.cv_url = value;
        }
        if let Some(value) = normalize(request.works_intro) {
            profile.works_intro = value;
        }
        profile.updated_at = Utc::now();

        // Attempt 1: full write.
        let original_err = match self.repo.update(&profile, ProfileColumns::Full).await {
            Ok(saved) => return Ok(ProfileUpdateOutcome::Updated(saved)),
            Err(e) => e,
        };
        tracing::warn!(error = %original_err, "full profile update failed, attempting schema patch");

        // Attempt 2: patch in the missing column, then retry. The ALTER's
        // own failure is logged and ignored, matching how little it matters:
        // the retry tells us whether the schema is usable now.
        if let Err(e) = self.repo.add_cv_url_column().await {
            tracing::warn!(error = %e, "cv_url column patch failed");
        }
        let heal_err = match self
            .repo
            .update(&profile, ProfileColumns::SkipWorksIntro)
            .await
        {
            Ok(saved) => {
                tracing::info!("profile updated after patching cv_url column");
                return Ok(ProfileUpdateOutcome::UpdatedAfterSchemaPatch(saved));
            }
            Err(e) => e,
        };
        tracing::warn!(error = %heal_err, "post-patch profile update failed, saving without cv_url");

        // Attempt 3: drop the troublesome columns entirely.
        match self
            .repo
            .update(&profile, ProfileColumns::SkipCvAndWorksIntro)
            .await
        {
            Ok(saved) => Ok(ProfileUpdateOutcome::SavedWithoutCv(saved)),
            Err(final_err) => {
                tracing::error!(error = %final_err, "all profile update attempts failed");
                Err(ProfileError::UpdateFailed {
                    details: final_err.to_string(),
                    original: original_err.to_string(),
                })
            }
        }
    }
}

/// Collapse a submitted optional field: absent means "leave untouched",
/// empty/whitespace means "clear", anything else means "set".
fn normalize(value: Option<String>) -> Option<Option<String>> {
    value.map(|s| {
        let trimmed = s.trim().to_string();
        (!trimmed.is_empty()).then_some(trimmed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absent_leaves_untouched() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn test_normalize_empty_clears() {
        assert_eq!(normalize(Some("".to_string())), Some(None));
        assert_eq!(normalize(Some("   ".to_string())), Some(None));
    }

    #[test]
    fn test_normalize_value_sets_trimmed() {
        assert_eq!(
            normalize(Some("  Design Engineer ".to_string())),
            Some(Some("Design Engineer".to_string()))
        );
    }
}
