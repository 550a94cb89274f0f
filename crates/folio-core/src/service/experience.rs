//! Experience timeline service.
//!
//! Thin orchestration over the repository: the timeline is a flat list of
//! entries belonging to the single site profile, rendered newest-first.

use chrono::Utc;

use folio_types::error::ExperienceError;
use folio_types::experience::{
    CreateExperienceRequest, Experience, ExperienceId, UpdateExperienceRequest,
};
use folio_types::profile::ProfileId;

use crate::repository::experience::ExperienceRepository;

/// Service for the work-experience timeline.
pub struct ExperienceService<R: ExperienceRepository> {
    repo: R,
}

impl<R: ExperienceRepository> ExperienceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a timeline entry for the given profile.
    pub async fn add(
        &self,
        profile_id: &ProfileId,
        request: CreateExperienceRequest,
    ) -> Result<Experience, ExperienceError> {
        let (company, role) = validate_names(&request.company, &request.role)?;
        let end_date = resolve_end_date(request.is_current, request.end_date)?;
        check_date_order(request.start_date, end_date)?;

        let now = Utc::now();
        let experience = Experience {
            id: ExperienceId::new(),
            profile_id: profile_id.clone(),
            company,
            role,
            start_date: request.start_date,
            end_date,
            is_current: request.is_current,
            description: request.description,
            location: request.location,
            kind: request.kind,
            logo_url: request.logo_url,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .create(&experience)
            .await
            .map_err(|e| ExperienceError::StorageError(e.to_string()))
    }

    /// List all entries, newest first.
    pub async fn list(&self) -> Result<Vec<Experience>, ExperienceError> {
        self.repo
            .list()
            .await
            .map_err(|e| ExperienceError::StorageError(e.to_string()))
    }

    /// Rewrite an entry with a full form submission.
    pub async fn update(
        &self,
        id: &ExperienceId,
        request: UpdateExperienceRequest,
    ) -> Result<Experience, ExperienceError> {
        let mut experience = self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| ExperienceError::StorageError(e.to_string()))?
            .ok_or(ExperienceError::NotFound)?;

        let (company, role) = validate_names(&request.company, &request.role)?;
        let end_date = resolve_end_date(request.is_current, request.end_date)?;
        check_date_order(request.start_date, end_date)?;

        experience.company = company;
        experience.role = role;
        experience.start_date = request.start_date;
        experience.end_date = end_date;
        experience.is_current = request.is_current;
        experience.description = request.description;
        experience.location = request.location;
        experience.kind = request.kind;
        experience.logo_url = request.logo_url;
        experience.updated_at = Utc::now();

        self.repo
            .update(&experience)
            .await
            .map_err(|e| ExperienceError::StorageError(e.to_string()))
    }

    /// Delete an entry.
    pub async fn remove(&self, id: &ExperienceId) -> Result<(), ExperienceError> {
        // Confirm existence so callers get NotFound instead of a silent no-op.
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| ExperienceError::StorageError(e.to_string()))?
            .ok_or(ExperienceError::NotFound)?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| ExperienceError::StorageError(e.to_string()))
    }
}

fn validate_names(company: &str, role: &str) -> Result<(String, String), ExperienceError> {
    let company = company.trim().to_string();
    let role = role.trim().to_string();
    if company.is_empty() {
        return Err(ExperienceError::Invalid("company cannot be empty".to_string()));
    }
    if role.is_empty() {
        return Err(ExperienceError::Invalid("role cannot be empty".to_string()));
    }
    Ok((company, role))
}

/// An ongoing position has no end date, whatever the form submitted.
fn resolve_end_date(
    is_current: bool,
    end_date: Option<chrono::NaiveDate>,
) -> Result<Option<chrono::NaiveDate>, ExperienceError> {
    if is_current { Ok(None) } else { Ok(end_date) }
}

fn check_date_order(
    start: chrono::NaiveDate,
    end: Option<chrono::NaiveDate>,
) -> Result<(), ExperienceError> {
    if let Some(end) = end {
        if end < start {
            return Err(ExperienceError::Invalid(
                "end date cannot precede start date".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_validate_names_trims() {
        let (company, role) = validate_names("  Studio  ", " Designer ").unwrap();
        assert_eq!(company, "Studio");
        assert_eq!(role, "Designer");
    }

    #[test]
    fn test_validate_names_rejects_empty() {
        assert!(validate_names("", "Designer").is_err());
        assert!(validate_names("Studio", "   ").is_err());
    }

    #[test]
    fn test_current_position_clears_end_date() {
        let end = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(resolve_end_date(true, end).unwrap(), None);
        assert_eq!(resolve_end_date(false, end).unwrap(), end);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(check_date_order(start, end).is_err());
        assert!(check_date_order(start, None).is_ok());
        assert!(check_date_order(start, Some(start)).is_ok());
    }
}
