//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Query parameters for the project list endpoints.
///
/// The public listing ignores `status` (it always serves published work);
/// the admin listing honors every field.
#[derive(Debug, Deserialize, Default)]
pub struct ProjectListQuery {
    /// Filter by status (draft, published). Admin listing only.
    pub status: Option<String>,
    /// Keep projects whose category contains this text.
    pub category: Option<String>,
    /// Filter by the featured flag.
    pub featured: Option<bool>,
    /// Sort by field.
    #[serde(default = "default_sort")]
    pub sort: String,
    /// Sort order (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

fn default_sort() -> String {
    "created_at".to_string()
}

fn default_order() -> String {
    "desc".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_on_empty_query() {
        let query: ProjectListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sort, "created_at");
        assert_eq!(query.order, "desc");
        assert!(query.status.is_none());
        assert!(query.featured.is_none());
    }

    #[test]
    fn test_parses_full_query() {
        let query: ProjectListQuery = serde_json::from_str(
            r#"{"category": "web", "featured": true, "sort": "year", "order": "asc", "limit": 10, "offset": 20}"#,
        )
        .unwrap();
        assert_eq!(query.category.as_deref(), Some("web"));
        assert_eq!(query.featured, Some(true));
        assert_eq!(query.sort, "year");
        assert_eq!(query.order, "asc");
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.offset, Some(20));
    }
}
