//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (folio-infra) implements. The core crate never depends on any specific
//! storage technology.

pub mod experience;
pub mod profile;
pub mod project;
pub mod session;
pub mod upload;

/// Sort order for list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}
