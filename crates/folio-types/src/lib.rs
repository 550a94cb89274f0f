//! Shared domain types for Folio.
//!
//! This crate contains the core domain types used across the platform:
//! Profile, Project, Experience, Session, Upload, and their associated
//! error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod auth;
pub mod config;
pub mod error;
pub mod experience;
pub mod profile;
pub mod project;
pub mod upload;
