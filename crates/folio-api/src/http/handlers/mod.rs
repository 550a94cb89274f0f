//! HTTP request handlers for the REST API.

pub mod auth;
pub mod experience;
pub mod profile;
pub mod project;
pub mod stats;
pub mod upload;
