//! Business logic and repository trait definitions for Folio.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `folio-types` -- never on
//! `folio-infra` or any database/IO crate.

pub mod cache;
pub mod repository;
pub mod service;
