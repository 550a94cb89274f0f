//! Infrastructure layer for Folio.
//!
//! Contains implementations of the ports defined in `folio-core`: SQLite
//! repositories, media byte stores (local disk and remote host), Argon2
//! password hashing, and the config/data-dir loaders.

pub mod config;
pub mod media;
pub mod password;
pub mod sqlite;
