//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod experience;
pub mod pool;
pub mod profile;
pub mod project;
pub mod session;
pub mod upload;
