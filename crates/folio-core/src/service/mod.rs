//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, media storage, and business
//! rules. They depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod auth;
pub mod experience;
pub mod media;
pub mod password;
pub mod profile;
pub mod project;
