//! PasswordHasher trait for credential hashing.
//!
//! Defined in folio-core so the auth service can hash and verify passwords
//! without coupling to a specific algorithm. The `Argon2PasswordHasher`
//! adapter lives in folio-infra.

use folio_types::error::AuthError;

/// Abstraction over password hashing.
///
/// Implementations produce self-describing PHC strings, so the algorithm and
/// its parameters travel with each stored hash.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh random salt.
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a plaintext password against a stored PHC string.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}
