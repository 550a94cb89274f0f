//! Argon2id password hashing.
//!
//! Implements the `PasswordHasher` trait from `folio-core` with the argon2
//! crate's PHC-string API. Each hash carries its own salt and parameters, so
//! stored credentials survive future parameter changes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

use folio_core::service::password::PasswordHasher;
use folio_types::error::AuthError;

/// Argon2id-backed implementation of `PasswordHasher`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hasher = Argon2PasswordHasher::new();

        let hash = hasher.hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(hasher
            .verify_password("correct horse battery", &hash)
            .unwrap());
        assert!(!hasher.verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = Argon2PasswordHasher::new();

        let first = hasher.hash_password("repeat").unwrap();
        let second = hasher.hash_password("repeat").unwrap();

        // Fresh salt per hash
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();

        let err = hasher.verify_password("anything", "not-a-phc-string");
        assert!(matches!(err, Err(AuthError::Hashing(_))));
    }
}
