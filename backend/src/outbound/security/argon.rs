//! Argon2 adapter for the [`PasswordHasher`] port.
//!
//! Produces PHC-format strings with a random per-password salt. An
//! unparseable stored hash verifies as `false` so corrupt rows degrade to a
//! failed login rather than an error.

use argon2::password_hash::{PasswordHash, PasswordVerifier, SaltString};
use argon2::Argon2;
use argon2::PasswordHasher as _;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Argon2id hasher with the library's default parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let mut salt_bytes = [0u8; 16];
        getrandom::getrandom(&mut salt_bytes)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        let phc = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .to_string();
        Ok(phc)
    }

    fn verify(&self, stored_hash: &str, password: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_password() {
        let hasher = Argon2PasswordHasher;
        let phc = hasher.hash("secret1").expect("hash");
        assert!(phc.starts_with("$argon2"));
        assert!(hasher.verify(&phc, "secret1"));
    }

    #[test]
    fn a_wrong_password_fails_verification() {
        let hasher = Argon2PasswordHasher;
        let phc = hasher.hash("secret1").expect("hash");
        assert!(!hasher.verify(&phc, "secret2"));
    }

    #[test]
    fn salting_makes_hashes_differ() {
        let hasher = Argon2PasswordHasher;
        let first = hasher.hash("secret1").expect("hash");
        let second = hasher.hash("secret1").expect("hash");
        assert_ne!(first, second);
    }

    #[test]
    fn an_unparseable_stored_hash_verifies_false() {
        let hasher = Argon2PasswordHasher;
        assert!(!hasher.verify("not-a-phc-string", "secret1"));
    }
}
