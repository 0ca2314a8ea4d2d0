//! Port for salted password hashing.

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing failed (salt generation or parameter error).
    #[error("password hashing failed: {message}")]
    Hash {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl PasswordHashError {
    /// Create a [`PasswordHashError::Hash`] with the given message.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }
}

/// Hash passwords for storage and verify candidates against stored hashes.
///
/// Synchronous: hashing is CPU-bound with no I/O. Verification returns a
/// plain boolean; an unparseable stored hash verifies as `false` rather than
/// erroring, so corrupt rows degrade to a failed login.
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted PHC-format hash of `password`.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a stored PHC-format hash.
    fn verify(&self, stored_hash: &str, password: &str) -> bool;
}
