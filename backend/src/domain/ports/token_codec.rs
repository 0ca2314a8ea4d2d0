//! Port for minting and verifying identity tokens.

use crate::domain::{Email, UserId};

/// Claims embedded in an identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Authenticated user identifier.
    pub user_id: UserId,
    /// Email at issuance time.
    pub email: Email,
}

/// Errors raised by token codec adapters.
///
/// Verification failures are recovered locally by the identity resolver
/// (fall through to the next provider); they are never surfaced to clients
/// as a distinct error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token was well-formed but past its expiry.
    #[error("token expired")]
    Expired,
    /// The token was corrupt, tampered with, or signed with another key.
    #[error("token invalid: {message}")]
    Invalid {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Minting failed (serialisation or signing error).
    #[error("token minting failed: {message}")]
    Mint {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl TokenError {
    /// Create an [`TokenError::Invalid`] with the given message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a [`TokenError::Mint`] with the given message.
    pub fn mint(message: impl Into<String>) -> Self {
        Self::Mint {
            message: message.into(),
        }
    }
}

/// Mint and verify signed, time-limited identity tokens.
///
/// Synchronous: signing and verification are in-memory CPU work with no I/O.
pub trait TokenCodec: Send + Sync {
    /// Mint a token embedding the user identifier and email.
    fn mint(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
