//! HS256 JWT adapter for the [`TokenCodec`] port.
//!
//! Claims carry the user id and email; expiry defaults to 24 hours from
//! issuance. The signing secret is mandatory configuration with no fallback
//! value.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenClaims, TokenCodec, TokenError};
use crate::domain::{Email, UserId};

/// Default token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Wire form of the token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    email: String,
    exp: usize,
}

/// HS256 token codec over a shared secret.
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256TokenCodec {
    /// Create a codec with the default 24-hour lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Create a codec with an explicit lifetime.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn mint(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let expires_at = Utc::now() + self.ttl;
        let exp = usize::try_from(expires_at.timestamp())
            .map_err(|_| TokenError::mint("expiry timestamp out of range"))?;
        let wire = Claims {
            id: claims.user_id.to_string(),
            email: claims.email.as_str().to_owned(),
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map_err(|err| TokenError::mint(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::invalid(err.to_string()),
            })?;

        let user_id = UserId::new(&data.claims.id)
            .map_err(|err| TokenError::invalid(format!("claims carried a bad user id: {err}")))?;
        let email = Email::new(&data.claims.email)
            .map_err(|err| TokenError::invalid(format!("claims carried a bad email: {err}")))?;
        Ok(TokenClaims { user_id, email })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    const SECRET: &str = "test-signing-secret";

    fn claims() -> TokenClaims {
        TokenClaims {
            user_id: UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("fixture id"),
            email: Email::new("alex@example.com").expect("fixture email"),
        }
    }

    #[test]
    fn mint_then_verify_round_trips_the_claims() {
        let codec = Hs256TokenCodec::new(SECRET);
        let token = codec.mint(&claims()).expect("mint");
        let verified = codec.verify(&token).expect("verify");
        assert_eq!(verified, claims());
    }

    #[test]
    fn a_token_signed_with_another_secret_is_invalid() {
        let codec = Hs256TokenCodec::new(SECRET);
        let other = Hs256TokenCodec::new("a-different-secret");
        let token = other.mint(&claims()).expect("mint");
        let err = codec.verify(&token).expect_err("must fail verification");
        assert!(matches!(err, TokenError::Invalid { .. }), "got {err:?}");
    }

    #[test]
    fn an_expired_token_is_reported_as_expired() {
        // Expiry far enough in the past to clear the default leeway.
        let codec = Hs256TokenCodec::with_ttl(SECRET, Duration::hours(-2));
        let token = codec.mint(&claims()).expect("mint");
        let err = codec.verify(&token).expect_err("must fail verification");
        assert_eq!(err, TokenError::Expired);
    }

    #[test]
    fn garbage_is_invalid_not_a_panic() {
        let codec = Hs256TokenCodec::new(SECRET);
        let err = codec
            .verify("not-even-a-jwt")
            .expect_err("must fail verification");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }
}
