//! Credential issuer: email/password registration and login over ports.
//!
//! Inbound adapters call this service to authenticate without knowing the
//! backing infrastructure; cookie handling stays in the route layer.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use super::auth::{LoginCredentials, SignupDetails};
use super::error::Error;
use super::ports::{
    PasswordHasher, TokenClaims, TokenCodec, UserPersistenceError, UserRepository,
};
use super::user::{Provider, User, UserId};

/// A successfully authenticated account plus its freshly minted token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The stored account.
    pub user: User,
    /// Signed identity token for the `token` cookie.
    pub token: String,
}

/// Domain use-case service for password-based authentication.
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenCodec>,
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => {
            Error::duplicate_account("an account with this email already exists")
        }
    }
}

impl CredentialService {
    /// Create a new service over the given ports.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    fn mint_for(&self, user: &User) -> Result<String, Error> {
        self.tokens
            .mint(&TokenClaims {
                user_id: user.id.clone(),
                email: user.email.clone(),
            })
            .map_err(|err| Error::internal(format!("token minting failed: {err}")))
    }

    /// Register a credentials-provider account and mint its first token.
    ///
    /// The store's unique email constraint is the invariant guard: a
    /// duplicate insert surfaces as [`crate::domain::ErrorCode::DuplicateAccount`]
    /// without a prior check-then-create read.
    pub async fn register(&self, details: &SignupDetails) -> Result<AuthenticatedUser, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .map_err(|err| Error::internal(format!("{err}")))?;

        let user = User {
            id: UserId::random(),
            email: details.email().clone(),
            name: details.name().clone(),
            password_hash: Some(password_hash),
            avatar: None,
            provider: Provider::Credentials,
            created_at: Utc::now(),
        };

        self.users
            .create(&user)
            .await
            .map_err(map_persistence_error)?;

        tracing::info!(user_id = %user.id, "account registered");
        let token = self.mint_for(&user)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Validate credentials and mint a token for the matching account.
    ///
    /// Federated-only accounts (no password hash) are reported distinctly so
    /// the caller can point the user at federated login instead of a generic
    /// credentials failure.
    pub async fn issue(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::invalid_credentials("invalid credentials"))?;

        let Some(stored_hash) = user.password_hash.as_deref() else {
            return Err(
                Error::invalid_request("this account signs in with Google")
                    .with_details(json!({ "code": "federated_account" })),
            );
        };

        if !self.hasher.verify(stored_hash, credentials.password()) {
            return Err(Error::invalid_credentials("invalid credentials"));
        }

        tracing::info!(user_id = %user.id, "login succeeded");
        let token = self.mint_for(&user)?;
        Ok(AuthenticatedUser { user, token })
    }
}
