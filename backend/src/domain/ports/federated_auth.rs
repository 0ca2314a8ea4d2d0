//! Port for completing a federated (OAuth) login.

use async_trait::async_trait;

use crate::domain::{DisplayName, Email};

/// Profile returned by the federated identity provider after a successful
/// authorisation-code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProfile {
    /// Verified email from the provider.
    pub email: Email,
    /// Display name from the provider.
    pub name: DisplayName,
    /// Optional avatar image URL.
    pub avatar: Option<String>,
}

/// Errors raised by federated auth gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FederatedAuthError {
    /// No provider credentials are configured for this deployment.
    #[error("federated login is not configured")]
    Unconfigured,
    /// The code exchange or profile fetch failed.
    #[error("federated auth failed: {message}")]
    Exchange {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl FederatedAuthError {
    /// Create a [`FederatedAuthError::Exchange`] with the given message.
    pub fn exchange(message: impl Into<String>) -> Self {
        Self::Exchange {
            message: message.into(),
        }
    }
}

/// Exchange an authorisation code for a verified profile.
///
/// The OAuth dance itself (consent screen, redirects) belongs to the
/// provider; this port only covers the server-side completion step.
#[async_trait]
pub trait FederatedAuthGateway: Send + Sync {
    /// Exchange `code` for the authenticated profile.
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedAuthError>;
}

/// Gateway returning a fixed profile, for tests.
#[derive(Debug, Clone)]
pub struct FixtureFederatedAuthGateway {
    profile: FederatedProfile,
}

impl FixtureFederatedAuthGateway {
    /// Always resolve to `profile` regardless of the code.
    pub fn new(profile: FederatedProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl FederatedAuthGateway for FixtureFederatedAuthGateway {
    async fn exchange_code(&self, _code: &str) -> Result<FederatedProfile, FederatedAuthError> {
        Ok(self.profile.clone())
    }
}
