//! Google OAuth completion client implementing [`FederatedAuthGateway`].
//!
//! Exchanges the authorisation code for an access token and fetches the
//! OpenID userinfo document. The consent screen and redirects belong to
//! Google; only the server-side completion step lives here.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::ports::{FederatedAuthError, FederatedAuthGateway, FederatedProfile};
use crate::domain::{DisplayName, Email};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Google OAuth client credentials plus the registered redirect URI.
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Redirect URI registered with the provider.
    pub redirect_uri: String,
}

/// Google-backed federated auth gateway.
pub struct GoogleAuthGateway {
    client: reqwest::Client,
    config: GoogleOAuthConfig,
    token_url: String,
    userinfo_url: String,
}

impl GoogleAuthGateway {
    /// Create a gateway against Google's production endpoints.
    pub fn new(config: GoogleOAuthConfig) -> Self {
        Self::with_endpoints(config, TOKEN_URL, USERINFO_URL)
    }

    /// Create a gateway against alternative endpoints (tests).
    pub fn with_endpoints(
        config: GoogleOAuthConfig,
        token_url: impl Into<String>,
        userinfo_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            token_url: token_url.into(),
            userinfo_url: userinfo_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserinfoBody {
    email: String,
    name: String,
    #[serde(default)]
    picture: Option<String>,
}

#[async_trait]
impl FederatedAuthGateway for GoogleAuthGateway {
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedAuthError> {
        let token_response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|err| FederatedAuthError::exchange(err.to_string()))?;

        if !token_response.status().is_success() {
            return Err(FederatedAuthError::exchange(format!(
                "token endpoint returned {}",
                token_response.status()
            )));
        }
        let token: TokenBody = token_response
            .json()
            .await
            .map_err(|err| FederatedAuthError::exchange(err.to_string()))?;

        let userinfo_response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|err| FederatedAuthError::exchange(err.to_string()))?;
        if !userinfo_response.status().is_success() {
            return Err(FederatedAuthError::exchange(format!(
                "userinfo endpoint returned {}",
                userinfo_response.status()
            )));
        }
        let userinfo: UserinfoBody = userinfo_response
            .json()
            .await
            .map_err(|err| FederatedAuthError::exchange(err.to_string()))?;

        let email = Email::new(&userinfo.email)
            .map_err(|err| FederatedAuthError::exchange(format!("provider email invalid: {err}")))?;
        let name = DisplayName::new(userinfo.name)
            .map_err(|err| FederatedAuthError::exchange(format!("provider name invalid: {err}")))?;
        Ok(FederatedProfile {
            email,
            name,
            avatar: userinfo.picture,
        })
    }
}

/// Gateway used when federated login is not configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredFederatedAuthGateway;

#[async_trait]
impl FederatedAuthGateway for UnconfiguredFederatedAuthGateway {
    async fn exchange_code(&self, _code: &str) -> Result<FederatedProfile, FederatedAuthError> {
        Err(FederatedAuthError::Unconfigured)
    }
}
