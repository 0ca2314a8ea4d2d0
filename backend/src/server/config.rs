//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PITCHSIDE_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence. The token-signing
//! secret is deliberately mandatory: there is no fallback value, and startup
//! fails without it.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::middleware::{RateLimitConfig, RouteGuardConfig};

/// Default bind address.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Errors raised while validating loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `PITCHSIDE_TOKEN_SECRET` was absent or blank.
    #[error("token secret is required; set PITCHSIDE_TOKEN_SECRET")]
    MissingTokenSecret,
    /// The configured bind address did not parse.
    #[error("bind address {value:?} is invalid: {message}")]
    InvalidBindAddr {
        /// The offending value.
        value: String,
        /// Parser detail.
        message: String,
    },
}

/// Deployment configuration for the backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PITCHSIDE")]
pub struct AppSettings {
    /// HS256 signing secret for identity tokens. Mandatory.
    pub token_secret: Option<String>,
    /// Socket address to bind; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; in-memory repositories are used when absent.
    pub database_url: Option<String>,
    /// Path to the session key file; an ephemeral key is generated in debug
    /// builds when unset.
    pub session_key_file: Option<String>,
    /// Mark cookies `Secure`; defaults to true.
    pub cookie_secure: Option<bool>,
    /// Rate-limit window in seconds; defaults to 60.
    pub rate_limit_window_secs: Option<u64>,
    /// Rate-limit cap per window; defaults to 100.
    pub rate_limit_max_requests: Option<u64>,
    /// Redis URL backing the rate limiter for multi-instance deployments.
    pub rate_limit_redis_url: Option<String>,
    /// Permit mutation of events that record no host; defaults to true
    /// (preserved source behaviour).
    pub allow_unowned_mutation: Option<bool>,
    /// Comma-separated path prefixes requiring an identity cookie;
    /// defaults to `/host`.
    pub protected_prefixes: Option<String>,
    /// Google OAuth client id; federated login is disabled when absent.
    pub google_client_id: Option<String>,
    /// Google OAuth client secret.
    pub google_client_secret: Option<String>,
    /// Redirect URI registered with Google.
    pub google_redirect_uri: Option<String>,
    /// Payment gateway key id; the payment endpoint reports unavailable
    /// when absent.
    pub payment_key_id: Option<String>,
    /// Payment gateway key secret.
    pub payment_key_secret: Option<String>,
    /// Override for the response content-security-policy header.
    pub content_security_policy: Option<String>,
}

impl AppSettings {
    /// The mandatory token-signing secret.
    pub fn require_token_secret(&self) -> Result<&str, SettingsError> {
        match self.token_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(secret),
            _ => Err(SettingsError::MissingTokenSecret),
        }
    }

    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Whether cookies carry the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Rate limiter window and cap.
    pub fn rate_limit(&self) -> RateLimitConfig {
        let defaults = RateLimitConfig::default();
        RateLimitConfig {
            window: self
                .rate_limit_window_secs
                .map_or(defaults.window, Duration::from_secs),
            max_requests: self.rate_limit_max_requests.unwrap_or(defaults.max_requests),
        }
    }

    /// Ownership gate policy.
    pub fn ownership_policy(&self) -> crate::domain::OwnershipPolicy {
        crate::domain::OwnershipPolicy {
            allow_unowned_mutation: self.allow_unowned_mutation.unwrap_or(true),
        }
    }

    /// Protected-prefix guard configuration.
    pub fn route_guard(&self) -> RouteGuardConfig {
        let defaults = RouteGuardConfig::default();
        match self.protected_prefixes.as_deref() {
            Some(raw) => {
                let prefixes: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(ToOwned::to_owned)
                    .collect();
                RouteGuardConfig {
                    protected_prefixes: if prefixes.is_empty() {
                        defaults.protected_prefixes
                    } else {
                        prefixes
                    },
                    ..defaults
                }
            }
            None => defaults,
        }
    }
}
