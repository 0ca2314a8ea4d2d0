//! Federated identity provider clients.

mod google;

pub use google::{GoogleAuthGateway, GoogleOAuthConfig, UnconfiguredFederatedAuthGateway};
