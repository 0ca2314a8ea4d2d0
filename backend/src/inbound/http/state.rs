//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports, and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    EventRepository, FederatedAuthGateway, PaymentGateway, RegistrationRepository, UserRepository,
};
use crate::domain::{CredentialService, FederatedProvisioner, OwnershipPolicy};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Email/password registration and login.
    pub credentials: CredentialService,
    /// Federated first-login provisioning hook.
    pub provisioner: FederatedProvisioner,
    /// Federated code-exchange gateway.
    pub federated_auth: Arc<dyn FederatedAuthGateway>,
    /// User lookups for `GET /auth/me`.
    pub users: Arc<dyn UserRepository>,
    /// Event persistence.
    pub events: Arc<dyn EventRepository>,
    /// Registration persistence.
    pub registrations: Arc<dyn RegistrationRepository>,
    /// Payment gateway client.
    pub payments: Arc<dyn PaymentGateway>,
    /// Ownership gate policy for mutations and host dashboards.
    pub ownership: OwnershipPolicy,
}
