//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Each port is an async (or, for CPU-bound work, sync) trait that inbound
//! adapters and domain services depend on. In-memory implementations live
//! next to their trait so tests and database-less runs can use them without
//! importing outbound infrastructure.

mod counter_store;
mod event_repository;
mod federated_auth;
mod password_hasher;
mod payment_gateway;
mod registration_repository;
mod token_codec;
mod user_repository;

pub use counter_store::{CounterStore, CounterStoreError, InMemoryCounterStore};
pub use event_repository::{EventPersistenceError, EventRepository, InMemoryEventRepository};
pub use federated_auth::{
    FederatedAuthError, FederatedAuthGateway, FederatedProfile, FixtureFederatedAuthGateway,
};
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
pub use payment_gateway::{
    FixturePaymentGateway, OrderRequest, PaymentGateway, PaymentGatewayError, PaymentOrder,
};
pub use registration_repository::{
    InMemoryRegistrationRepository, RegistrationPersistenceError, RegistrationRepository,
};
pub use token_codec::{TokenClaims, TokenCodec, TokenError};
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
