//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers, keep types immutable, and document invariants in each
//! type's Rustdoc. Transport concerns (status codes, cookies) live in
//! `inbound`; infrastructure (SQL, JWT, HTTP clients) lives in `outbound`.

pub mod auth;
pub mod credential_service;
pub mod error;
pub mod event;
pub mod identity;
pub mod ownership;
pub mod ports;
pub mod provisioning;
pub mod registration;
pub mod user;

pub use self::auth::{AuthValidationError, LoginCredentials, SignupDetails, PASSWORD_MIN};
pub use self::credential_service::{AuthenticatedUser, CredentialService};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::event::{Event, EventDraft, EventDraftParams, EventId, EventValidationError};
pub use self::identity::ResolvedIdentity;
pub use self::ownership::OwnershipPolicy;
pub use self::provisioning::FederatedProvisioner;
pub use self::registration::{
    QuestionAnswer, Registration, RegistrationDraft, RegistrationId, RegistrationValidationError,
};
pub use self::user::{
    DisplayName, Email, Provider, User, UserId, UserValidationError, DISPLAY_NAME_MIN,
};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
