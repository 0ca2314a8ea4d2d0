//! Port abstraction for registration persistence adapters and their errors.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{EventId, Registration};

/// Persistence errors raised by registration repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationPersistenceError {
    /// Repository connection could not be established.
    #[error("registration repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("registration repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl RegistrationPersistenceError {
    /// Create a [`RegistrationPersistenceError::Connection`] with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a [`RegistrationPersistenceError::Query`] with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Registration persistence port. Registrations are append-only.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a new registration.
    async fn create(
        &self,
        registration: &Registration,
    ) -> Result<(), RegistrationPersistenceError>;

    /// Registrations for an event, newest first.
    async fn list_by_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, RegistrationPersistenceError>;
}

/// In-memory registration repository for tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryRegistrationRepository {
    registrations: RwLock<Vec<Registration>>,
}

impl InMemoryRegistrationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> RegistrationPersistenceError {
        RegistrationPersistenceError::query("registration store lock poisoned")
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn create(
        &self,
        registration: &Registration,
    ) -> Result<(), RegistrationPersistenceError> {
        let mut registrations = self.registrations.write().map_err(|_| Self::lock_err())?;
        registrations.push(registration.clone());
        Ok(())
    }

    async fn list_by_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, RegistrationPersistenceError> {
        let registrations = self.registrations.read().map_err(|_| Self::lock_err())?;
        let mut matching: Vec<Registration> = registrations
            .iter()
            .filter(|r| &r.event_id == event_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}
