//! Port abstraction for event persistence adapters and their errors.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Event, EventId, UserId};

/// Persistence errors raised by event repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventPersistenceError {
    /// Repository connection could not be established.
    #[error("event repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("event repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl EventPersistenceError {
    /// Create an [`EventPersistenceError::Connection`] with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an [`EventPersistenceError::Query`] with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Event persistence port.
///
/// `delete_by_id` is idempotent at the store level: deleting an id that no
/// longer exists reports `false`, never an error, so two concurrent deletes
/// both complete.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event.
    async fn create(&self, event: &Event) -> Result<(), EventPersistenceError>;

    /// Fetch one event by identifier.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventPersistenceError>;

    /// All events, newest first.
    async fn list_all(&self) -> Result<Vec<Event>, EventPersistenceError>;

    /// Events created by `creator`, newest first.
    async fn list_by_creator(&self, creator: &UserId)
        -> Result<Vec<Event>, EventPersistenceError>;

    /// Delete by identifier; `false` when no row matched.
    async fn delete_by_id(&self, id: &EventId) -> Result<bool, EventPersistenceError>;
}

/// In-memory event repository for tests and database-less runs.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<Vec<Event>>,
}

impl InMemoryEventRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> EventPersistenceError {
        EventPersistenceError::query("event store lock poisoned")
    }

    fn newest_first(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, event: &Event) -> Result<(), EventPersistenceError> {
        let mut events = self.events.write().map_err(|_| Self::lock_err())?;
        events.push(event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventPersistenceError> {
        let events = self.events.read().map_err(|_| Self::lock_err())?;
        Ok(events.iter().find(|e| &e.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Event>, EventPersistenceError> {
        let events = self.events.read().map_err(|_| Self::lock_err())?;
        Ok(Self::newest_first(events.clone()))
    }

    async fn list_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Event>, EventPersistenceError> {
        let events = self.events.read().map_err(|_| Self::lock_err())?;
        Ok(Self::newest_first(
            events
                .iter()
                .filter(|e| e.creator.as_ref() == Some(creator))
                .cloned()
                .collect(),
        ))
    }

    async fn delete_by_id(&self, id: &EventId) -> Result<bool, EventPersistenceError> {
        let mut events = self.events.write().map_err(|_| Self::lock_err())?;
        let before = events.len();
        events.retain(|e| &e.id != id);
        Ok(events.len() < before)
    }
}
