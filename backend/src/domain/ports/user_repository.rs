//! Port abstraction for user persistence adapters and their errors.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::{Email, User, UserId};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// The unique email constraint rejected an insert.
    #[error("an account already exists for this email")]
    DuplicateEmail,
}

impl UserPersistenceError {
    /// Create a [`UserPersistenceError::Connection`] with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a [`UserPersistenceError::Query`] with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// User persistence port.
///
/// `create` relies on the store's unique constraint on email as the true
/// invariant guard: callers must treat [`UserPersistenceError::DuplicateEmail`]
/// as "account already exists", never as a fatal failure.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user record.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by unique email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory user repository for tests and database-less runs.
///
/// Enforces the unique-email constraint the way the real store does, so the
/// provisioning race-handling paths are exercisable without PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err() -> UserPersistenceError {
        UserPersistenceError::query("user store lock poisoned")
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(|_| Self::lock_err())?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(UserPersistenceError::DuplicateEmail);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| Self::lock_err())?;
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| Self::lock_err())?;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }
}
