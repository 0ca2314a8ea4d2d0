//! Federated sign-in hook: provision a local account on first login.

use std::sync::Arc;

use chrono::Utc;

use super::error::Error;
use super::ports::{FederatedProfile, UserPersistenceError, UserRepository};
use super::user::{Provider, User, UserId};

/// Provisions local accounts for federated logins.
///
/// Idempotent under concurrent duplicate logins: the store's unique email
/// constraint is the invariant guard, and a duplicate-key insert is read
/// back as "already provisioned" instead of erroring.
#[derive(Clone)]
pub struct FederatedProvisioner {
    users: Arc<dyn UserRepository>,
}

impl FederatedProvisioner {
    /// Create a provisioner over the given user repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Return the local account for `profile`, creating it on first login.
    ///
    /// Existing records are left untouched; name and avatar are not
    /// re-synced on subsequent logins.
    pub async fn provision(&self, profile: &FederatedProfile) -> Result<User, Error> {
        if let Some(existing) = self
            .users
            .find_by_email(&profile.email)
            .await
            .map_err(map_persistence_error)?
        {
            return Ok(existing);
        }

        let user = User {
            id: UserId::random(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            password_hash: None,
            avatar: profile.avatar.clone(),
            provider: Provider::Google,
            created_at: Utc::now(),
        };

        match self.users.create(&user).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "federated account provisioned");
                Ok(user)
            }
            // Lost the race to a concurrent login for the same email: the
            // existing record wins.
            Err(UserPersistenceError::DuplicateEmail) => self
                .users
                .find_by_email(&profile.email)
                .await
                .map_err(map_persistence_error)?
                .ok_or_else(|| {
                    Error::internal("account vanished after duplicate-email insert")
                }),
            Err(other) => Err(map_persistence_error(other)),
        }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
        UserPersistenceError::DuplicateEmail => {
            Error::internal("unexpected duplicate-email error outside insert")
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ports::InMemoryUserRepository;
    use crate::domain::{DisplayName, Email};

    fn profile() -> FederatedProfile {
        FederatedProfile {
            email: Email::new("fed@example.com").expect("email"),
            name: DisplayName::new("Fed Erated").expect("name"),
            avatar: Some("https://example.com/avatar.png".into()),
        }
    }

    #[tokio::test]
    async fn first_login_creates_a_passwordless_google_account() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let provisioner = FederatedProvisioner::new(repo.clone());

        let user = provisioner.provision(&profile()).await.expect("provision");
        assert_eq!(user.provider, Provider::Google);
        assert!(user.password_hash.is_none());
        assert_eq!(user.avatar.as_deref(), Some("https://example.com/avatar.png"));
    }

    #[tokio::test]
    async fn second_login_returns_the_existing_record_untouched() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let provisioner = FederatedProvisioner::new(repo.clone());

        let first = provisioner.provision(&profile()).await.expect("provision");

        let mut changed = profile();
        changed.name = DisplayName::new("Renamed").expect("name");
        let second = provisioner.provision(&changed).await.expect("provision");

        assert_eq!(second.id, first.id);
        assert_eq!(second.name.as_str(), "Fed Erated");
    }

    /// Repository that reports "not found" before insert but then rejects the
    /// insert with a duplicate-key error, simulating a concurrent login that
    /// won the race between the read and the write.
    struct RacingRepository {
        inner: InMemoryUserRepository,
        hide_first_read: Mutex<bool>,
        racing_user: User,
    }

    #[async_trait]
    impl UserRepository for RacingRepository {
        async fn create(&self, _user: &User) -> Result<(), UserPersistenceError> {
            Err(UserPersistenceError::DuplicateEmail)
        }

        async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_email(
            &self,
            email: &Email,
        ) -> Result<Option<User>, UserPersistenceError> {
            let mut hide = self.hide_first_read.lock().map_err(|_| {
                UserPersistenceError::query("lock poisoned")
            })?;
            if *hide {
                *hide = false;
                return Ok(None);
            }
            if &self.racing_user.email == email {
                return Ok(Some(self.racing_user.clone()));
            }
            Ok(None)
        }
    }

    #[tokio::test]
    async fn duplicate_insert_race_resolves_to_the_winning_record() {
        let winner = User {
            id: UserId::random(),
            email: Email::new("fed@example.com").expect("email"),
            name: DisplayName::new("Winner").expect("name"),
            password_hash: None,
            avatar: None,
            provider: Provider::Google,
            created_at: Utc::now(),
        };
        let repo = Arc::new(RacingRepository {
            inner: InMemoryUserRepository::new(),
            hide_first_read: Mutex::new(true),
            racing_user: winner.clone(),
        });

        let provisioner = FederatedProvisioner::new(repo);
        let resolved = provisioner.provision(&profile()).await.expect("provision");
        assert_eq!(resolved.id, winner.id);
    }
}
