//! Request-scoped resolved identity.

use super::user::UserId;

/// The acting user for a single request, determined by trying the available
/// identity sources in priority order. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIdentity {
    /// A verified user identifier from one of the identity providers.
    User(UserId),
    /// No identity source produced a verified user.
    Anonymous,
}

impl ResolvedIdentity {
    /// The resolved user id, when present.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::User(id) => Some(id),
            Self::Anonymous => None,
        }
    }

    /// Whether any identity source matched.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl From<Option<UserId>> for ResolvedIdentity {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::User)
    }
}
