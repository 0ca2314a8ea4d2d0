//! Ownership gate: may the acting user mutate an owned resource?

use super::error::Error;
use super::identity::ResolvedIdentity;
use super::user::UserId;

/// Policy applied when a resource carries no creator identifier.
///
/// The source system allowed anyone to mutate such "ungoverned" resources.
/// That behaviour is preserved behind [`OwnershipPolicy::allow_unowned_mutation`]
/// so deployments can tighten it without code changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipPolicy {
    /// Permit mutation of resources that record no creator.
    pub allow_unowned_mutation: bool,
}

impl Default for OwnershipPolicy {
    fn default() -> Self {
        Self {
            allow_unowned_mutation: true,
        }
    }
}

impl OwnershipPolicy {
    /// Authorise a mutation of a resource owned by `creator`.
    ///
    /// - Anonymous callers are rejected with `Unauthorized` before any
    ///   ownership comparison.
    /// - A recorded creator must equal the resolved identity, else
    ///   `Forbidden`.
    /// - A missing creator falls back to the policy flag.
    pub fn authorize_mutation(
        &self,
        identity: &ResolvedIdentity,
        creator: Option<&UserId>,
    ) -> Result<(), Error> {
        let Some(user_id) = identity.user_id() else {
            return Err(Error::unauthorized("login required"));
        };

        match creator {
            Some(owner) if owner == user_id => Ok(()),
            Some(_) => Err(Error::forbidden("you are not the host of this event")),
            None if self.allow_unowned_mutation => Ok(()),
            None => Err(Error::forbidden("this event records no host")),
        }
    }
}
