//! Registration aggregate: a participant's entry for an event.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::event::EventId;
use super::user::{Email, UserValidationError};

/// Stable registration identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "9c2b85f6-5717-4562-b3fc-2c963f66afa6")]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generate a new random [`RegistrationId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an already-parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RegistrationId> for String {
    fn from(value: RegistrationId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for RegistrationId {
    type Error = RegistrationValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let parsed =
            Uuid::parse_str(value.trim()).map_err(|_| RegistrationValidationError::InvalidId)?;
        Ok(Self(parsed))
    }
}

/// Validation errors returned by [`RegistrationDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// Registrant name was blank.
    MissingName,
    /// Registrant email failed the basic pattern check.
    InvalidEmail,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "registration id must be a valid UUID"),
            Self::MissingName => write!(f, "name is required"),
            Self::InvalidEmail => write!(f, "email address is invalid"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// One answered custom question, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    /// The host's question, verbatim.
    pub question: String,
    /// The participant's answer.
    pub answer: String,
}

/// Validated input for creating a [`Registration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDraft {
    /// Registrant name.
    pub name: String,
    /// Registrant contact email.
    pub email: Email,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Optional payment transaction reference.
    pub transaction_reference: Option<String>,
    /// Optional payment-proof image reference.
    pub payment_proof: Option<String>,
    /// Ordered answers to the event's custom questions.
    pub answers: Vec<QuestionAnswer>,
}

impl RegistrationDraft {
    /// Validate registrant contact details.
    pub fn try_new(
        name: &str,
        email: &str,
        phone: Option<String>,
        transaction_reference: Option<String>,
        payment_proof: Option<String>,
        answers: Vec<QuestionAnswer>,
    ) -> Result<Self, RegistrationValidationError> {
        if name.trim().is_empty() {
            return Err(RegistrationValidationError::MissingName);
        }
        let email = Email::new(email).map_err(|err| match err {
            UserValidationError::InvalidEmail => RegistrationValidationError::InvalidEmail,
            _ => RegistrationValidationError::InvalidEmail,
        })?;
        Ok(Self {
            name: name.trim().to_owned(),
            email,
            phone,
            transaction_reference,
            payment_proof,
            answers,
        })
    }
}

/// A participant's entry for an event.
///
/// ## Invariants
/// - References an event that existed at creation time; the reference may
///   later dangle if the event is deleted (orphaned registrations are
///   accepted).
/// - Never updated or deleted by the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Stable identifier.
    pub id: RegistrationId,
    /// Owning event.
    pub event_id: EventId,
    /// Validated registrant details and answers.
    pub draft: RegistrationDraft,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Assemble a new registration from a validated draft.
    pub fn create(event_id: EventId, draft: RegistrationDraft) -> Self {
        Self {
            id: RegistrationId::random(),
            event_id,
            draft,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "p@example.com", RegistrationValidationError::MissingName)]
    #[case("   ", "p@example.com", RegistrationValidationError::MissingName)]
    #[case("Priya", "nope", RegistrationValidationError::InvalidEmail)]
    fn draft_rejects_invalid_contacts(
        #[case] name: &str,
        #[case] email: &str,
        #[case] expected: RegistrationValidationError,
    ) {
        let err = RegistrationDraft::try_new(name, email, None, None, None, Vec::new())
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn draft_preserves_answer_order() {
        let answers = vec![
            QuestionAnswer {
                question: "Jersey size?".into(),
                answer: "M".into(),
            },
            QuestionAnswer {
                question: "Position?".into(),
                answer: "Keeper".into(),
            },
        ];
        let draft =
            RegistrationDraft::try_new("Priya", "p@example.com", None, None, None, answers.clone())
                .expect("valid draft");
        assert_eq!(draft.answers, answers);
    }
}
