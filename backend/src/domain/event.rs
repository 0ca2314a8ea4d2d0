//! Event aggregate: a listed sports event open for registration.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Stable event identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "7b1a85f6-5717-4562-b3fc-2c963f66afa6")]
pub struct EventId(Uuid);

impl EventId {
    /// Validate and construct an [`EventId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, EventValidationError> {
        let parsed =
            Uuid::parse_str(id.as_ref().trim()).map_err(|_| EventValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`EventId`].
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

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for EventId {
    type Error = EventValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validation errors returned by [`EventDraft::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// A required text field was blank.
    MissingField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Entry fee was negative.
    NegativeFee,
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "event id must be a valid UUID"),
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::NegativeFee => write!(f, "fee must not be negative"),
        }
    }
}

impl std::error::Error for EventValidationError {}

/// Validated input for creating an [`Event`].
///
/// The creator is never part of the draft: handlers record it from the
/// resolved identity so a payload cannot claim someone else's ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Sport discipline, e.g. "Football".
    pub sport: String,
    /// Host city.
    pub city: String,
    /// Start date as entered by the host.
    pub start: String,
    /// Participation type, e.g. "Team" or "Solo".
    pub participation_type: String,
    /// Entry fee in whole currency units; zero for free events.
    pub fee: i64,
    /// Prize description.
    pub prize: String,
    /// Optional banner image reference.
    pub banner: Option<String>,
    /// Organiser name shown on the listing.
    pub organiser: String,
    /// Optional requirements text.
    pub requirements: Option<String>,
    /// Optional payment-QR image reference.
    pub payment_qr: Option<String>,
    /// Optional external chat link for participants.
    pub chat_link: Option<String>,
    /// Ordered custom questions asked at registration.
    pub custom_questions: Vec<String>,
}

/// Parameters for [`EventDraft::try_new`]; mirrors the create-event form.
#[derive(Debug, Clone, Default)]
pub struct EventDraftParams {
    /// Event title.
    pub title: String,
    /// Sport discipline.
    pub sport: String,
    /// Host city.
    pub city: String,
    /// Start date.
    pub start: String,
    /// Participation type.
    pub participation_type: String,
    /// Entry fee in whole currency units.
    pub fee: i64,
    /// Prize description.
    pub prize: String,
    /// Optional banner image reference.
    pub banner: Option<String>,
    /// Organiser name.
    pub organiser: String,
    /// Optional requirements text.
    pub requirements: Option<String>,
    /// Optional payment-QR image reference.
    pub payment_qr: Option<String>,
    /// Optional external chat link.
    pub chat_link: Option<String>,
    /// Ordered custom questions.
    pub custom_questions: Vec<String>,
}

fn require(field: &'static str, value: String) -> Result<String, EventValidationError> {
    if value.trim().is_empty() {
        return Err(EventValidationError::MissingField { field });
    }
    Ok(value)
}

impl EventDraft {
    /// Validate the required listing fields and the fee sign.
    pub fn try_new(params: EventDraftParams) -> Result<Self, EventValidationError> {
        let EventDraftParams {
            title,
            sport,
            city,
            start,
            participation_type,
            fee,
            prize,
            banner,
            organiser,
            requirements,
            payment_qr,
            chat_link,
            custom_questions,
        } = params;

        if fee < 0 {
            return Err(EventValidationError::NegativeFee);
        }

        Ok(Self {
            title: require("title", title)?,
            sport: require("sport", sport)?,
            city: require("city", city)?,
            start: require("start", start)?,
            participation_type: require("type", participation_type)?,
            fee,
            prize: require("prize", prize)?,
            banner,
            organiser: require("org", organiser)?,
            requirements,
            payment_qr,
            chat_link,
            custom_questions,
        })
    }
}

/// A listed sports event.
///
/// ## Invariants
/// - `creator` is immutable once the event is created; events created before
///   ownership tracking have no creator at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Stable identifier.
    pub id: EventId,
    /// Listing fields supplied by the host.
    pub draft: EventDraft,
    /// Owning user, when the event was created by an authenticated host.
    pub creator: Option<UserId>,
    /// Listing creation time.
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Assemble a new event from a validated draft.
    pub fn create(draft: EventDraft, creator: Option<UserId>) -> Self {
        Self {
            id: EventId::random(),
            draft,
            creator,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn params() -> EventDraftParams {
        EventDraftParams {
            title: "City Cup".into(),
            sport: "Football".into(),
            city: "Pune".into(),
            start: "2026-09-01".into(),
            participation_type: "Team".into(),
            fee: 500,
            prize: "Trophy".into(),
            organiser: "City Sports Club".into(),
            ..EventDraftParams::default()
        }
    }

    #[test]
    fn draft_accepts_valid_params() {
        let draft = EventDraft::try_new(params()).expect("valid draft");
        assert_eq!(draft.fee, 500);
        assert!(draft.custom_questions.is_empty());
    }

    #[test]
    fn draft_rejects_negative_fee() {
        let mut p = params();
        p.fee = -1;
        assert_eq!(
            EventDraft::try_new(p).expect_err("negative fee"),
            EventValidationError::NegativeFee
        );
    }

    #[rstest]
    #[case("title")]
    #[case("sport")]
    #[case("city")]
    #[case("start")]
    #[case("type")]
    #[case("prize")]
    #[case("org")]
    fn draft_rejects_blank_required_fields(#[case] field: &'static str) {
        let mut p = params();
        match field {
            "title" => p.title = "  ".into(),
            "sport" => p.sport = String::new(),
            "city" => p.city = String::new(),
            "start" => p.start = String::new(),
            "type" => p.participation_type = String::new(),
            "prize" => p.prize = String::new(),
            _ => p.organiser = String::new(),
        }
        let err = EventDraft::try_new(p).expect_err("blank field");
        assert_eq!(err, EventValidationError::MissingField { field });
    }

    #[test]
    fn created_event_records_creator() {
        let creator = UserId::random();
        let event = Event::create(
            EventDraft::try_new(params()).expect("valid draft"),
            Some(creator.clone()),
        );
        assert_eq!(event.creator, Some(creator));
    }
}
