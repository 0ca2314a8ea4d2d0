//! Event endpoints: public listing and lookup, authenticated hosting, and
//! ownership-gated deletion.
//!
//! ```text
//! GET    /api/v1/events
//! POST   /api/v1/events
//! GET    /api/v1/events/mine
//! GET    /api/v1/events/{id}
//! DELETE /api/v1/events/{id}
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{EventPersistenceError, EventRepository as _};
use crate::domain::{
    Error, Event, EventDraft, EventDraftParams, EventValidationError, ResolvedIdentity,
};

use super::state::HttpState;
use super::validation::{field_error, parse_event_id};
use super::ApiResult;

/// Create-event request body; field names mirror the hosting form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    /// Event title.
    pub title: String,
    /// Sport discipline.
    pub sport: String,
    /// Host city.
    pub city: String,
    /// Start date.
    pub start: String,
    /// Participation type.
    #[serde(rename = "type")]
    pub participation_type: String,
    /// Entry fee in whole currency units.
    pub fee: i64,
    /// Prize description.
    pub prize: String,
    /// Optional banner image reference.
    #[serde(default)]
    pub banner: Option<String>,
    /// Organiser name.
    pub org: String,
    /// Optional requirements text.
    #[serde(default)]
    pub requirements: Option<String>,
    /// Optional payment-QR image reference.
    #[serde(default)]
    pub qr_code: Option<String>,
    /// Optional participant chat link.
    #[serde(default)]
    pub whatsapp_link: Option<String>,
    /// Ordered custom questions asked at registration.
    #[serde(default)]
    pub custom_questions: Vec<String>,
}

/// Public view of an event listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    /// Stable identifier.
    pub id: String,
    /// Event title.
    pub title: String,
    /// Sport discipline.
    pub sport: String,
    /// Host city.
    pub city: String,
    /// Start date.
    pub start: String,
    /// Participation type.
    #[serde(rename = "type")]
    pub participation_type: String,
    /// Entry fee in whole currency units.
    pub fee: i64,
    /// Prize description.
    pub prize: String,
    /// Optional banner image reference.
    pub banner: Option<String>,
    /// Organiser name.
    pub org: String,
    /// Optional requirements text.
    pub requirements: Option<String>,
    /// Optional payment-QR image reference.
    pub qr_code: Option<String>,
    /// Optional participant chat link.
    pub whatsapp_link: Option<String>,
    /// Ordered custom questions asked at registration.
    pub custom_questions: Vec<String>,
    /// Owning user id, when the event records a host.
    pub creator_id: Option<String>,
    /// Listing creation time (RFC 3339).
    pub created_at: String,
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.draft.title.clone(),
            sport: event.draft.sport.clone(),
            city: event.draft.city.clone(),
            start: event.draft.start.clone(),
            participation_type: event.draft.participation_type.clone(),
            fee: event.draft.fee,
            prize: event.draft.prize.clone(),
            banner: event.draft.banner.clone(),
            org: event.draft.organiser.clone(),
            requirements: event.draft.requirements.clone(),
            qr_code: event.draft.payment_qr.clone(),
            whatsapp_link: event.draft.chat_link.clone(),
            custom_questions: event.draft.custom_questions.clone(),
            creator_id: event.creator.as_ref().map(ToString::to_string),
            created_at: event.created_at.to_rfc3339(),
        }
    }
}

pub(crate) fn map_event_persistence_error(error: EventPersistenceError) -> Error {
    match error {
        EventPersistenceError::Connection { message } => Error::service_unavailable(message),
        EventPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_event_validation_error(err: EventValidationError) -> Error {
    match err {
        EventValidationError::NegativeFee => {
            field_error("fee must not be negative", "fee", "negative_fee")
        }
        EventValidationError::MissingField { field } => {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": field, "code": "missing_field" }))
        }
        EventValidationError::InvalidId => Error::invalid_request(err.to_string()),
    }
}

/// List all events, newest first. Public.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "Events, newest first", body = [EventResponse]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents",
    security([])
)]
#[get("/events")]
pub async fn list_events(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let events = state
        .events
        .list_all()
        .await
        .map_err(map_event_persistence_error)?;
    Ok(web::Json(events.iter().map(EventResponse::from).collect()))
}

/// Create an event owned by the caller.
///
/// The creator id is recorded from the resolved identity, never from the
/// payload, so a request cannot claim someone else's ownership.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventRequest,
    responses(
        (status = 200, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation failure", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent"
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    identity: ResolvedIdentity,
    payload: web::Json<CreateEventRequest>,
) -> ApiResult<web::Json<EventResponse>> {
    let Some(creator) = identity.user_id().cloned() else {
        return Err(Error::unauthorized("login required"));
    };

    let payload = payload.into_inner();
    let draft = EventDraft::try_new(EventDraftParams {
        title: payload.title,
        sport: payload.sport,
        city: payload.city,
        start: payload.start,
        participation_type: payload.participation_type,
        fee: payload.fee,
        prize: payload.prize,
        banner: payload.banner,
        organiser: payload.org,
        requirements: payload.requirements,
        payment_qr: payload.qr_code,
        chat_link: payload.whatsapp_link,
        custom_questions: payload.custom_questions,
    })
    .map_err(map_event_validation_error)?;

    let event = Event::create(draft, Some(creator));
    state
        .events
        .create(&event)
        .await
        .map_err(map_event_persistence_error)?;
    tracing::info!(event_id = %event.id, "event created");
    Ok(web::Json(EventResponse::from(&event)))
}

/// Events created by the caller, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/events/mine",
    responses(
        (status = 200, description = "Caller's events, newest first", body = [EventResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "myEvents"
)]
#[get("/events/mine")]
pub async fn my_events(
    state: web::Data<HttpState>,
    identity: ResolvedIdentity,
) -> ApiResult<web::Json<Vec<EventResponse>>> {
    let Some(user_id) = identity.user_id() else {
        return Err(Error::unauthorized("login required"));
    };
    let events = state
        .events
        .list_by_creator(user_id)
        .await
        .map_err(map_event_persistence_error)?;
    Ok(web::Json(events.iter().map(EventResponse::from).collect()))
}

/// Fetch one event. Public.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "The event", body = EventResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 404, description = "No such event", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEvent",
    security([])
)]
#[get("/events/{id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventResponse>> {
    let id = parse_event_id(path.as_str())?;
    let event = state
        .events
        .find_by_id(&id)
        .await
        .map_err(map_event_persistence_error)?
        .ok_or_else(|| Error::not_found("event not found"))?;
    Ok(web::Json(EventResponse::from(&event)))
}

/// Delete an event through the ownership gate.
///
/// The delete itself is idempotent at the store level: two concurrent
/// deletes both re-validate ownership and both complete; the loser's
/// delete-by-id is a no-op.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event deleted"),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not the host", body = Error),
        (status = 404, description = "No such event", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent"
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    identity: ResolvedIdentity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_event_id(path.as_str())?;
    let event = state
        .events
        .find_by_id(&id)
        .await
        .map_err(map_event_persistence_error)?
        .ok_or_else(|| Error::not_found("event not found"))?;

    state
        .ownership
        .authorize_mutation(&identity, event.creator.as_ref())?;

    state
        .events
        .delete_by_id(&id)
        .await
        .map_err(map_event_persistence_error)?;
    tracing::info!(event_id = %id, "event deleted");
    Ok(HttpResponse::Ok().json(json!({ "message": "event deleted" })))
}
