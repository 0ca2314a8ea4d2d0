//! Registration endpoints: public signup for an event and the host-only
//! registrant dashboard.
//!
//! ```text
//! POST /api/v1/events/{id}/register
//! GET  /api/v1/events/{id}/registrations
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    EventRepository as _, RegistrationPersistenceError, RegistrationRepository as _,
};
use crate::domain::{
    Error, QuestionAnswer, Registration, RegistrationDraft, RegistrationValidationError,
    ResolvedIdentity,
};

use super::events::map_event_persistence_error;
use super::state::HttpState;
use super::validation::{field_error, parse_event_id};
use super::ApiResult;

/// Registration request body; field names mirror the registration form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Registrant name.
    pub name: String,
    /// Registrant contact email.
    pub email: String,
    /// Optional contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional payment transaction reference.
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Optional payment-proof image reference.
    #[serde(default)]
    pub payment_screenshot: Option<String>,
    /// Ordered answers to the event's custom questions.
    #[serde(default)]
    pub answers: Vec<QuestionAnswer>,
}

/// Public view of a registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Stable identifier.
    pub id: String,
    /// Owning event id.
    pub event_id: String,
    /// Registrant name.
    pub name: String,
    /// Registrant contact email.
    pub email: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Optional payment transaction reference.
    pub transaction_id: Option<String>,
    /// Optional payment-proof image reference.
    pub payment_screenshot: Option<String>,
    /// Ordered answers to the event's custom questions.
    pub answers: Vec<QuestionAnswer>,
    /// Submission time (RFC 3339).
    pub created_at: String,
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id.to_string(),
            event_id: registration.event_id.to_string(),
            name: registration.draft.name.clone(),
            email: registration.draft.email.as_str().to_owned(),
            phone: registration.draft.phone.clone(),
            transaction_id: registration.draft.transaction_reference.clone(),
            payment_screenshot: registration.draft.payment_proof.clone(),
            answers: registration.draft.answers.clone(),
            created_at: registration.created_at.to_rfc3339(),
        }
    }
}

fn map_registration_persistence_error(error: RegistrationPersistenceError) -> Error {
    match error {
        RegistrationPersistenceError::Connection { message } => {
            Error::service_unavailable(message)
        }
        RegistrationPersistenceError::Query { message } => Error::internal(message),
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::MissingName => {
            field_error("name is required", "name", "missing_field")
        }
        RegistrationValidationError::InvalidEmail => {
            field_error("email address is invalid", "email", "invalid_email")
        }
        RegistrationValidationError::InvalidId => Error::invalid_request(err.to_string()),
    }
}

/// Register a participant for an event. Public: participants do not need an
/// account. The event must exist at submission time.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/register",
    params(("id" = String, Path, description = "Event identifier")),
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registration recorded", body = RegistrationResponse),
        (status = 400, description = "Validation failure", body = Error),
        (status = 404, description = "No such event", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "registerForEvent",
    security([])
)]
#[post("/events/{id}/register")]
pub async fn register_for_event(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<RegistrationResponse>> {
    let event_id = parse_event_id(path.as_str())?;
    state
        .events
        .find_by_id(&event_id)
        .await
        .map_err(map_event_persistence_error)?
        .ok_or_else(|| Error::not_found("event not found"))?;

    let payload = payload.into_inner();
    let draft = RegistrationDraft::try_new(
        &payload.name,
        &payload.email,
        payload.phone,
        payload.transaction_id,
        payload.payment_screenshot,
        payload.answers,
    )
    .map_err(map_registration_validation_error)?;

    let registration = Registration::create(event_id, draft);
    state
        .registrations
        .create(&registration)
        .await
        .map_err(map_registration_persistence_error)?;
    tracing::info!(registration_id = %registration.id, event_id = %event_id, "registration recorded");
    Ok(web::Json(RegistrationResponse::from(&registration)))
}

/// The host dashboard: registrations for one event, newest first.
///
/// Gated the same way as event deletion: the caller must be the recorded
/// host, with the same permissive rule for events that record no host.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/registrations",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Registrations, newest first", body = [RegistrationResponse]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not the host", body = Error),
        (status = 404, description = "No such event", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["registrations"],
    operation_id = "listRegistrations"
)]
#[get("/events/{id}/registrations")]
pub async fn list_registrations(
    state: web::Data<HttpState>,
    identity: ResolvedIdentity,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RegistrationResponse>>> {
    let event_id = parse_event_id(path.as_str())?;
    let event = state
        .events
        .find_by_id(&event_id)
        .await
        .map_err(map_event_persistence_error)?
        .ok_or_else(|| Error::not_found("event not found"))?;

    state
        .ownership
        .authorize_mutation(&identity, event.creator.as_ref())?;

    let registrations = state
        .registrations
        .list_by_event(&event_id)
        .await
        .map_err(map_registration_persistence_error)?;
    Ok(web::Json(
        registrations.iter().map(RegistrationResponse::from).collect(),
    ))
}
