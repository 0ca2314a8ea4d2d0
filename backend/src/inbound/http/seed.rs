//! Demo-data seeding endpoint, enabled by the `example-data` feature.
//!
//! Populates users, events, and registrations from a deterministic seed so
//! demo deployments always show the same believable listings.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    EventRepository as _, RegistrationRepository as _, UserRepository as _,
};
use crate::domain::{
    DisplayName, Email, Error, Event, EventDraft, EventDraftParams, QuestionAnswer, Registration,
    RegistrationDraft,
};

use super::events::map_event_persistence_error;
use super::state::HttpState;
use super::ApiResult;

/// Seed request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SeedRequest {
    /// Seed name; the same name always produces the same data.
    #[serde(default = "default_seed_name")]
    pub seed: String,
    /// Number of events to generate.
    #[serde(default = "default_event_count")]
    pub events: usize,
}

fn default_seed_name() -> String {
    "kickoff".to_owned()
}

fn default_event_count() -> usize {
    6
}

/// Counts of seeded records.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    /// Users inserted.
    pub users: usize,
    /// Events inserted.
    pub events: usize,
    /// Registrations inserted.
    pub registrations: usize,
}

/// Populate demo users, events, and registrations.
#[utoipa::path(
    post,
    path = "/api/v1/seed",
    request_body = SeedRequest,
    responses(
        (status = 200, description = "Demo data inserted", body = SeedResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["seed"],
    operation_id = "seedDemoData",
    security([])
)]
#[post("/seed")]
pub async fn seed_demo_data(
    state: web::Data<HttpState>,
    payload: web::Json<SeedRequest>,
) -> ApiResult<web::Json<SeedResponse>> {
    let payload = payload.into_inner();
    let demo = example_data::generate_demo_data(&payload.seed, payload.events)
        .map_err(|err| Error::internal(format!("demo data generation failed: {err}")))?;

    let mut users = 0usize;
    let mut hosts = Vec::with_capacity(demo.users.len());
    for demo_user in &demo.users {
        let email = Email::new(&demo_user.email)
            .map_err(|err| Error::internal(format!("generated email invalid: {err}")))?;
        let name = DisplayName::new(demo_user.name.clone())
            .map_err(|err| Error::internal(format!("generated name invalid: {err}")))?;
        let user = crate::domain::User {
            id: crate::domain::UserId::random(),
            email: email.clone(),
            name,
            password_hash: None,
            avatar: None,
            provider: crate::domain::Provider::Credentials,
            created_at: chrono::Utc::now(),
        };
        match state.users.create(&user).await {
            Ok(()) => {
                users += 1;
                hosts.push(user.id);
            }
            // Seeding twice is fine: existing demo accounts are reused.
            Err(crate::domain::ports::UserPersistenceError::DuplicateEmail) => {
                if let Ok(Some(existing)) = state.users.find_by_email(&email).await {
                    hosts.push(existing.id);
                }
            }
            Err(other) => return Err(Error::internal(format!("seed user insert failed: {other}"))),
        }
    }

    let mut events = 0usize;
    let mut registrations = 0usize;
    for (index, demo_event) in demo.events.iter().enumerate() {
        let draft = EventDraft::try_new(EventDraftParams {
            title: demo_event.title.clone(),
            sport: demo_event.sport.clone(),
            city: demo_event.city.clone(),
            start: demo_event.start.clone(),
            participation_type: demo_event.participation_type.clone(),
            fee: demo_event.fee,
            prize: demo_event.prize.clone(),
            organiser: demo_event.organiser.clone(),
            custom_questions: demo_event.custom_questions.clone(),
            ..EventDraftParams::default()
        })
        .map_err(|err| Error::internal(format!("generated event invalid: {err}")))?;

        let creator = hosts.get(index % hosts.len().max(1)).cloned();
        let event = Event::create(draft, creator);
        state
            .events
            .create(&event)
            .await
            .map_err(map_event_persistence_error)?;
        events += 1;

        for demo_registration in demo.registrations.iter().filter(|r| r.event_index == index) {
            let answers = demo_registration
                .answers
                .iter()
                .map(|(question, answer)| QuestionAnswer {
                    question: question.clone(),
                    answer: answer.clone(),
                })
                .collect();
            let draft = RegistrationDraft::try_new(
                &demo_registration.name,
                &demo_registration.email,
                None,
                None,
                None,
                answers,
            )
            .map_err(|err| Error::internal(format!("generated registration invalid: {err}")))?;
            state
                .registrations
                .create(&Registration::create(event.id, draft))
                .await
                .map_err(|err| Error::internal(format!("seed registration insert failed: {err}")))?;
            registrations += 1;
        }
    }

    tracing::info!(users, events, registrations, seed = %payload.seed, "demo data seeded");
    Ok(web::Json(SeedResponse {
        users,
        events,
        registrations,
    }))
}
