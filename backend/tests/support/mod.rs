//! Shared harness for HTTP integration tests.
//!
//! Builds the API the way the server wires it, but over in-memory
//! repositories and an ephemeral session key, so suites run without any
//! infrastructure.
//
// Each suite uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{test, web, App};
use serde_json::json;

use backend::domain::ports::{
    FixturePaymentGateway, FixtureFederatedAuthGateway, FederatedProfile,
    InMemoryEventRepository, InMemoryRegistrationRepository, InMemoryUserRepository, TokenCodec,
};
use backend::domain::{
    CredentialService, DisplayName, Email, FederatedProvisioner, OwnershipPolicy,
};
use backend::inbound::http::identity::IdentityResolver;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{auth, events, payment, registrations};
use backend::outbound::security::{Argon2PasswordHasher, Hs256TokenCodec};

/// Signing secret shared by every integration suite.
pub const TEST_SECRET: &str = "integration-test-secret";

/// Handles to the app state plus the concrete in-memory stores, so tests can
/// seed data behind the API's back.
pub struct TestHarness {
    pub state: HttpState,
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<InMemoryEventRepository>,
    pub registrations: Arc<InMemoryRegistrationRepository>,
    pub tokens: Arc<dyn TokenCodec>,
}

/// Harness with the default (permissive) ownership policy.
pub fn harness() -> TestHarness {
    harness_with_policy(OwnershipPolicy::default())
}

/// Harness with an explicit ownership policy.
pub fn harness_with_policy(ownership: OwnershipPolicy) -> TestHarness {
    let users = Arc::new(InMemoryUserRepository::new());
    let events = Arc::new(InMemoryEventRepository::new());
    let registrations = Arc::new(InMemoryRegistrationRepository::new());
    let tokens: Arc<dyn TokenCodec> = Arc::new(Hs256TokenCodec::new(TEST_SECRET));

    let fixture_profile = FederatedProfile {
        email: Email::new("fed@example.com").expect("fixture email"),
        name: DisplayName::new("Fed Erated").expect("fixture name"),
        avatar: None,
    };

    let state = HttpState {
        credentials: CredentialService::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher),
            tokens.clone(),
        ),
        provisioner: FederatedProvisioner::new(users.clone()),
        federated_auth: Arc::new(FixtureFederatedAuthGateway::new(fixture_profile)),
        users: users.clone(),
        events: events.clone(),
        registrations: registrations.clone(),
        payments: Arc::new(FixturePaymentGateway),
        ownership,
    };

    TestHarness {
        state,
        users,
        events,
        registrations,
        tokens,
    }
}

fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// The API application as the server wires it, minus app-level middleware.
pub fn api_app(
    harness: &TestHarness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(harness.state.clone()))
        .app_data(web::Data::new(IdentityResolver::standard(
            harness.tokens.clone(),
        )))
        .service(
            web::scope("/api/v1")
                .wrap(session_middleware())
                .service(auth::signup)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::me)
                .service(auth::google_callback)
                .service(events::list_events)
                .service(events::create_event)
                .service(events::my_events)
                .service(events::get_event)
                .service(events::delete_event)
                .service(registrations::register_for_event)
                .service(registrations::list_registrations)
                .service(payment::create_order),
        )
}

/// POST `/api/v1/auth/signup` and return the raw response.
pub async fn signup(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> ServiceResponse<BoxBody> {
    let request = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({ "name": name, "email": email, "password": password }))
        .to_request();
    test::call_service(app, request).await
}

/// Pull the `token` cookie out of a signup/login response.
pub fn token_cookie(res: &ServiceResponse<BoxBody>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "token")
        .expect("token cookie set")
        .into_owned()
}
