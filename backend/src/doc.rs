//! OpenAPI document exposed by Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, QuestionAnswer};
use crate::inbound::http::auth::{
    AuthResponse, LoginRequest, MeResponse, SignupRequest, UserDto,
};
use crate::inbound::http::events::{CreateEventRequest, EventResponse};
use crate::inbound::http::payment::{CreateOrderRequest, OrderResponse};
use crate::inbound::http::registrations::{RegisterRequest, RegistrationResponse};

/// Public OpenAPI surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::google_callback,
        crate::inbound::http::events::list_events,
        crate::inbound::http::events::create_event,
        crate::inbound::http::events::my_events,
        crate::inbound::http::events::get_event,
        crate::inbound::http::events::delete_event,
        crate::inbound::http::registrations::register_for_event,
        crate::inbound::http::registrations::list_registrations,
        crate::inbound::http::payment::create_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SignupRequest,
        LoginRequest,
        UserDto,
        AuthResponse,
        MeResponse,
        CreateEventRequest,
        EventResponse,
        RegisterRequest,
        RegistrationResponse,
        QuestionAnswer,
        CreateOrderRequest,
        OrderResponse,
    )),
    tags(
        (name = "auth", description = "Signup, login, and identity"),
        (name = "events", description = "Event listings and hosting"),
        (name = "registrations", description = "Participant registration"),
        (name = "payment", description = "Payment gateway orders"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn document_includes_the_core_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/auth/signup",
            "/api/v1/auth/login",
            "/api/v1/events",
            "/api/v1/events/{id}",
            "/api/v1/events/{id}/register",
            "/api/v1/payment/order",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}; have {paths:?}"
            );
        }
    }
}
