//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, SettingsError};

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::identity::IdentityResolver;
use crate::inbound::http::{auth, events, payment, registrations};
use crate::middleware::{RateLimit, RouteGuard, SecurityHeaders, Trace};
use crate::middleware::security_headers::DEFAULT_CONTENT_SECURITY_POLICY;

use state_builders::{build_counter_store, build_http_state};

/// Cookie session middleware shared by production wiring and tests.
pub fn session_middleware(
    key: Key,
    cookie_secure: bool,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Load the session key from the configured file, generating an ephemeral
/// key in debug builds when none is available.
fn load_session_key(settings: &AppSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file.as_deref();
    match key_path.map(std::fs::read) {
        Some(Ok(bytes)) => Ok(Key::derive_from(&bytes)),
        other => {
            if cfg!(debug_assertions) {
                if let Some(Err(error)) = other {
                    warn!(%error, "session key unreadable; using a temporary key (dev only)");
                } else {
                    warn!("no session key file configured; using a temporary key (dev only)");
                }
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(
                    "session key file is required in release builds; set PITCHSIDE_SESSION_KEY_FILE",
                ))
            }
        }
    }
}

/// First hex characters of the secret's SHA-256, for startup logs.
fn secret_fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    let mut fingerprint = hex::encode(digest);
    fingerprint.truncate(12);
    fingerprint
}

/// Build every dependency and run the HTTP server until shutdown.
pub async fn run(settings: AppSettings) -> std::io::Result<()> {
    let token_secret = settings
        .require_token_secret()
        .map_err(|err| std::io::Error::other(err.to_string()))?
        .to_owned();
    info!(
        fingerprint = %secret_fingerprint(&token_secret),
        "token signing secret loaded"
    );

    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let key = load_session_key(&settings)?;
    let cookie_secure = settings.cookie_secure();
    let rate_limit = settings.rate_limit();
    let guard_config = settings.route_guard();
    let csp: std::sync::Arc<str> = settings
        .content_security_policy
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_SECURITY_POLICY)
        .into();

    let (state, tokens) = build_http_state(&settings, &token_secret).await?;
    let counter_store = build_counter_store(&settings).await;

    let state_data = web::Data::new(state);
    let resolver_data = web::Data::new(IdentityResolver::standard(tokens.clone()));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone(), cookie_secure))
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
            .service(payment::create_order);

        #[cfg(feature = "example-data")]
        let api = api.service(crate::inbound::http::seed::seed_demo_data);

        let app = App::new()
            .app_data(state_data.clone())
            .app_data(resolver_data.clone())
            .app_data(server_health_state.clone())
            .wrap(RouteGuard::new(guard_config.clone(), tokens.clone()))
            .wrap(SecurityHeaders::new(csp.clone()))
            .wrap(RateLimit::new(rate_limit, counter_store.clone()))
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}")
                .url("/api-docs/openapi.json", crate::doc::ApiDoc::openapi()),
        );

        app
    })
    .bind(bind_addr)?;

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    server.run().await
}
