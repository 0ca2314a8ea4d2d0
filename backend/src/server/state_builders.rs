//! Build handler state from configuration.
//!
//! Database-backed adapters are used when a database URL is configured;
//! otherwise the in-memory implementations serve requests, which keeps
//! local development and tests free of infrastructure.

use std::sync::Arc;

use diesel::Connection;
use diesel_migrations::MigrationHarness;
use tracing::{info, warn};

use crate::domain::ports::{
    CounterStore, EventRepository, FederatedAuthGateway, InMemoryCounterStore,
    InMemoryEventRepository, InMemoryRegistrationRepository, InMemoryUserRepository,
    PaymentGateway, RegistrationRepository, TokenCodec, UserRepository,
};
use crate::domain::{CredentialService, FederatedProvisioner};
use crate::inbound::http::state::HttpState;
use crate::outbound::counters::RedisCounterStore;
use crate::outbound::oauth::{
    GoogleAuthGateway, GoogleOAuthConfig, UnconfiguredFederatedAuthGateway,
};
use crate::outbound::payment::{RazorpayGateway, UnconfiguredPaymentGateway};
use crate::outbound::persistence::{
    DbPool, DieselEventRepository, DieselRegistrationRepository, DieselUserRepository, PoolConfig,
    MIGRATIONS,
};
use crate::outbound::security::{Argon2PasswordHasher, Hs256TokenCodec};

use super::config::AppSettings;

/// Repository bundle, either database-backed or in-memory.
struct Repositories {
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = diesel::PgConnection::establish(&url)
            .map_err(|err| std::io::Error::other(format!("database connection failed: {err}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))
    })
    .await
    .map_err(|err| std::io::Error::other(format!("migration task panicked: {err}")))?
}

async fn build_repositories(settings: &AppSettings) -> std::io::Result<Repositories> {
    match settings.database_url.as_deref() {
        Some(url) => {
            run_migrations(url).await?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            info!("persistence: PostgreSQL");
            Ok(Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                events: Arc::new(DieselEventRepository::new(pool.clone())),
                registrations: Arc::new(DieselRegistrationRepository::new(pool)),
            })
        }
        None => {
            warn!("no database configured; using in-memory repositories (data is lost on restart)");
            Ok(Repositories {
                users: Arc::new(InMemoryUserRepository::new()),
                events: Arc::new(InMemoryEventRepository::new()),
                registrations: Arc::new(InMemoryRegistrationRepository::new()),
            })
        }
    }
}

fn build_payment_gateway(settings: &AppSettings) -> Arc<dyn PaymentGateway> {
    match (
        settings.payment_key_id.as_deref(),
        settings.payment_key_secret.as_deref(),
    ) {
        (Some(key_id), Some(key_secret)) => Arc::new(RazorpayGateway::new(key_id, key_secret)),
        _ => {
            warn!("payment gateway credentials absent; order creation is disabled");
            Arc::new(UnconfiguredPaymentGateway)
        }
    }
}

fn build_federated_auth(settings: &AppSettings) -> Arc<dyn FederatedAuthGateway> {
    match (
        settings.google_client_id.as_deref(),
        settings.google_client_secret.as_deref(),
        settings.google_redirect_uri.as_deref(),
    ) {
        (Some(client_id), Some(client_secret), Some(redirect_uri)) => {
            Arc::new(GoogleAuthGateway::new(GoogleOAuthConfig {
                client_id: client_id.to_owned(),
                client_secret: client_secret.to_owned(),
                redirect_uri: redirect_uri.to_owned(),
            }))
        }
        _ => {
            warn!("Google OAuth credentials absent; federated login is disabled");
            Arc::new(UnconfiguredFederatedAuthGateway)
        }
    }
}

/// Build the counter store backing the rate limiter.
pub(super) async fn build_counter_store(settings: &AppSettings) -> Arc<dyn CounterStore> {
    match settings.rate_limit_redis_url.as_deref() {
        Some(url) => match RedisCounterStore::connect(url).await {
            Ok(store) => {
                info!("rate limiting: Redis-backed counters");
                Arc::new(store)
            }
            Err(error) => {
                warn!(%error, "Redis unavailable; falling back to in-memory counters");
                Arc::new(InMemoryCounterStore::new())
            }
        },
        None => Arc::new(InMemoryCounterStore::new()),
    }
}

/// Assemble handler state and the shared token codec.
pub(super) async fn build_http_state(
    settings: &AppSettings,
    token_secret: &str,
) -> std::io::Result<(HttpState, Arc<dyn TokenCodec>)> {
    let tokens: Arc<dyn TokenCodec> = Arc::new(Hs256TokenCodec::new(token_secret));
    let repositories = build_repositories(settings).await?;

    let credentials = CredentialService::new(
        repositories.users.clone(),
        Arc::new(Argon2PasswordHasher),
        tokens.clone(),
    );
    let provisioner = FederatedProvisioner::new(repositories.users.clone());

    let state = HttpState {
        credentials,
        provisioner,
        federated_auth: build_federated_auth(settings),
        users: repositories.users,
        events: repositories.events,
        registrations: repositories.registrations,
        payments: build_payment_gateway(settings),
        ownership: settings.ownership_policy(),
    };
    Ok((state, tokens))
}
