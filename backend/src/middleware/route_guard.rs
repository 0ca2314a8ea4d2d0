//! Protected-prefix guard redirecting unauthenticated browsers to login.
//!
//! A fixed list of path prefixes (the hosting area by default) requires an
//! identity cookie: either the custom `token` cookie, which must verify, or
//! the federated session cookie, whose validity is checked downstream. The
//! session cookie name varies by deployment (plain vs secure-cookie
//! variants), so both spellings are accepted.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::domain::ports::TokenCodec;

/// Cookie carrying the custom identity token.
pub const TOKEN_COOKIE: &str = "token";

/// Session cookie spellings, in lookup order.
const SESSION_COOKIES: [&str; 2] = ["session", "__Secure-session"];

/// Guard configuration: which prefixes are protected and where to send
/// unauthenticated browsers.
#[derive(Debug, Clone)]
pub struct RouteGuardConfig {
    /// Path prefixes requiring an identity cookie.
    pub protected_prefixes: Vec<String>,
    /// Redirect target for unauthenticated requests.
    pub login_path: String,
}

impl Default for RouteGuardConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/host".to_owned()],
            login_path: "/login".to_owned(),
        }
    }
}

/// Protected-prefix redirect middleware.
#[derive(Clone)]
pub struct RouteGuard {
    config: RouteGuardConfig,
    tokens: Arc<dyn TokenCodec>,
}

impl RouteGuard {
    /// Create a guard verifying token cookies with `tokens`.
    pub fn new(config: RouteGuardConfig, tokens: Arc<dyn TokenCodec>) -> Self {
        Self { config, tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RouteGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RouteGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RouteGuardMiddleware {
            service,
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }))
    }
}

/// Service wrapper produced by [`RouteGuard`].
pub struct RouteGuardMiddleware<S> {
    service: S,
    config: RouteGuardConfig,
    tokens: Arc<dyn TokenCodec>,
}

impl<S> RouteGuardMiddleware<S> {
    fn is_protected(&self, path: &str) -> bool {
        self.config
            .protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Whether the request carries an acceptable identity cookie.
    fn has_identity(&self, req: &ServiceRequest) -> bool {
        if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
            match self.tokens.verify(cookie.value()) {
                Ok(_) => return true,
                Err(error) => {
                    debug!(%error, "token cookie failed verification at route guard");
                    return false;
                }
            }
        }
        SESSION_COOKIES
            .into_iter()
            .any(|name| req.cookie(name).is_some())
    }
}

impl<S, B> Service<ServiceRequest> for RouteGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if self.is_protected(req.path()) && !self.has_identity(&req) {
            let response = HttpResponse::Found()
                .insert_header((header::LOCATION, self.config.login_path.clone()))
                .finish();
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(|res| res.map_into_left_body()) })
    }
}
