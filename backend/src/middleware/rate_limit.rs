//! Fixed-window rate limiting keyed by source address.
//!
//! The window and cap are configuration; counts live behind the
//! [`CounterStore`] port so a single process can use the in-memory map while
//! multi-instance deployments inject the Redis adapter. Counter-store
//! failures fail open: a broken limiter must not take the site down.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use serde_json::json;
use tracing::warn;

use crate::domain::ports::CounterStore;

/// Fixed-window limiter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Window length; counters reset when it elapses.
    pub window: Duration,
    /// Maximum requests per source address per window.
    pub max_requests: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60),
            max_requests: 100,
        }
    }
}

/// Source-address key: first `x-forwarded-for` hop, else the peer address.
fn client_key(req: &ServiceRequest) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_owned())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Per-source-address fixed-window rate limiting middleware.
#[derive(Clone)]
pub struct RateLimit {
    config: RateLimitConfig,
    store: Arc<dyn CounterStore>,
}

impl RateLimit {
    /// Create a limiter over the given counter store.
    pub fn new(config: RateLimitConfig, store: Arc<dyn CounterStore>) -> Self {
        Self { config, store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: self.config,
            store: self.store.clone(),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: RateLimitConfig,
    store: Arc<dyn CounterStore>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let service = Rc::clone(&self.service);
        let store = self.store.clone();
        let config = self.config;
        let key = client_key(&req);

        Box::pin(async move {
            let over_limit = match store.increment(&key, config.window).await {
                Ok(count) => count > config.max_requests,
                Err(error) => {
                    warn!(%error, "counter store unavailable; rate limiting disabled");
                    false
                }
            };

            if over_limit {
                let response = HttpResponse::TooManyRequests()
                    .json(json!({ "error": "Too many requests" }));
                return Ok(req.into_response(response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::domain::ports::InMemoryCounterStore;

    async fn limited_app(
        max_requests: u64,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = ServiceResponse<EitherBody<actix_web::body::BoxBody>>,
        Error = Error,
    > {
        let config = RateLimitConfig {
            window: Duration::from_secs(60),
            max_requests,
        };
        let store: Arc<dyn CounterStore> = Arc::new(InMemoryCounterStore::new());
        test::init_service(
            App::new()
                .wrap(RateLimit::new(config, store))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await
    }

    #[actix_web::test]
    async fn requests_under_the_cap_pass_through() {
        let app = limited_app(2).await;
        for _ in 0..2 {
            let res =
                test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
    }

    #[actix_web::test]
    async fn the_request_over_the_cap_is_rejected() {
        let app = limited_app(2).await;
        for _ in 0..2 {
            let res =
                test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
            assert_eq!(res.status(), StatusCode::OK);
        }
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn sources_are_counted_independently() {
        let app = limited_app(1).await;
        let first = test::TestRequest::get()
            .uri("/")
            .insert_header(("x-forwarded-for", "10.0.0.1"))
            .to_request();
        assert_eq!(
            test::call_service(&app, first).await.status(),
            StatusCode::OK
        );

        let other_source = test::TestRequest::get()
            .uri("/")
            .insert_header(("x-forwarded-for", "10.0.0.2"))
            .to_request();
        assert_eq!(
            test::call_service(&app, other_source).await.status(),
            StatusCode::OK
        );

        let repeat = test::TestRequest::get()
            .uri("/")
            .insert_header(("x-forwarded-for", "10.0.0.1"))
            .to_request();
        assert_eq!(
            test::call_service(&app, repeat).await.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
