//! Uniform response security headers.
//!
//! Every response carries anti-sniff, frame-deny, and referrer-policy
//! headers plus a content-security-policy allow-listing the payment
//! gateway's domains. Attached after the handlers so error responses are
//! covered too.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

/// Default policy: self plus the payment gateway's checkout and API hosts.
pub const DEFAULT_CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' https://checkout.razorpay.com; \
     style-src 'self' 'unsafe-inline'; \
     img-src 'self' data: https:; \
     font-src 'self' data:; \
     connect-src 'self' https://api.razorpay.com https://lumberjack-cx.razorpay.com";

/// Header set applied to every response.
#[derive(Debug, Clone)]
pub struct SecurityHeaders {
    content_security_policy: Arc<str>,
}

impl Default for SecurityHeaders {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_SECURITY_POLICY)
    }
}

impl SecurityHeaders {
    /// Create the middleware with a deployment-specific CSP.
    pub fn new(content_security_policy: impl Into<Arc<str>>) -> Self {
        Self {
            content_security_policy: content_security_policy.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddleware {
            service,
            content_security_policy: Arc::clone(&self.content_security_policy),
        }))
    }
}

/// Service wrapper produced by [`SecurityHeaders`].
pub struct SecurityHeadersMiddleware<S> {
    service: S,
    content_security_policy: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let csp = Arc::clone(&self.content_security_policy);
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            let headers = res.response_mut().headers_mut();
            headers.insert(
                HeaderName::from_static("x-content-type-options"),
                HeaderValue::from_static("nosniff"),
            );
            headers.insert(
                HeaderName::from_static("x-frame-options"),
                HeaderValue::from_static("DENY"),
            );
            headers.insert(
                HeaderName::from_static("x-xss-protection"),
                HeaderValue::from_static("1; mode=block"),
            );
            headers.insert(
                HeaderName::from_static("referrer-policy"),
                HeaderValue::from_static("origin-when-cross-origin"),
            );
            match HeaderValue::from_str(&csp) {
                Ok(value) => {
                    headers.insert(HeaderName::from_static("content-security-policy"), value);
                }
                Err(error) => {
                    warn!(%error, "configured content-security-policy is not a valid header");
                }
            }
            Ok(res)
        })
    }
}
