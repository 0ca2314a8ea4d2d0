//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns:
//! tracing, rate limiting, response security headers, and the
//! protected-prefix login redirect.

pub mod rate_limit;
pub mod route_guard;
pub mod security_headers;
pub mod trace;

pub use rate_limit::{RateLimit, RateLimitConfig};
pub use route_guard::{RouteGuard, RouteGuardConfig, TOKEN_COOKIE};
pub use security_headers::SecurityHeaders;
pub use trace::Trace;
