//! Pitchside backend: sports-event listing and registration service.
//!
//! Layered hexagonally: `domain` holds entities, services, and ports;
//! `inbound` adapts HTTP to the domain; `outbound` implements the ports
//! against PostgreSQL, the token/hash primitives, and external HTTP APIs;
//! `middleware` covers cross-request concerns; `server` wires it together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
