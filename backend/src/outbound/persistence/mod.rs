//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters only: repository implementations translate between Diesel
//! row structs and domain types. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) are internal implementation details, never
//! exposed to the domain. Connections are pooled via `bb8` with native async
//! support through `diesel-async`, and all database errors are mapped to the
//! domain's persistence error types.

mod diesel_event_repository;
mod diesel_registration_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_event_repository::DieselEventRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel_migrations::{embed_migrations, EmbeddedMigrations};

/// SQL migrations embedded at compile time; applied at startup when a
/// database is configured.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
