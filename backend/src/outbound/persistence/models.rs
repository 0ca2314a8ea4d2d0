//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{events, registrations, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: Option<String>,
    pub avatar: Option<String>,
    pub provider: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub provider: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub sport: String,
    pub city: String,
    pub start: String,
    pub participation_type: String,
    pub fee: i64,
    pub prize: String,
    pub banner: Option<String>,
    pub organiser: String,
    pub requirements: Option<String>,
    pub payment_qr: Option<String>,
    pub chat_link: Option<String>,
    pub custom_questions: Vec<String>,
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub sport: &'a str,
    pub city: &'a str,
    pub start: &'a str,
    pub participation_type: &'a str,
    pub fee: i64,
    pub prize: &'a str,
    pub banner: Option<&'a str>,
    pub organiser: &'a str,
    pub requirements: Option<&'a str>,
    pub payment_qr: Option<&'a str>,
    pub chat_link: Option<&'a str>,
    pub custom_questions: &'a [String],
    pub creator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the registrations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrationRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub transaction_reference: Option<String>,
    pub payment_proof: Option<String>,
    pub answers: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new registration records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewRegistrationRow<'a> {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub transaction_reference: Option<&'a str>,
    pub payment_proof: Option<&'a str>,
    pub answers: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
