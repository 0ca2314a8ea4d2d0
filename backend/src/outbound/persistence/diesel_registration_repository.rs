//! PostgreSQL-backed `RegistrationRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RegistrationPersistenceError, RegistrationRepository};
use crate::domain::{
    Email, EventId, QuestionAnswer, Registration, RegistrationDraft, RegistrationId,
};

use super::models::{NewRegistrationRow, RegistrationRow};
use super::pool::{DbPool, PoolError};
use super::schema::registrations;

/// Diesel-backed implementation of the `RegistrationRepository` port.
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RegistrationPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> RegistrationPersistenceError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RegistrationPersistenceError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            RegistrationPersistenceError::query("database error")
        }
    }
}

fn row_to_registration(row: RegistrationRow) -> Result<Registration, RegistrationPersistenceError> {
    let email = Email::new(&row.email).map_err(|err| {
        RegistrationPersistenceError::query(format!("stored email invalid: {err}"))
    })?;
    let answers: Vec<QuestionAnswer> = serde_json::from_value(row.answers).map_err(|err| {
        RegistrationPersistenceError::query(format!("stored answers invalid: {err}"))
    })?;
    Ok(Registration {
        id: RegistrationId::from_uuid(row.id),
        event_id: EventId::from_uuid(row.event_id),
        draft: RegistrationDraft {
            name: row.name,
            email,
            phone: row.phone,
            transaction_reference: row.transaction_reference,
            payment_proof: row.payment_proof,
            answers,
        },
        created_at: row.created_at,
    })
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn create(
        &self,
        registration: &Registration,
    ) -> Result<(), RegistrationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let answers = serde_json::to_value(&registration.draft.answers).map_err(|err| {
            RegistrationPersistenceError::query(format!("answers not serialisable: {err}"))
        })?;
        let row = NewRegistrationRow {
            id: registration.id.as_uuid(),
            event_id: registration.event_id.as_uuid(),
            name: &registration.draft.name,
            email: registration.draft.email.as_str(),
            phone: registration.draft.phone.as_deref(),
            transaction_reference: registration.draft.transaction_reference.as_deref(),
            payment_proof: registration.draft.payment_proof.as_deref(),
            answers,
            created_at: registration.created_at,
        };
        diesel::insert_into(registrations::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_by_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, RegistrationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RegistrationRow> = registrations::table
            .filter(registrations::event_id.eq(event_id.as_uuid()))
            .order(registrations::created_at.desc())
            .select(RegistrationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_registration).collect()
    }
}
