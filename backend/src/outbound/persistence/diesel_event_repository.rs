//! PostgreSQL-backed `EventRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{EventPersistenceError, EventRepository};
use crate::domain::{Event, EventDraft, EventId, UserId};

use super::models::{EventRow, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::events;

/// Diesel-backed implementation of the `EventRepository` port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EventPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> EventPersistenceError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EventPersistenceError::connection("database connection error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            EventPersistenceError::query("database error")
        }
    }
}

fn row_to_event(row: EventRow) -> Event {
    Event {
        id: EventId::from_uuid(row.id),
        draft: EventDraft {
            title: row.title,
            sport: row.sport,
            city: row.city,
            start: row.start,
            participation_type: row.participation_type,
            fee: row.fee,
            prize: row.prize,
            banner: row.banner,
            organiser: row.organiser,
            requirements: row.requirements,
            payment_qr: row.payment_qr,
            chat_link: row.chat_link,
            custom_questions: row.custom_questions,
        },
        creator: row.creator_id.map(UserId::from_uuid),
        created_at: row.created_at,
    }
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn create(&self, event: &Event) -> Result<(), EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewEventRow {
            id: event.id.as_uuid(),
            title: &event.draft.title,
            sport: &event.draft.sport,
            city: &event.draft.city,
            start: &event.draft.start,
            participation_type: &event.draft.participation_type,
            fee: event.draft.fee,
            prize: &event.draft.prize,
            banner: event.draft.banner.as_deref(),
            organiser: &event.draft.organiser,
            requirements: event.draft.requirements.as_deref(),
            payment_qr: event.draft.payment_qr.as_deref(),
            chat_link: event.draft.chat_link.as_deref(),
            custom_questions: &event.draft.custom_questions,
            creator_id: event.creator.as_ref().map(UserId::as_uuid),
            created_at: event.created_at,
        };
        diesel::insert_into(events::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<EventRow> = events::table
            .filter(events::id.eq(id.as_uuid()))
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_event))
    }

    async fn list_all(&self) -> Result<Vec<Event>, EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .order(events::created_at.desc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }

    async fn list_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Event>, EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<EventRow> = events::table
            .filter(events::creator_id.eq(creator.as_uuid()))
            .order(events::created_at.desc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }

    async fn delete_by_id(&self, id: &EventId) -> Result<bool, EventPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(events::table.filter(events::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
