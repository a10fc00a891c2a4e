//! PostgreSQL-backed `EventRepository`.
//!
//! Registration counts come from a second grouped query over the listed
//! event ids and are merged in memory; events without registrations count
//! zero.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{AdminId, Event, EventId, EventSummary, NewEvent};

use super::error_mapping::{DieselFailure, classify, describe};
use super::models::{EventRow, NewEventRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, registrations};

const CREATED_BY_FK: &str = "events_created_by_fkey";

/// Diesel implementation of [`EventRepository`].
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventRepositoryError {
    EventRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    match classify(error) {
        failure if failure.is_foreign_key(CREATED_BY_FK) => {
            EventRepositoryError::query("event creator is not a known administrator")
        }
        DieselFailure::Connection(message) => EventRepositoryError::connection(message),
        other => EventRepositoryError::query(describe(&other)),
    }
}

fn to_event(row: EventRow) -> Result<Event, EventRepositoryError> {
    Event::try_from(row).map_err(EventRepositoryError::query)
}

async fn summarise(
    conn: &mut AsyncPgConnection,
    rows: Vec<EventRow>,
) -> Result<Vec<EventSummary>, EventRepositoryError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let counts: HashMap<i64, i64> = registrations::table
        .filter(registrations::event_id.eq_any(ids))
        .group_by(registrations::event_id)
        .select((registrations::event_id, diesel::dsl::count(registrations::id)))
        .load::<(i64, i64)>(conn)
        .await
        .map_err(map_diesel_error)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(|row| {
            let registered_count = counts.get(&row.id).copied().unwrap_or(0);
            Ok(EventSummary {
                event: to_event(row)?,
                registered_count,
            })
        })
        .collect()
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn insert(
        &self,
        event: &NewEvent,
        created_by: AdminId,
    ) -> Result<Event, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: EventRow = diesel::insert_into(events::table)
            .values(&NewEventRow {
                name: &event.name,
                description: &event.description,
                category: event.category.as_str(),
                max_participants: event.max_participants,
                registration_deadline: event.registration_deadline,
                event_date: event.event_date,
                venue: &event.venue,
                created_by: created_by.get(),
            })
            .returning(EventRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        to_event(row)
    }

    async fn find_summary(
        &self,
        id: EventId,
    ) -> Result<Option<EventSummary>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EventRow> = events::table
            .filter(events::id.eq(id.get()))
            .select(EventRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut summaries = summarise(&mut conn, vec![row]).await?;
        Ok(summaries.pop())
    }

    async fn list_open(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .filter(events::registration_deadline.gt(now))
            .order((events::event_date.asc(), events::id.asc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        summarise(&mut conn, rows).await
    }

    async fn list_all(&self) -> Result<Vec<EventSummary>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EventRow> = events::table
            .order((events::created_at.desc(), events::id.desc()))
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        summarise(&mut conn, rows).await
    }
}
