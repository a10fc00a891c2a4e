//! Event catalogue service: publishing events and the listings built on them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::ports::{
    EventCatalogue, EventRepository, EventRepositoryError, RegistrationRepository,
    RegistrationRepositoryError,
};
use crate::domain::{
    Error, EventCategory, EventId, EventSummary, NewEvent, OnstageParticipant, RequestContext,
};

fn map_event_error(error: EventRepositoryError) -> Error {
    match error {
        EventRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("event store unavailable: {message}"))
        }
        EventRepositoryError::Query { message } => {
            Error::internal(format!("event store error: {message}"))
        }
    }
}

fn map_roster_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("registration store unavailable: {message}"))
        }
        other => Error::internal(format!("registration store error: {other}")),
    }
}

/// Implements [`EventCatalogue`].
#[derive(Clone)]
pub struct EventCatalogService<E, R> {
    events: Arc<E>,
    registrations: Arc<R>,
}

impl<E, R> EventCatalogService<E, R> {
    pub fn new(events: Arc<E>, registrations: Arc<R>) -> Self {
        Self {
            events,
            registrations,
        }
    }
}

#[async_trait]
impl<E, R> EventCatalogue for EventCatalogService<E, R>
where
    E: EventRepository,
    R: RegistrationRepository,
{
    async fn create_event(&self, ctx: &RequestContext, event: NewEvent) -> Result<EventId, Error> {
        let admin = ctx.require_admin()?;
        let created = self
            .events
            .insert(&event, admin.id)
            .await
            .map_err(map_event_error)?;
        info!(
            event_id = %created.id,
            admin_id = %admin.id,
            category = %created.category,
            "event created"
        );
        Ok(created.id)
    }

    async fn list_eligible_events(
        &self,
        ctx: &RequestContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, Error> {
        ctx.require_student()?;
        self.events.list_open(now).await.map_err(map_event_error)
    }

    async fn list_all_events(&self, ctx: &RequestContext) -> Result<Vec<EventSummary>, Error> {
        ctx.require_admin()?;
        self.events.list_all().await.map_err(map_event_error)
    }

    async fn list_onstage_participants(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<OnstageParticipant>, Error> {
        ctx.require_admin()?;
        self.registrations
            .list_participants(EventCategory::Onstage)
            .await
            .map_err(map_roster_error)
    }
}

#[cfg(test)]
#[path = "event_catalog_service_tests.rs"]
mod tests;
