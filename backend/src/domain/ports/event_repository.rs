//! Port for event storage and the counted event listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AdminId, Event, EventId, EventSummary, NewEvent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event repository adapters.
    pub enum EventRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "event repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event owned by `created_by`.
    async fn insert(
        &self,
        event: &NewEvent,
        created_by: AdminId,
    ) -> Result<Event, EventRepositoryError>;

    /// Fetch one event with its registration count.
    async fn find_summary(
        &self,
        id: EventId,
    ) -> Result<Option<EventSummary>, EventRepositoryError>;

    /// Events whose deadline is strictly after `now`, by event date ascending.
    async fn list_open(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, EventRepositoryError>;

    /// Every event, newest first by creation time.
    async fn list_all(&self) -> Result<Vec<EventSummary>, EventRepositoryError>;
}
