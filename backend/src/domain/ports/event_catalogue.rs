//! Driving port for publishing and browsing events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, EventId, EventSummary, NewEvent, OnstageParticipant, RequestContext};

/// Event catalogue use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCatalogue: Send + Sync {
    /// Publish an event on behalf of the calling administrator.
    async fn create_event(&self, ctx: &RequestContext, event: NewEvent) -> Result<EventId, Error>;

    /// Events a student can still sign up for at `now`, soonest first.
    async fn list_eligible_events(
        &self,
        ctx: &RequestContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, Error>;

    /// Every event for the administrator view, newest first.
    async fn list_all_events(&self, ctx: &RequestContext) -> Result<Vec<EventSummary>, Error>;

    /// Roster of students registered for onstage events.
    async fn list_onstage_participants(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<OnstageParticipant>, Error>;
}
