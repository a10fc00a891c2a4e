//! Driving port for students signing up to events.

use async_trait::async_trait;

use crate::domain::{Error, EventId, Registration, RequestContext, StudentRegistration};

/// Registration use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRegistration: Send + Sync {
    /// Register the calling student for `event_id`.
    async fn register_for_event(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
    ) -> Result<Registration, Error>;

    /// The calling student's registrations, soonest event first.
    async fn list_my_registrations(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<StudentRegistration>, Error>;
}
