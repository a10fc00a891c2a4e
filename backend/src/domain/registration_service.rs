//! Registration engine.
//!
//! The store's (student, event) uniqueness constraint is the only guard
//! against duplicates; no check-then-insert is performed for it. Deadline
//! and capacity are consulted only when the [`RegistrationPolicy`] asks.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::error::Portal;
use crate::domain::ports::{
    EventRegistration, EventRepository, EventRepositoryError, RegistrationRepository,
    RegistrationRepositoryError,
};
use crate::domain::{
    Error, EventId, Registration, RegistrationPolicy, RequestContext, StudentRegistration,
};

fn map_registration_error(error: RegistrationRepositoryError) -> Error {
    match error {
        RegistrationRepositoryError::AlreadyRegistered { .. } => Error::already_registered(),
        RegistrationRepositoryError::UnknownEvent { .. } => Error::event_not_found(),
        // A session can outlive its student row, e.g. across an in-memory restart.
        RegistrationRepositoryError::UnknownStudent { .. } => Error::login_required(Portal::Student),
        RegistrationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("registration store unavailable: {message}"))
        }
        RegistrationRepositoryError::Query { message } => {
            Error::internal(format!("registration store error: {message}"))
        }
    }
}

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

/// Implements [`EventRegistration`].
#[derive(Clone)]
pub struct RegistrationService<R, E> {
    registrations: Arc<R>,
    events: Arc<E>,
    clock: Arc<dyn Clock>,
    policy: RegistrationPolicy,
}

impl<R, E> RegistrationService<R, E> {
    /// Build a service that accepts registrations regardless of deadline and capacity.
    pub fn new(registrations: Arc<R>, events: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registrations,
            events,
            clock,
            policy: RegistrationPolicy::default(),
        }
    }

    /// Replace the registration policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<R, E> RegistrationService<R, E>
where
    E: EventRepository,
{
    async fn check_policy(&self, event_id: EventId) -> Result<(), Error> {
        if !self.policy.enforce_deadline && !self.policy.enforce_capacity {
            return Ok(());
        }

        let summary = self
            .events
            .find_summary(event_id)
            .await
            .map_err(map_event_error)?
            .ok_or_else(Error::event_not_found)?;

        if self.policy.enforce_deadline && !summary.event.accepts_registrations_at(self.clock.utc())
        {
            return Err(Error::registration_closed());
        }
        if self.policy.enforce_capacity && summary.is_full() {
            return Err(Error::event_full());
        }
        Ok(())
    }
}

#[async_trait]
impl<R, E> EventRegistration for RegistrationService<R, E>
where
    R: RegistrationRepository,
    E: EventRepository,
{
    async fn register_for_event(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
    ) -> Result<Registration, Error> {
        let student = ctx.require_student()?;
        self.check_policy(event_id).await?;

        let registration = self
            .registrations
            .insert(student.id, event_id)
            .await
            .map_err(|error| {
                debug!(%error, "registration rejected");
                map_registration_error(error)
            })?;
        info!(
            registration_id = %registration.id,
            student_id = %student.id,
            event_id = %event_id,
            "student registered for event"
        );
        Ok(registration)
    }

    async fn list_my_registrations(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<StudentRegistration>, Error> {
        let student = ctx.require_student()?;
        self.registrations
            .list_for_student(student.id)
            .await
            .map_err(map_registration_error)
    }
}

#[cfg(test)]
#[path = "registration_service_tests.rs"]
mod tests;
