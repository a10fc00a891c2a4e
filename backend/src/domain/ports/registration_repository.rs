//! Port for registration storage and roster queries.

use async_trait::async_trait;

use crate::domain::{
    EventCategory, EventId, OnstageParticipant, Registration, StudentId, StudentRegistration,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registration repository adapters.
    pub enum RegistrationRepositoryError {
        /// The (student, event) pair already has a registration.
        AlreadyRegistered { student_id: StudentId, event_id: EventId } =>
            "student {student_id} already registered for event {event_id}",
        /// The referenced event does not exist.
        UnknownEvent { event_id: EventId } => "event {event_id} does not exist",
        /// The referenced student does not exist.
        UnknownStudent { student_id: StudentId } => "student {student_id} does not exist",
        /// Repository connection could not be established.
        Connection { message: String } =>
            "registration repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "registration repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a registration. Pair uniqueness is checked atomically by the store.
    async fn insert(
        &self,
        student_id: StudentId,
        event_id: EventId,
    ) -> Result<Registration, RegistrationRepositoryError>;

    /// The student's registrations joined to their events, by event date ascending.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentRegistration>, RegistrationRepositoryError>;

    /// Participants of every event in `category`, by event name then student name.
    async fn list_participants(
        &self,
        category: EventCategory,
    ) -> Result<Vec<OnstageParticipant>, RegistrationRepositoryError>;
}
