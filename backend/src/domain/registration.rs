//! Registrations linking students to events, and the views built on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventCategory, EventId, RegistrationId, StudentId};

/// Lifecycle state of a registration. Only the initial state exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Registered,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
        }
    }
}

/// Stored registration. At most one exists per (student, event) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: RegistrationId,
    pub student_id: StudentId,
    pub event_id: EventId,
    pub registration_date: DateTime<Utc>,
    pub status: RegistrationStatus,
}

/// One line of a student's "my events" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistration {
    pub event_id: EventId,
    pub event_name: String,
    pub category: EventCategory,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub registration_date: DateTime<Utc>,
}

/// One line of the administrator's participant roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnstageParticipant {
    pub event_name: String,
    pub student_name: String,
    pub department: String,
    pub phone: Option<String>,
    pub registration_date: DateTime<Utc>,
}

/// Optional business rules applied when a student registers.
///
/// Both rules are off by default: the deadline and capacity columns exist
/// but registrations are accepted regardless. Turning `enforce_capacity` on
/// counts before inserting, so two concurrent requests can both take the
/// last seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistrationPolicy {
    pub enforce_deadline: bool,
    pub enforce_capacity: bool,
}

impl RegistrationPolicy {
    /// Reject registrations after the deadline and once the event is full.
    pub fn strict() -> Self {
        Self {
            enforce_deadline: true,
            enforce_capacity: true,
        }
    }
}
