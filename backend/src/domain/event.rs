//! Arts day events and their category.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AdminId, EventId};

/// Capacity recorded when the organiser leaves it blank.
pub const DEFAULT_MAX_PARTICIPANTS: i32 = 1;

/// Where an event takes place: on the stage or elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Onstage,
    Offstage,
}

impl EventCategory {
    /// Lower-case label used by the store and the JSON API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Onstage => "onstage",
            Self::Offstage => "offstage",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for EventCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "onstage" => Ok(Self::Onstage),
            "offstage" => Ok(Self::Offstage),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Event details supplied by an administrator.
///
/// No ordering between `registration_deadline` and `event_date` is imposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub category: EventCategory,
    pub max_participants: i32,
    pub registration_deadline: DateTime<Utc>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
}

/// Stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub description: String,
    pub category: EventCategory,
    pub max_participants: i32,
    pub registration_deadline: DateTime<Utc>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub created_by: AdminId,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether registration is still open at `now`; the deadline itself is closed.
    pub fn accepts_registrations_at(&self, now: DateTime<Utc>) -> bool {
        self.registration_deadline > now
    }
}

/// Event annotated with the number of registrations referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub registered_count: i64,
}

impl EventSummary {
    /// Whether the registration count has reached the event's capacity.
    pub fn is_full(&self) -> bool {
        self.registered_count >= i64::from(self.event.max_participants)
    }
}
