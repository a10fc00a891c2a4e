//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions that can meet unexpected
//! column values return `Err(String)` so repositories can report a query
//! error instead of guessing.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    AdminAccount, AdminId, Event, EventCategory, EventId, OnstageParticipant, Registration,
    RegistrationId, RegistrationStatus, Student, StudentId, StudentRegistration,
};

use super::schema::{admins, events, registrations, students};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = admins)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AdminRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<AdminRow> for AdminAccount {
    fn from(row: AdminRow) -> Self {
        Self {
            id: AdminId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admins)]
pub(crate) struct NewAdminRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::new(row.id),
            name: row.name,
            email: row.email,
            department: row.department,
            phone: row.phone,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub department: &'a str,
    pub phone: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub max_participants: i32,
    pub registration_deadline: DateTime<Utc>,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

fn parse_category(value: &str) -> Result<EventCategory, String> {
    value
        .parse()
        .map_err(|_| format!("unrecognised event category `{value}`"))
}

impl TryFrom<EventRow> for Event {
    type Error = String;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::new(row.id),
            category: parse_category(&row.category)?,
            name: row.name,
            description: row.description,
            max_participants: row.max_participants,
            registration_deadline: row.registration_deadline,
            event_date: row.event_date,
            venue: row.venue,
            created_by: AdminId::new(row.created_by),
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub max_participants: i32,
    pub registration_deadline: DateTime<Utc>,
    pub event_date: DateTime<Utc>,
    pub venue: &'a str,
    pub created_by: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrationRow {
    pub id: i64,
    pub student_id: i64,
    pub event_id: i64,
    pub registration_date: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = String;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_str() {
            "registered" => RegistrationStatus::Registered,
            other => return Err(format!("unrecognised registration status `{other}`")),
        };
        Ok(Self {
            id: RegistrationId::new(row.id),
            student_id: StudentId::new(row.student_id),
            event_id: EventId::new(row.event_id),
            registration_date: row.registration_date,
            status,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrations)]
pub(crate) struct NewRegistrationRow {
    pub student_id: i64,
    pub event_id: i64,
}

/// `registrations ⋈ events`, selected as
/// `(events.id, events.name, events.category, events.event_date, events.venue,
/// registrations.registration_date)`.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct StudentRegistrationRow {
    pub event_id: i64,
    pub event_name: String,
    pub category: String,
    pub event_date: DateTime<Utc>,
    pub venue: String,
    pub registration_date: DateTime<Utc>,
}

impl TryFrom<StudentRegistrationRow> for StudentRegistration {
    type Error = String;

    fn try_from(row: StudentRegistrationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event_id: EventId::new(row.event_id),
            category: parse_category(&row.category)?,
            event_name: row.event_name,
            event_date: row.event_date,
            venue: row.venue,
            registration_date: row.registration_date,
        })
    }
}

/// `registrations ⋈ events ⋈ students`, selected as
/// `(events.name, students.name, students.department, students.phone,
/// registrations.registration_date)`.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ParticipantRow {
    pub event_name: String,
    pub student_name: String,
    pub department: String,
    pub phone: Option<String>,
    pub registration_date: DateTime<Utc>,
}

impl From<ParticipantRow> for OnstageParticipant {
    fn from(row: ParticipantRow) -> Self {
        Self {
            event_name: row.event_name,
            student_name: row.student_name,
            department: row.department,
            phone: row.phone,
            registration_date: row.registration_date,
        }
    }
}
