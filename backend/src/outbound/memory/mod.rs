//! In-memory store implementing every repository port.
//!
//! Used by tests and as the runtime fallback when no database URL is
//! configured. It mirrors the PostgreSQL schema's guarantees: unique admin
//! usernames and student emails, one registration per (student, event)
//! pair, foreign keys on registrations, and the same listing orders. Names
//! compare byte-wise here, which the PostgreSQL roster query matches with
//! `COLLATE "C"`. All state lives behind one mutex so every insert checks
//! and writes atomically.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    AdminRepository, AdminRepositoryError, EventRepository, EventRepositoryError,
    RegistrationRepository, RegistrationRepositoryError, StudentRepository,
    StudentRepositoryError,
};
use crate::domain::{
    AdminAccount, AdminId, Event, EventCategory, EventId, EventSummary, NewAdmin, NewEvent,
    NewStudent, OnstageParticipant, Registration, RegistrationId, RegistrationStatus, Student,
    StudentId, StudentRegistration,
};

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Default)]
struct State {
    admins: Vec<AdminAccount>,
    students: Vec<Student>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn registered_count(&self, event_id: EventId) -> i64 {
        let count = self
            .registrations
            .iter()
            .filter(|registration| registration.event_id == event_id)
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn summarise(&self, event: &Event) -> EventSummary {
        EventSummary {
            event: event.clone(),
            registered_count: self.registered_count(event.id),
        }
    }

    fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }
}

/// Process-local store; cloning shares the same state.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

#[async_trait]
impl AdminRepository for InMemoryStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminRepositoryError> {
        let state = self.lock().map_err(AdminRepositoryError::query)?;
        Ok(state
            .admins
            .iter()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn insert_if_absent(&self, admin: &NewAdmin) -> Result<bool, AdminRepositoryError> {
        let created_at = self.now();
        let mut state = self.lock().map_err(AdminRepositoryError::query)?;
        if state
            .admins
            .iter()
            .any(|existing| existing.username == admin.username)
        {
            return Ok(false);
        }
        let id = AdminId::new(state.next_id());
        state.admins.push(AdminAccount {
            id,
            username: admin.username.clone(),
            password_hash: admin.password_hash.clone(),
            created_at,
        });
        Ok(true)
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError> {
        let created_at = self.now();
        let mut state = self.lock().map_err(StudentRepositoryError::query)?;
        if state
            .students
            .iter()
            .any(|existing| existing.email == student.email())
        {
            return Err(StudentRepositoryError::duplicate_email(student.email()));
        }
        let stored = Student {
            id: StudentId::new(state.next_id()),
            name: student.name().to_owned(),
            email: student.email().to_owned(),
            department: student.department().to_owned(),
            phone: student.phone().map(str::to_owned),
            created_at,
        };
        state.students.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError> {
        let state = self.lock().map_err(StudentRepositoryError::query)?;
        Ok(state
            .students
            .iter()
            .find(|student| student.email == email)
            .cloned())
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn insert(
        &self,
        event: &NewEvent,
        created_by: AdminId,
    ) -> Result<Event, EventRepositoryError> {
        let created_at = self.now();
        let mut state = self.lock().map_err(EventRepositoryError::query)?;
        if !state.admins.iter().any(|admin| admin.id == created_by) {
            return Err(EventRepositoryError::query(format!(
                "admin {created_by} does not exist"
            )));
        }
        let stored = Event {
            id: EventId::new(state.next_id()),
            name: event.name.clone(),
            description: event.description.clone(),
            category: event.category,
            max_participants: event.max_participants,
            registration_deadline: event.registration_deadline,
            event_date: event.event_date,
            venue: event.venue.clone(),
            created_by,
            created_at,
        };
        state.events.push(stored.clone());
        Ok(stored)
    }

    async fn find_summary(
        &self,
        id: EventId,
    ) -> Result<Option<EventSummary>, EventRepositoryError> {
        let state = self.lock().map_err(EventRepositoryError::query)?;
        Ok(state.event(id).map(|event| state.summarise(event)))
    }

    async fn list_open(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventSummary>, EventRepositoryError> {
        let state = self.lock().map_err(EventRepositoryError::query)?;
        let mut open: Vec<EventSummary> = state
            .events
            .iter()
            .filter(|event| event.accepts_registrations_at(now))
            .map(|event| state.summarise(event))
            .collect();
        open.sort_by_key(|summary| (summary.event.event_date, summary.event.id));
        Ok(open)
    }

    async fn list_all(&self) -> Result<Vec<EventSummary>, EventRepositoryError> {
        let state = self.lock().map_err(EventRepositoryError::query)?;
        let mut all: Vec<EventSummary> = state
            .events
            .iter()
            .map(|event| state.summarise(event))
            .collect();
        all.sort_by(|a, b| {
            (b.event.created_at, b.event.id).cmp(&(a.event.created_at, a.event.id))
        });
        Ok(all)
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn insert(
        &self,
        student_id: StudentId,
        event_id: EventId,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let registration_date = self.now();
        let mut state = self.lock().map_err(RegistrationRepositoryError::query)?;
        if state.student(student_id).is_none() {
            return Err(RegistrationRepositoryError::unknown_student(student_id));
        }
        if state.event(event_id).is_none() {
            return Err(RegistrationRepositoryError::unknown_event(event_id));
        }
        if state
            .registrations
            .iter()
            .any(|existing| existing.student_id == student_id && existing.event_id == event_id)
        {
            return Err(RegistrationRepositoryError::already_registered(
                student_id, event_id,
            ));
        }
        let stored = Registration {
            id: RegistrationId::new(state.next_id()),
            student_id,
            event_id,
            registration_date,
            status: RegistrationStatus::Registered,
        };
        state.registrations.push(stored.clone());
        Ok(stored)
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentRegistration>, RegistrationRepositoryError> {
        let state = self.lock().map_err(RegistrationRepositoryError::query)?;
        let mut rows: Vec<(RegistrationId, StudentRegistration)> = state
            .registrations
            .iter()
            .filter(|registration| registration.student_id == student_id)
            .filter_map(|registration| {
                state.event(registration.event_id).map(|event| {
                    (
                        registration.id,
                        StudentRegistration {
                            event_id: event.id,
                            event_name: event.name.clone(),
                            category: event.category,
                            event_date: event.event_date,
                            venue: event.venue.clone(),
                            registration_date: registration.registration_date,
                        },
                    )
                })
            })
            .collect();
        rows.sort_by_key(|(id, row)| (row.event_date, *id));
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }

    async fn list_participants(
        &self,
        category: EventCategory,
    ) -> Result<Vec<OnstageParticipant>, RegistrationRepositoryError> {
        let state = self.lock().map_err(RegistrationRepositoryError::query)?;
        let mut rows: Vec<OnstageParticipant> = state
            .registrations
            .iter()
            .filter_map(|registration| {
                let event = state.event(registration.event_id)?;
                let student = state.student(registration.student_id)?;
                (event.category == category).then(|| OnstageParticipant {
                    event_name: event.name.clone(),
                    student_name: student.name.clone(),
                    department: student.department.clone(),
                    phone: student.phone.clone(),
                    registration_date: registration.registration_date,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.event_name.as_str(), a.student_name.as_str())
                .cmp(&(b.event_name.as_str(), b.student_name.as_str()))
        });
        Ok(rows)
    }
}
