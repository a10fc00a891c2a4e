//! PostgreSQL-backed `RegistrationRepository`.
//!
//! Duplicate and dangling registrations are detected from constraint names,
//! never by a read before the insert.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RegistrationRepository, RegistrationRepositoryError};
use crate::domain::{
    EventCategory, EventId, OnstageParticipant, Registration, StudentId, StudentRegistration,
};

use super::error_mapping::{DieselFailure, classify, describe};
use super::models::{NewRegistrationRow, ParticipantRow, RegistrationRow, StudentRegistrationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, registrations, students};

const PAIR_UNIQUE: &str = "registrations_student_event_key";
const EVENT_FK: &str = "registrations_event_id_fkey";
const STUDENT_FK: &str = "registrations_student_id_fkey";

/// Byte-wise ordering, independent of the database's default collation.
fn bytewise(column: &'static str) -> SqlLiteral<Text> {
    sql::<Text>(&format!(r#"{column} COLLATE "C""#))
}

/// Diesel implementation of [`RegistrationRepository`].
#[derive(Clone)]
pub struct DieselRegistrationRepository {
    pool: DbPool,
}

impl DieselRegistrationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RegistrationRepositoryError {
    RegistrationRepositoryError::connection(error.into_message())
}

fn map_failure(
    failure: DieselFailure,
    student_id: StudentId,
    event_id: EventId,
) -> RegistrationRepositoryError {
    if failure.is_unique(PAIR_UNIQUE) {
        return RegistrationRepositoryError::already_registered(student_id, event_id);
    }
    if failure.is_foreign_key(EVENT_FK) {
        return RegistrationRepositoryError::unknown_event(event_id);
    }
    if failure.is_foreign_key(STUDENT_FK) {
        return RegistrationRepositoryError::unknown_student(student_id);
    }
    match failure {
        DieselFailure::Connection(message) => RegistrationRepositoryError::connection(message),
        other => RegistrationRepositoryError::query(describe(&other)),
    }
}

fn map_read_error(error: diesel::result::Error) -> RegistrationRepositoryError {
    match classify(error) {
        DieselFailure::Connection(message) => RegistrationRepositoryError::connection(message),
        other => RegistrationRepositoryError::query(describe(&other)),
    }
}

#[async_trait]
impl RegistrationRepository for DieselRegistrationRepository {
    async fn insert(
        &self,
        student_id: StudentId,
        event_id: EventId,
    ) -> Result<Registration, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: RegistrationRow = diesel::insert_into(registrations::table)
            .values(&NewRegistrationRow {
                student_id: student_id.get(),
                event_id: event_id.get(),
            })
            .returning(RegistrationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_failure(classify(error), student_id, event_id))?;

        Registration::try_from(row).map_err(RegistrationRepositoryError::query)
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<StudentRegistration>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRegistrationRow> = registrations::table
            .inner_join(events::table)
            .filter(registrations::student_id.eq(student_id.get()))
            .order((events::event_date.asc(), registrations::id.asc()))
            .select((
                events::id,
                events::name,
                events::category,
                events::event_date,
                events::venue,
                registrations::registration_date,
            ))
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter()
            .map(|row| StudentRegistration::try_from(row).map_err(RegistrationRepositoryError::query))
            .collect()
    }

    async fn list_participants(
        &self,
        category: EventCategory,
    ) -> Result<Vec<OnstageParticipant>, RegistrationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ParticipantRow> = registrations::table
            .inner_join(events::table)
            .inner_join(students::table)
            .filter(events::category.eq(category.as_str()))
            .order((
                bytewise("events.name").asc(),
                bytewise("students.name").asc(),
                registrations::id.asc(),
            ))
            .select((
                events::name,
                students::name,
                students::department,
                students::phone,
                registrations::registration_date,
            ))
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(rows.into_iter().map(OnstageParticipant::from).collect())
    }
}
