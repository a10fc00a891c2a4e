//! PostgreSQL-backed `StudentRepository`.
//!
//! Email uniqueness is left to the `students_email_key` constraint; a
//! violation is reported as [`StudentRepositoryError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentRepository, StudentRepositoryError};
use crate::domain::{NewStudent, Student};

use super::error_mapping::{DieselFailure, classify, describe};
use super::models::{NewStudentRow, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

const EMAIL_UNIQUE: &str = "students_email_key";

/// Diesel implementation of [`StudentRepository`].
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentRepositoryError {
    StudentRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, email: &str) -> StudentRepositoryError {
    match classify(error) {
        failure if failure.is_unique(EMAIL_UNIQUE) => StudentRepositoryError::duplicate_email(email),
        DieselFailure::Connection(message) => StudentRepositoryError::connection(message),
        other => StudentRepositoryError::query(describe(&other)),
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: StudentRow = diesel::insert_into(students::table)
            .values(&NewStudentRow {
                name: student.name(),
                email: student.email(),
                department: student.department(),
                phone: student.phone(),
            })
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, student.email()))?;

        Ok(row.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .filter(students::email.eq(email))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|error| map_diesel_error(error, email))?;

        Ok(row.map(Student::from))
    }
}
