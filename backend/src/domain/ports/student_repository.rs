//! Port for student account storage.

use async_trait::async_trait;

use crate::domain::{NewStudent, Student};

use super::define_port_error;

define_port_error! {
    /// Errors raised by student repository adapters.
    pub enum StudentRepositoryError {
        /// The email address is already held by another student.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// Repository connection could not be established.
        Connection { message: String } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "student repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert a student. Email uniqueness is checked atomically by the store.
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentRepositoryError>;

    /// Look up a student by exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, StudentRepositoryError>;
}
