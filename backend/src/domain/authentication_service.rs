//! Authentication service for students and administrators.
//!
//! Students are identified by email only. Administrators are checked against
//! a stored password hash through the [`CredentialHasher`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AdminLogin, AdminRepository, AdminRepositoryError, CredentialHasher, CredentialHasherError,
    StudentAccounts, StudentRepository, StudentRepositoryError,
};
use crate::domain::{AdminCredentials, AdminIdentity, Error, NewStudent, StudentIdentity};

fn map_student_error(error: StudentRepositoryError) -> Error {
    match error {
        StudentRepositoryError::DuplicateEmail { .. } => Error::duplicate_email(),
        StudentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("student store unavailable: {message}"))
        }
        StudentRepositoryError::Query { message } => {
            Error::internal(format!("student store error: {message}"))
        }
    }
}

fn map_admin_error(error: AdminRepositoryError) -> Error {
    match error {
        AdminRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("admin store unavailable: {message}"))
        }
        AdminRepositoryError::Query { message } => {
            Error::internal(format!("admin store error: {message}"))
        }
    }
}

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(format!("credential check failed: {error}"))
}

/// Implements [`StudentAccounts`] and [`AdminLogin`].
#[derive(Clone)]
pub struct AuthenticationService<S, A, H> {
    students: Arc<S>,
    admins: Arc<A>,
    hasher: Arc<H>,
}

impl<S, A, H> AuthenticationService<S, A, H> {
    pub fn new(students: Arc<S>, admins: Arc<A>, hasher: Arc<H>) -> Self {
        Self {
            students,
            admins,
            hasher,
        }
    }
}

impl<S, A, H> AuthenticationService<S, A, H>
where
    H: CredentialHasher + 'static,
{
    /// Compare on the blocking pool; Argon2 is CPU-bound.
    async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        let stored_hash = stored_hash.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &stored_hash))
            .await
            .map_err(|error| Error::internal(format!("credential check aborted: {error}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<S, A, H> StudentAccounts for AuthenticationService<S, A, H>
where
    S: StudentRepository,
    A: AdminRepository,
    H: CredentialHasher,
{
    async fn register_student(&self, student: NewStudent) -> Result<StudentIdentity, Error> {
        let stored = self.students.insert(&student).await.map_err(|error| {
            debug!(%error, "student registration rejected");
            map_student_error(error)
        })?;
        info!(student_id = %stored.id, "student registered");
        Ok(stored.identity())
    }

    async fn login_student(&self, email: &str) -> Result<StudentIdentity, Error> {
        let student = self
            .students
            .find_by_email(email)
            .await
            .map_err(map_student_error)?
            .ok_or_else(Error::student_not_found)?;
        info!(student_id = %student.id, "student logged in");
        Ok(student.identity())
    }
}

#[async_trait]
impl<S, A, H> AdminLogin for AuthenticationService<S, A, H>
where
    S: StudentRepository,
    A: AdminRepository,
    H: CredentialHasher + 'static,
{
    async fn login_admin(&self, credentials: &AdminCredentials) -> Result<AdminIdentity, Error> {
        let Some(account) = self
            .admins
            .find_by_username(credentials.username())
            .await
            .map_err(map_admin_error)?
        else {
            debug!("admin login rejected: unknown username");
            return Err(Error::invalid_credentials());
        };

        let matches = self
            .verify_password(credentials.password(), &account.password_hash)
            .await?;
        if !matches {
            debug!(admin_id = %account.id, "admin login rejected: wrong password");
            return Err(Error::invalid_credentials());
        }

        info!(admin_id = %account.id, "admin logged in");
        Ok(account.identity())
    }
}

#[cfg(test)]
#[path = "authentication_service_tests.rs"]
mod tests;
