//! Driving port for student self-registration and login.

use async_trait::async_trait;

use crate::domain::{Error, NewStudent, StudentIdentity};

/// Student account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentAccounts: Send + Sync {
    /// Create a student account and return the identity to log in as.
    async fn register_student(&self, student: NewStudent) -> Result<StudentIdentity, Error>;

    /// Identify a student by email address. No password is involved.
    async fn login_student(&self, email: &str) -> Result<StudentIdentity, Error>;
}
