//! Driving port for administrator authentication.

use async_trait::async_trait;

use crate::domain::{AdminCredentials, AdminIdentity, Error};

/// Administrator login use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminLogin: Send + Sync {
    /// Check the password against the stored hash.
    ///
    /// Unknown usernames and wrong passwords fail with the same error.
    async fn login_admin(&self, credentials: &AdminCredentials) -> Result<AdminIdentity, Error>;
}
