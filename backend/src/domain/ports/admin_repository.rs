//! Port for administrator account storage.

use async_trait::async_trait;

use crate::domain::{AdminAccount, NewAdmin};

use super::define_port_error;

define_port_error! {
    /// Errors raised by administrator repository adapters.
    pub enum AdminRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "admin repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "admin repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Look up an administrator by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, AdminRepositoryError>;

    /// Insert the administrator unless the username is taken.
    ///
    /// Returns `true` when a row was written.
    async fn insert_if_absent(&self, admin: &NewAdmin) -> Result<bool, AdminRepositoryError>;
}
