//! Startup seeding of the default administrator account.

use std::fmt;

use thiserror::Error;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::NewAdmin;
use crate::domain::ports::{
    AdminRepository, AdminRepositoryError, CredentialHasher, CredentialHasherError,
};

/// Username and plaintext password of the account seeded on first start.
#[derive(Clone)]
pub struct DefaultAdmin {
    username: String,
    password: Zeroizing<String>,
}

impl DefaultAdmin {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for DefaultAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAdmin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What [`ensure_default_admin`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The account was created by this call.
    Created,
    /// An administrator with that username already existed.
    AlreadyPresent,
}

/// Errors raised while seeding the default administrator.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to hash default admin password: {0}")]
    Hash(#[from] CredentialHasherError),
    #[error("failed to store default admin: {0}")]
    Store(#[from] AdminRepositoryError),
}

/// Create the default administrator unless one with that username exists.
///
/// Safe to call on every start; the password is only hashed when a row is
/// about to be written.
pub async fn ensure_default_admin<A, H>(
    admins: &A,
    hasher: &H,
    admin: &DefaultAdmin,
) -> Result<SeedOutcome, BootstrapError>
where
    A: AdminRepository + ?Sized,
    H: CredentialHasher + ?Sized,
{
    if admins.find_by_username(admin.username()).await?.is_some() {
        info!(username = admin.username(), "default admin already present; skipping");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password_hash = hasher.hash(admin.password.as_str())?;
    let inserted = admins
        .insert_if_absent(&NewAdmin {
            username: admin.username().to_owned(),
            password_hash,
        })
        .await?;

    if inserted {
        info!(username = admin.username(), "default admin created");
        Ok(SeedOutcome::Created)
    } else {
        info!(username = admin.username(), "default admin created concurrently; skipping");
        Ok(SeedOutcome::AlreadyPresent)
    }
}
