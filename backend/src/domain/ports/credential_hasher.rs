//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum CredentialHasherError {
        /// Producing a hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes new passwords and checks candidates against stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash `password` into a self-describing string for storage.
    fn hash(&self, password: &str) -> Result<String, CredentialHasherError>;

    /// Whether `password` matches `stored_hash`. A mismatch is `Ok(false)`.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHasherError>;
}
