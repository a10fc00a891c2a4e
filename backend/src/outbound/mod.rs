//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local repositories with the same constraints, used
//!   when no database is configured and by tests.
//! - **credentials**: Argon2id password hashing.

pub mod credentials;
pub mod memory;
pub mod persistence;

pub use credentials::Argon2CredentialHasher;
pub use memory::InMemoryStore;
