//! Shared helpers for the Diesel adapter integration tests.
//!
//! Each test binary that includes this module gets one embedded PostgreSQL
//! cluster and a fresh migrated database per test.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use embedded_postgres::{TestDatabase, seed_admin, test_database};
