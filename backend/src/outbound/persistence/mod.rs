//! PostgreSQL persistence adapters built on Diesel.
//!
//! Each repository owns a [`DbPool`] clone and maps Diesel failures into its
//! port's error type. Row structs in `models` never leave this module.

mod diesel_admin_repository;
mod diesel_event_repository;
mod diesel_registration_repository;
mod diesel_student_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_admin_repository::DieselAdminRepository;
pub use diesel_event_repository::DieselEventRepository;
pub use diesel_registration_repository::DieselRegistrationRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
