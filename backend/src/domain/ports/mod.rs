//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CredentialHasher`]) are implemented by
//! outbound adapters. Driving ports ([`StudentAccounts`], [`AdminLogin`],
//! [`EventCatalogue`], [`EventRegistration`]) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_login;
mod admin_repository;
mod credential_hasher;
mod event_catalogue;
mod event_registration;
mod event_repository;
mod registration_repository;
mod student_accounts;
mod student_repository;

pub use admin_login::AdminLogin;
#[cfg(test)]
pub use admin_login::MockAdminLogin;
#[cfg(test)]
pub use admin_repository::MockAdminRepository;
pub use admin_repository::{AdminRepository, AdminRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
pub use event_catalogue::EventCatalogue;
#[cfg(test)]
pub use event_catalogue::MockEventCatalogue;
pub use event_registration::EventRegistration;
#[cfg(test)]
pub use event_registration::MockEventRegistration;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use registration_repository::MockRegistrationRepository;
pub use registration_repository::{RegistrationRepository, RegistrationRepositoryError};
#[cfg(test)]
pub use student_accounts::MockStudentAccounts;
pub use student_accounts::StudentAccounts;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentRepositoryError};
