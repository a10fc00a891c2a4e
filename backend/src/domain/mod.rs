//! Domain primitives, services and ports.
//!
//! Purpose: hold the registration rules and the authentication model
//! independently of HTTP and SQL. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode / Portal: transport-agnostic failures and where an
//!   anonymous caller should log in.
//! - RequestContext / Actor: the explicit identity passed to every operation.
//! - Student, Event, Registration and their read models.
//! - AuthenticationService, EventCatalogService, RegistrationService: the
//!   driving port implementations.
//! - ensure_default_admin: idempotent startup seeding.

pub mod admin;
pub mod auth;
pub mod authentication_service;
pub mod bootstrap;
pub mod context;
pub mod error;
pub mod event;
pub mod event_catalog_service;
pub mod ids;
pub mod ports;
pub mod registration;
pub mod registration_service;
pub mod student;
pub mod trace_id;

pub use self::admin::{AdminAccount, AdminIdentity, NewAdmin};
pub use self::auth::{AdminCredentials, CredentialsValidationError};
pub use self::authentication_service::AuthenticationService;
pub use self::bootstrap::{BootstrapError, DefaultAdmin, SeedOutcome, ensure_default_admin};
pub use self::context::{Actor, RequestContext};
pub use self::error::{Error, ErrorCode, Portal};
pub use self::event::{
    DEFAULT_MAX_PARTICIPANTS, Event, EventCategory, EventSummary, NewEvent, UnknownCategory,
};
pub use self::event_catalog_service::EventCatalogService;
pub use self::ids::{AdminId, EventId, RegistrationId, StudentId};
pub use self::registration::{
    OnstageParticipant, Registration, RegistrationPolicy, RegistrationStatus, StudentRegistration,
};
pub use self::registration_service::RegistrationService;
pub use self::student::{NewStudent, Student, StudentIdentity};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
