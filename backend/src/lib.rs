//! Arts day registration backend.
//!
//! Students sign up and register for onstage or offstage events;
//! administrators create events and read participant rosters. The crate is
//! laid out as ports and adapters: [`domain`] holds the rules, [`inbound`]
//! the HTTP surface, [`outbound`] the PostgreSQL, in-memory and password
//! hashing adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
