//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so the
//! same handlers run over PostgreSQL, the in-memory store or test doubles.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AdminLogin, EventCatalogue, EventRegistration, StudentAccounts};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub students: Arc<dyn StudentAccounts>,
    pub admins: Arc<dyn AdminLogin>,
    pub catalogue: Arc<dyn EventCatalogue>,
    pub registrations: Arc<dyn EventRegistration>,
    /// Source of "now" for the eligible-events listing.
    pub clock: Arc<dyn Clock>,
}
