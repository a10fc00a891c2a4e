//! Wiring of repositories into the driving ports held by [`HttpState`].
//!
//! PostgreSQL and the in-memory store expose the same four repository
//! ports, so startup picks one [`Repositories`] set and everything above it
//! is shared.

use std::sync::Arc;

use actix_web::web;
use mockable::Clock;

use artsday::domain::ports::{
    AdminRepository, CredentialHasher, EventRepository, RegistrationRepository, StudentRepository,
};
use artsday::domain::{
    AuthenticationService, BootstrapError, DefaultAdmin, EventCatalogService, RegistrationPolicy,
    RegistrationService, SeedOutcome, ensure_default_admin,
};
use artsday::inbound::http::HttpState;
use artsday::outbound::InMemoryStore;
use artsday::outbound::persistence::{
    DbPool, DieselAdminRepository, DieselEventRepository, DieselRegistrationRepository,
    DieselStudentRepository,
};

/// One adapter per driven repository port.
pub struct Repositories<S, A, E, R> {
    pub students: Arc<S>,
    pub admins: Arc<A>,
    pub events: Arc<E>,
    pub registrations: Arc<R>,
}

impl Repositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore> {
    /// Serve every port from a single shared store.
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            students: store.clone(),
            admins: store.clone(),
            events: store.clone(),
            registrations: store,
        }
    }
}

impl
    Repositories<
        DieselStudentRepository,
        DieselAdminRepository,
        DieselEventRepository,
        DieselRegistrationRepository,
    >
{
    /// PostgreSQL adapters sharing one connection pool.
    pub fn diesel(pool: DbPool) -> Self {
        Self {
            students: Arc::new(DieselStudentRepository::new(pool.clone())),
            admins: Arc::new(DieselAdminRepository::new(pool.clone())),
            events: Arc::new(DieselEventRepository::new(pool.clone())),
            registrations: Arc::new(DieselRegistrationRepository::new(pool)),
        }
    }
}

impl<S, A, E, R> Repositories<S, A, E, R>
where
    A: AdminRepository,
{
    /// Seed the configured administrator into this backend.
    pub async fn seed_default_admin<H>(
        &self,
        hasher: &H,
        admin: &DefaultAdmin,
    ) -> Result<SeedOutcome, BootstrapError>
    where
        H: CredentialHasher + ?Sized,
    {
        ensure_default_admin(self.admins.as_ref(), hasher, admin).await
    }
}

/// Build the HTTP state from repositories and ambient services.
pub fn build_http_state<S, A, E, R, H>(
    repos: &Repositories<S, A, E, R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
    policy: RegistrationPolicy,
) -> web::Data<HttpState>
where
    S: StudentRepository + 'static,
    A: AdminRepository + 'static,
    E: EventRepository + 'static,
    R: RegistrationRepository + 'static,
    H: CredentialHasher + 'static,
{
    let auth = Arc::new(AuthenticationService::new(
        repos.students.clone(),
        repos.admins.clone(),
        hasher,
    ));
    let catalogue = Arc::new(EventCatalogService::new(
        repos.events.clone(),
        repos.registrations.clone(),
    ));
    let registrations = Arc::new(
        RegistrationService::new(repos.registrations.clone(), repos.events.clone(), clock.clone())
            .with_policy(policy),
    );
    web::Data::new(HttpState {
        students: auth.clone(),
        admins: auth,
        catalogue,
        registrations,
        clock,
    })
}
