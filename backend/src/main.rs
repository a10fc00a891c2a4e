//! Arts day registration service entry point.
//!
//! Startup order: settings, migrations (when PostgreSQL is configured),
//! default administrator seeding, then the HTTP listener.

mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::{Clock, DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use artsday::domain::ports::{
    AdminRepository, EventRepository, RegistrationRepository, StudentRepository,
};
use artsday::domain::{DefaultAdmin, RegistrationPolicy, SeedOutcome};
use artsday::inbound::http::HttpState;
use artsday::inbound::http::health::HealthState;
use artsday::inbound::http::session_config::{BuildMode, session_settings_from_env};
use artsday::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use artsday::outbound::{Argon2CredentialHasher, InMemoryStore};
use artsday::settings::AppSettings;
use server::{Repositories, ServerConfig, build_http_state, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .wrap_err("invalid session configuration")?;
    let bind_addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .wrap_err_with(|| format!("invalid bind address {}", settings.bind_addr()))?;

    let hasher = Arc::new(Argon2CredentialHasher::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let admin = settings.default_admin();
    let policy = settings.registration_policy();
    if settings.uses_default_admin_password() {
        warn!(
            username = admin.username(),
            "seeding the built-in administrator password; set ARTSDAY_DEFAULT_ADMIN_PASSWORD"
        );
    }

    let http_state = match settings.database_url() {
        Some(url) => {
            let applied = run_migrations(url).await?;
            info!(applied, "database schema up to date");
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("failed to build database pool")?;
            wire(Repositories::diesel(pool), hasher, clock, &admin, policy).await?
        }
        None => {
            warn!("ARTSDAY_DATABASE_URL not set; data lives in memory and is lost on exit");
            let store = Arc::new(InMemoryStore::new(clock.clone()));
            wire(Repositories::in_memory(store), hasher, clock, &admin, policy).await?
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(session.key, session.cookie_secure, session.same_site, bind_addr);
    info!(bind_addr = %config.bind_addr(), "starting HTTP server");
    create_server(health_state, http_state, config)?.await?;
    Ok(())
}

/// Seed the administrator, then build handler state over `repos`.
async fn wire<S, A, E, R>(
    repos: Repositories<S, A, E, R>,
    hasher: Arc<Argon2CredentialHasher>,
    clock: Arc<dyn Clock>,
    admin: &DefaultAdmin,
    policy: RegistrationPolicy,
) -> Result<web::Data<HttpState>>
where
    S: StudentRepository + 'static,
    A: AdminRepository + 'static,
    E: EventRepository + 'static,
    R: RegistrationRepository + 'static,
{
    match repos.seed_default_admin(hasher.as_ref(), admin).await? {
        SeedOutcome::Created => info!(username = admin.username(), "default admin created"),
        SeedOutcome::AlreadyPresent => {}
    }
    Ok(build_http_state(&repos, hasher, clock, policy))
}
