//! Embedded PostgreSQL databases for the Diesel repositories.
//!
//! The cluster is started once per test binary through
//! `pg-embed-setup-unpriv`; every test then gets its own temporary database
//! with the artsday migrations applied. Cluster calls are blocking, so they
//! run before the test's runtime is entered.

use std::future::Future;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use artsday::domain::ports::AdminRepository;
use artsday::domain::{AdminId, NewAdmin};
use artsday::outbound::persistence::{DbPool, DieselAdminRepository, PoolConfig, run_migrations};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

use super::cluster_skip::handle_cluster_setup_failure;

/// Stable so a data directory reused by a later test binary still accepts us.
const TEST_PASSWORD: &str = "artsday-test";
const BOOTSTRAP_RETRIES: u32 = 3;
const BOOTSTRAP_RETRY_DELAY: Duration = Duration::from_millis(500);

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// A migrated database and the runtime that drives its pool.
///
/// Fields drop in order: pooled connections close before the runtime stops
/// and the database is removed last.
pub struct TestDatabase {
    pub pool: DbPool,
    runtime: Runtime,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let _lock = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let _password = std::env::var_os("PG_PASSWORD")
        .is_none()
        .then(|| env_lock::lock_env([("PG_PASSWORD", Some(TEST_PASSWORD.to_owned()))]));

    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < BOOTSTRAP_RETRIES => {
                eprintln!("pg-embed: bootstrap attempt {attempt} failed, retrying: {err:?}");
                std::thread::sleep(BOOTSTRAP_RETRY_DELAY * attempt);
                attempt += 1;
            }
            Err(err) => return Err(format!("{err:?}")),
        }
    }
}

fn provision() -> Result<TestDatabase, String> {
    let cluster = shared_cluster()?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_owned();

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let pool = runtime.block_on(async {
        run_migrations(&url).await.map_err(|err| err.to_string())?;
        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        DbPool::new(config).await.map_err(|err| err.to_string())
    })?;

    Ok(TestDatabase {
        pool,
        runtime,
        _database: database,
    })
}

/// A fresh database, or `None` when the cluster is unavailable and
/// `SKIP_TEST_CLUSTER` allows skipping.
pub fn test_database() -> Option<TestDatabase> {
    match provision() {
        Ok(db) => Some(db),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

/// Insert the `admin` account that owns seeded events.
pub async fn seed_admin(pool: &DbPool) -> AdminId {
    let admins = DieselAdminRepository::new(pool.clone());
    admins
        .insert_if_absent(&NewAdmin {
            username: "admin".to_owned(),
            password_hash: "hash".to_owned(),
        })
        .await
        .expect("insert admin");
    admins
        .find_by_username("admin")
        .await
        .expect("lookup admin")
        .expect("admin exists")
        .id
}
