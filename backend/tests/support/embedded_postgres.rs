//! Embedded PostgreSQL for adapter integration suites.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` unless `PG_RUNTIME_DIR`
//! and `PG_DATA_DIR` are set. Sandboxed runs cannot write there, so when
//! either is missing both are pointed at fresh directories under the target
//! directory for the duration of the bootstrap.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip suites on machines that cannot start a
//! cluster. Without it a failed bootstrap fails the test.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use users_api::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const BOOTSTRAP_ATTEMPTS: u32 = 4;
const FIRST_RETRY_DELAY: Duration = Duration::from_millis(500);

fn scratch_dirs() -> std::io::Result<(String, String)> {
    let target = std::env::var_os("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../target"));
    let base = target
        .join("pg-embed")
        .join(format!("{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((
        runtime_dir.to_string_lossy().into_owned(),
        data_dir.to_string_lossy().into_owned(),
    ))
}

/// Binary downloads fail intermittently when suites run in parallel.
fn worth_retrying(message: &str) -> bool {
    let message = message.to_lowercase();
    ["timed out", "timeout", "connection reset", "connection refused", "dns error"]
        .iter()
        .any(|needle| message.contains(needle))
}

/// Start a cluster, retrying transient download failures with backoff.
pub fn start_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let _dirs = if std::env::var_os("PG_RUNTIME_DIR").is_some()
        && std::env::var_os("PG_DATA_DIR").is_some()
    {
        None
    } else {
        let (runtime_dir, data_dir) = scratch_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir)),
            ("PG_DATA_DIR", Some(data_dir)),
        ]))
    };

    let mut delay = FIRST_RETRY_DELAY;
    let mut attempt = 1;
    loop {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                let message = format!("{err:?}");
                if attempt == BOOTSTRAP_ATTEMPTS || !worth_retrying(&message) {
                    return Err(message);
                }
                eprintln!("pg-embed: attempt {attempt} failed, retrying in {delay:?}: {message}");
                std::thread::sleep(delay);
                delay *= 2;
                attempt += 1;
            }
        }
    }
}

/// Create an empty, migrated database on `cluster` and return its URL.
pub fn migrated_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("users_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url("postgres");
    let mut admin = Client::connect(&admin_url, NoTls).map_err(|err| err.to_string())?;
    admin
        .batch_execute(&format!("CREATE DATABASE {name}"))
        .map_err(|err| err.to_string())?;

    let url = cluster.connection().database_url(&name);
    run_pending_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}

/// Remove the `users` table to simulate a database without the schema.
pub fn drop_users_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| err.to_string())?;
    client
        .batch_execute("DROP TABLE IF EXISTS users")
        .map_err(|err| err.to_string())
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
pub fn skip_or_fail<T>(reason: impl std::fmt::Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if skip {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("embedded PostgreSQL unavailable: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
