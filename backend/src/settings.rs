//! Server settings loaded via OrthoConfig.
//!
//! Values layer command-line arguments over `USERS_API_*` environment
//! variables over configuration files.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Configuration values controlling the listener and the storage backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. When absent, users live in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection before failing.
    pub db_connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving. Read through
    /// [`ServerSettings::run_migrations`], which treats an unset value as
    /// `true`.
    pub run_migrations: Option<bool>,
}

impl ServerSettings {
    /// Return the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Whether embedded migrations run before the listener starts.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Return pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let timeout = self
            .db_connection_timeout_secs
            .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS);
        Some(
            PoolConfig::new(url)
                .max_connections(self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .checkout_timeout(Duration::from_secs(timeout)),
        )
    }
}
