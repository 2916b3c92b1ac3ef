//! bb8-managed pool of async Diesel PostgreSQL connections.
//!
//! Repositories check out one connection per operation. A checkout waits at
//! most [`PoolConfig::checkout_timeout`] before failing with
//! [`PoolError::Checkout`].

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Pooled connection handed to repositories.
pub type PgConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

/// Failures raised by [`DbPool`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available in time, or opening one failed.
    #[error("database connection checkout failed: {message}")]
    Checkout { message: String },

    /// The pool could not be constructed.
    #[error("database pool setup failed: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Checkout failure carrying the driver message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Setup failure carrying the driver message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Sizing and timeout settings for [`DbPool`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use users_api::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/users")
///     .max_connections(4)
///     .checkout_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size, 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Upper bound on open connections.
    pub max_size: u32,
    /// Connections kept open while idle.
    pub min_idle: Option<u32>,
    /// How long a checkout waits for a free connection.
    pub timeout: Duration,
}

impl PoolConfig {
    /// Settings for `database_url` with 10 connections, none kept idle, and
    /// a 30 second checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 10,
            min_idle: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Cap the number of open connections.
    #[must_use]
    pub fn max_connections(self, max_size: u32) -> Self {
        Self { max_size, ..self }
    }

    /// Keep `min_idle` connections open between requests.
    #[must_use]
    pub fn idle_connections(self, min_idle: Option<u32>) -> Self {
        Self { min_idle, ..self }
    }

    /// Bound how long a checkout may wait.
    #[must_use]
    pub fn checkout_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

/// Shared handle to the connection pool. Clones refer to the same pool.
#[derive(Clone)]
pub struct DbPool {
    pool: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration or the
    /// idle connections cannot be opened.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
            min_idle,
            timeout,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        Pool::builder()
            .max_size(max_size)
            .min_idle(min_idle)
            .connection_timeout(timeout)
            .build(manager)
            .await
            .map(|pool| Self { pool })
            .map_err(|err| PoolError::build(err.to_string()))
    }

    /// Check out a connection for one repository operation.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when the checkout times out or the
    /// connection cannot be established.
    pub async fn get(&self) -> Result<PgConnection<'_>, PoolError> {
        self.pool
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_applies_defaults() {
        let config = PoolConfig::new("postgres://localhost/users");

        assert_eq!(config.database_url, "postgres://localhost/users");
        assert_eq!(config.max_size, 10);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn builders_override_each_setting() {
        let config = PoolConfig::new("postgres://localhost/users")
            .max_connections(4)
            .idle_connections(Some(1))
            .checkout_timeout(Duration::from_secs(3));

        assert_eq!(config.max_size, 4);
        assert_eq!(config.min_idle, Some(1));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[rstest]
    #[case(PoolError::checkout("connection refused"), "checkout failed: connection refused")]
    #[case(PoolError::build("invalid URL"), "setup failed: invalid URL")]
    fn error_display_includes_message(#[case] error: PoolError, #[case] fragment: &str) {
        assert!(error.to_string().contains(fragment));
    }
}
