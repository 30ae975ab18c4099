//! Persistent store adapter.
//!
//! Provides `Store`, an explicitly constructed handle around a PostgreSQL
//! connection pool. The handle is created once at process start, injected
//! into the token ledger, and closed once at process shutdown — no ambient
//! global pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

/// Default connection pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default pool acquire / operation timeout.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default idle-connection reap timeout.
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Errors from store construction and connectivity checks.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(sqlx::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),
}

/// Configuration for the PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool.
    pub acquire_timeout: Duration,
    /// Idle connections are closed after this long.
    pub idle_timeout: Duration,
}

impl StoreConfig {
    /// Config for `url` with default pool sizing and timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Handle to the PostgreSQL store.
///
/// Cheap to clone; all clones share one pool. Construction is lazy — no
/// connection is dialed until the first operation, so a process can start
/// (degraded) while the database is unreachable.
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Build the connection pool. Fails only on an unparseable URL;
    /// reachability is checked by [`Store::ping`].
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_lazy(&config.url)
            .map_err(StoreError::InvalidUrl)?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (tests).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One round trip to confirm the database is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Borrow the underlying pool for query execution.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drain in-flight operations and close the pool. Called once at
    /// process shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
