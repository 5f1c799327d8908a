//! Database module for handling PostgreSQL connections
//!
//! This module provides the database configuration, the single-connection
//! connector used by the serverless entry point, the pooled alternative used
//! by the long-lived service, and a health check.

use crate::error::{DatabaseError, DatabaseResult};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool, Postgres};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info, warn};

/// Database configuration struct
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database host name or address
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database user
    pub user: String,
    /// Password for `user`
    pub password: String,
    /// Name of the database holding the `users` table
    pub database: String,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Maximum number of connections when a pool is used
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "users".to_string(),
            connect_timeout_secs: 5,
            max_connections: 5,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// Create a new DatabaseConfig from environment variables
    ///
    /// # Environment Variables
    /// - `DB_HOST`: Database host (default: "localhost")
    /// - `DB_PORT`: Database port (default: 5432)
    /// - `DB_USER`: Database user (default: "postgres")
    /// - `DB_PASSWORD`: Database password (default: "postgres")
    /// - `DB_NAME`: Database name (default: "users")
    /// - `DB_CONNECT_TIMEOUT`: Connect timeout in seconds (default: 5)
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size for the long-lived service (default: 5)
    pub fn from_env() -> DatabaseResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("DB_HOST").unwrap_or(defaults.host),
            port: parse_env("DB_PORT", defaults.port)?,
            user: env::var("DB_USER").unwrap_or(defaults.user),
            password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
            database: env::var("DB_NAME").unwrap_or(defaults.database),
            connect_timeout_secs: parse_env("DB_CONNECT_TIMEOUT", defaults.connect_timeout_secs)?,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
        })
    }

    /// Connection options for the configured database
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> DatabaseResult<T>
where
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DatabaseError::Configuration(format!("Invalid {}={}: {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}

/// Open a single connection to the configured database
///
/// The caller owns the returned connection and is responsible for closing it.
/// Failures are logged and returned as-is; there is no retry.
pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<PgConnection> {
    let options = config.connect_options();

    match tokio::time::timeout(config.connect_timeout(), PgConnection::connect_with(&options)).await
    {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => {
            error!(
                host = %config.host,
                database = %config.database,
                "Could not connect to database: {}",
                e
            );
            Err(DatabaseError::Connection(e))
        }
        Err(_) => {
            error!(
                host = %config.host,
                database = %config.database,
                "Could not connect to database within {}s",
                config.connect_timeout_secs
            );
            Err(DatabaseError::Timeout(config.connect_timeout_secs))
        }
    }
}

/// Initialize a PostgreSQL connection pool
///
/// # Arguments
///
/// * `config` - Database configuration
///
/// # Returns
///
/// * `DatabaseResult<PgPool>` - PostgreSQL connection pool or error
pub async fn init_pool(config: &DatabaseConfig) -> DatabaseResult<PgPool> {
    info!("Initializing database connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect_with(config.connect_options())
        .await
        .map_err(|e| {
            error!("Could not initialize database pool: {}", e);
            DatabaseError::Connection(e)
        })?;

    info!("Database connection pool initialized successfully");
    Ok(pool)
}

/// Where operations get their connections from
#[derive(Debug, Clone)]
pub enum ConnectionSource {
    /// A fresh connection per acquisition, closed on release
    Direct(DatabaseConfig),
    /// A shared pool; released connections go back to it
    Pooled(PgPool),
}

impl ConnectionSource {
    /// Acquire a connection lease
    pub async fn acquire(&self) -> DatabaseResult<DbConnection> {
        match self {
            ConnectionSource::Direct(config) => connect(config).await.map(DbConnection::Direct),
            ConnectionSource::Pooled(pool) => {
                pool.acquire().await.map(DbConnection::Pooled).map_err(|e| {
                    error!("Could not acquire pooled connection: {}", e);
                    DatabaseError::Connection(e)
                })
            }
        }
    }
}

/// A connection acquired from a [`ConnectionSource`]
///
/// Every lease must be handed back through [`DbConnection::release`].
#[derive(Debug)]
pub enum DbConnection {
    Direct(PgConnection),
    Pooled(PoolConnection<Postgres>),
}

impl DbConnection {
    /// Borrow the underlying connection for executing statements
    pub fn connection(&mut self) -> &mut PgConnection {
        match self {
            DbConnection::Direct(conn) => conn,
            DbConnection::Pooled(conn) => &mut **conn,
        }
    }

    /// Close a direct connection, or return a pooled one to its pool
    pub async fn release(self) {
        match self {
            DbConnection::Direct(conn) => {
                if let Err(e) = conn.close().await {
                    warn!("Error while closing database connection: {}", e);
                }
            }
            DbConnection::Pooled(conn) => drop(conn),
        }
    }
}

/// Check database connectivity
///
/// # Arguments
///
/// * `source` - Where to get the connection from
///
/// # Returns
///
/// * `DatabaseResult<bool>` - True if `SELECT 1` succeeds
pub async fn health_check(source: &ConnectionSource) -> DatabaseResult<bool> {
    let mut conn = source.acquire().await?;
    let result = sqlx::query("SELECT 1").execute(conn.connection()).await;
    conn.release().await;

    result.map_err(DatabaseError::Query)?;
    Ok(true)
}
