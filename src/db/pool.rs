//! Database connection pool management.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::db::DatabaseStats;
use crate::error::{DbError, query_failed};

/// Database connection pool wrapper.
///
/// Cloning is cheap; every clone shares the same underlying pool. All query
/// functions are methods on this type.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Creates a new database pool from the connection string.
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Creates a new database pool from structured configuration.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = config
            .pool_options()
            .connect_with(config.connect_options())
            .await?;

        info!(
            host = %config.host,
            database = %config.name,
            "Database connection pool established"
        );

        Ok(Self { pool })
    }

    /// Creates a new database pool from a connection string, sized and timed
    /// out according to `config`. Connection parameters in `config` are ignored.
    ///
    /// # Errors
    /// Returns an error if the URL is malformed or the connection cannot be
    /// established.
    pub async fn from_url(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(database_url)?;
        let pool = config.pool_options().connect_with(options).await?;

        info!(
            max_connections = config.max_connections,
            "Database connection pool established"
        );

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs database migrations.
    ///
    /// # Errors
    /// Returns an error if migrations fail.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Counts users, properties and reservations in a single round trip.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn stats(&self) -> Result<DatabaseStats, DbError> {
        sqlx::query_as::<_, DatabaseStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM properties) AS properties,
                (SELECT COUNT(*) FROM reservations) AS reservations
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(query_failed("stats"))
    }

    /// Closes every connection in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
