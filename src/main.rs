//! LightBnB Backend
//!
//! Connects to the configured PostgreSQL database, applies the schema
//! migrations and reports table sizes.

use anyhow::Context;
use lightbnb_backend::config::Config;
use lightbnb_backend::db::DatabasePool;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path =
        std::env::var("LIGHTBNB_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // DATABASE_URL replaces the connection parameters; pool sizing still comes from config
    let db = match std::env::var("DATABASE_URL") {
        Ok(url) => DatabasePool::from_url(&url, &config.database).await,
        Err(_) => DatabasePool::from_config(&config.database).await,
    }
    .context("connecting to database")?;

    db.run_migrations().await?;

    let stats = db.stats().await?;
    info!(
        users = stats.users,
        properties = stats.properties,
        reservations = stats.reservations,
        "LightBnB database ready"
    );

    db.close().await;
    Ok(())
}
