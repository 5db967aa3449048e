//! Configuration module for loading and parsing TOML configuration files.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database server host.
    pub host: String,
    /// Database server port.
    pub port: u16,
    /// Role to connect as.
    pub user: String,
    /// Password for the role.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "vagrant".to_string(),
            password: String::new(),
            name: "lightbnb".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseConfig {
    /// Builds sqlx connection options from the configured parameters.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);

        if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        }
    }

    /// Pool sizing and timeouts from the configured parameters.
    #[must_use]
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout())
    }

    /// Acquire timeout as a [`Duration`].
    #[must_use]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        let db = &self.database;

        if db.host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database host cannot be empty".to_string(),
            ));
        }
        if db.name.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database name cannot be empty".to_string(),
            ));
        }
        if db.user.is_empty() {
            return Err(ConfigError::InvalidValue(
                "database user cannot be empty".to_string(),
            ));
        }
        if db.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if db.acquire_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "acquire_timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[database]
host = "db.internal"
port = 5433
user = "lightbnb"
password = "secret"
name = "lightbnb_test"
max_connections = 4
acquire_timeout_secs = 2

[logging]
filter = "debug"
"#;

        let config = Config::parse(toml_content).expect("should parse");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.user, "lightbnb");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.name, "lightbnb_test");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.acquire_timeout(), Duration::from_secs(2));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = Config::parse("[database]\nname = \"other\"\n").expect("should parse");
        assert_eq!(config.database.name, "other");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").expect("should parse");
        assert_eq!(config.database.name, "lightbnb");
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_pool_options_follow_config() {
        let config = Config::parse(
            "[database]\nmax_connections = 3\nacquire_timeout_secs = 7\n",
        )
        .expect("should parse");

        let options = config.database.pool_options();
        assert_eq!(options.get_max_connections(), 3);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(7));
    }

    #[test]
    fn test_validation_zero_connections() {
        let result = Config::parse("[database]\nmax_connections = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validation_empty_name() {
        let mut config = Config::default();
        config.database.name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::parse("[database\nhost = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            Config::load_or_default("/nonexistent/lightbnb/config.toml").expect("should default");
        assert_eq!(config.database.host, "localhost");
    }
}
