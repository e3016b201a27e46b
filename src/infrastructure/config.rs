//! Application configuration.
//!
//! Configuration is read once at startup from environment variables (a `.env`
//! file is honoured through `dotenvy`). Parsing itself is a pure function over a
//! key lookup, see [`AppConfig::from_lookup`].
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: connection pool size (default: `10`)
//! - `PERSIST_TIMEOUT_MS`: upper bound for a single save (default: unbounded)
//! - `HOST`: server host address (default: `0.0.0.0`)
//! - `PORT`: server port (default: `3000`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

// =============================================================================
// Configuration Error
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Invalid storage mode: {0} (expected in_memory or postgres)")]
    InvalidStorageMode(String),

    #[error("Invalid log format: {0} (expected pretty or json)")]
    InvalidLogFormat(String),

    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

// =============================================================================
// Modes
// =============================================================================

/// Backing store for to-do items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage, lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` storage.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_string())),
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Storage-related settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub mode: StorageMode,
    /// Required when `mode` is `Postgres`.
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: StorageMode::InMemory,
            database_url: None,
            max_connections: 10,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// `None` leaves the save call unbounded.
    pub persist_timeout: Option<Duration>,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            persist_timeout: None,
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a value cannot be parsed or if
    /// `DATABASE_URL` is missing while `STORAGE_MODE=postgres`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let storage = StorageConfig {
            mode: read("STORAGE_MODE")
                .map(|value| value.parse::<StorageMode>())
                .transpose()?
                .unwrap_or_default(),
            database_url: read("DATABASE_URL"),
            max_connections: parse_positive(
                "DATABASE_MAX_CONNECTIONS",
                read("DATABASE_MAX_CONNECTIONS"),
                defaults.storage.max_connections,
            )?,
        };

        let persist_timeout = read("PERSIST_TIMEOUT_MS")
            .map(|value| parse_positive::<u64>("PERSIST_TIMEOUT_MS", Some(value), 0))
            .transpose()?
            .map(Duration::from_millis);

        let config = Self {
            storage,
            persist_timeout,
            host: read("HOST").unwrap_or(defaults.host),
            port: parse_positive("PORT", read("PORT"), defaults.port)?,
            log_format: read("LOG_FORMAT")
                .map(|value| value.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` if `PostgreSQL` storage
    /// is selected without a connection URL.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage.mode, StorageMode::Postgres) && self.storage.database_url.is_none()
        {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }

    /// `host:port` string for binding the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses an optional numeric value that must be greater than zero.
fn parse_positive<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigurationError>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let Some(value) = value else {
        return Ok(default);
    };

    let parsed = value
        .parse::<T>()
        .map_err(|error| ConfigurationError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' ({error})"),
        })?;

    if parsed == T::default() {
        return Err(ConfigurationError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than 0".to_string(),
        });
    }

    Ok(parsed)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigurationError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[rstest]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("memory", StorageMode::InMemory)]
    #[case("Postgres", StorageMode::Postgres)]
    #[case("pg", StorageMode::Postgres)]
    fn test_storage_mode_from_str(#[case] input: &str, #[case] expected: StorageMode) {
        assert_eq!(input.parse::<StorageMode>().unwrap(), expected);
    }

    #[rstest]
    fn test_storage_mode_from_str_invalid() {
        let result = "mysql".parse::<StorageMode>();
        assert_eq!(
            result,
            Err(ConfigurationError::InvalidStorageMode("mysql".to_string()))
        );
    }

    #[rstest]
    #[case("pretty", LogFormat::Pretty)]
    #[case("JSON", LogFormat::Json)]
    fn test_log_format_from_str(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(input.parse::<LogFormat>().unwrap(), expected);
    }

    #[rstest]
    fn test_empty_lookup_yields_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[rstest]
    fn test_full_lookup() {
        let config = load(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/todos"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("PERSIST_TIMEOUT_MS", "250"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.storage.mode, StorageMode::Postgres);
        assert_eq!(
            config.storage.database_url.as_deref(),
            Some("postgres://localhost/todos")
        );
        assert_eq!(config.storage.max_connections, 4);
        assert_eq!(config.persist_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[rstest]
    fn test_postgres_without_url_is_rejected() {
        let result = load(&[("STORAGE_MODE", "postgres")]);
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));
    }

    #[rstest]
    fn test_blank_values_count_as_unset() {
        let result = load(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "   "),
        ]);
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));
    }

    #[rstest]
    #[case("PORT", "not-a-port")]
    #[case("PORT", "0")]
    #[case("DATABASE_MAX_CONNECTIONS", "-1")]
    #[case("PERSIST_TIMEOUT_MS", "0")]
    fn test_invalid_numbers_are_rejected(#[case] key: &str, #[case] value: &str) {
        let result = load(&[(key, value)]);
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidValue { key: ref found, .. }) if found == key
        ));
    }
}
