//! Service configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::time::Duration;

use bank_db::DbConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_PATH: &str = "./bank.db";
pub const DEFAULT_LOG_FILTER: &str = "info,bank_service=debug,bank_db=debug,sqlx=warn";

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite database file, or `:memory:`
    pub database_path: String,

    /// Pool size upper bound
    pub db_max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub db_connect_timeout_secs: u64,

    /// `tracing` filter directive, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            db_max_connections: 5,
            db_connect_timeout_secs: 30,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServiceConfig::default();

        let config = ServiceConfig {
            database_path: lookup("BANK_DATABASE_PATH").unwrap_or(defaults.database_path),
            db_max_connections: match lookup("BANK_DB_MAX_CONNECTIONS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("BANK_DB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.db_max_connections,
            },
            db_connect_timeout_secs: match lookup("BANK_DB_CONNECT_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    ConfigError::InvalidValue("BANK_DB_CONNECT_TIMEOUT_SECS".to_string())
                })?,
                None => defaults.db_connect_timeout_secs,
            },
            log_filter: lookup("BANK_LOG_FILTER").unwrap_or(defaults.log_filter),
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("BANK_DATABASE_PATH".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("BANK_DB_MAX_CONNECTIONS".to_string()));
        }
        if config.db_connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("BANK_DB_CONNECT_TIMEOUT_SECS".to_string()));
        }

        Ok(config)
    }

    /// Storage settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database_path);
        let config = if config.is_in_memory() {
            DbConfig::in_memory()
        } else {
            config.max_connections(self.db_max_connections)
        };
        config.connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
