//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `EVENT_ADMISSION` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use event_admission::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Serving as {:?}", config.deployment.role);
//! ```

mod database;
mod deployment;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use deployment::{DeploymentConfig, ServiceRole, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Topology and storage selection
    #[serde(default)]
    pub deployment: DeploymentConfig,

    /// PostgreSQL connection; required when storage is `postgres`
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `EVENT_ADMISSION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `EVENT_ADMISSION__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EVENT_ADMISSION__DEPLOYMENT__ROLE=request_service` -> `deployment.role`
    /// - `EVENT_ADMISSION__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EVENT_ADMISSION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.deployment.validate()?;
        match (&self.deployment.storage, &self.database) {
            (StorageBackend::Postgres, None) => {
                Err(ValidationError::MissingRequired("database.url"))
            }
            (StorageBackend::Postgres, Some(database)) => database.validate(),
            (StorageBackend::Memory, _) => Ok(()),
        }
    }

    /// Database section, if storage is `postgres`.
    pub fn postgres(&self) -> Option<&DatabaseConfig> {
        match self.deployment.storage {
            StorageBackend::Postgres => self.database.as_ref(),
            StorageBackend::Memory => None,
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
