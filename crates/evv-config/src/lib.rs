//! # evv-config
//!
//! Layered configuration loading for the EVV logger using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EVV_*` prefix, `__` as separator)
//! 2. Project-level `.evv/config.toml`
//! 3. User-level `~/.config/evv/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EVV_DATABASE__PATH` -> `database.path`,
//! `EVV_SERVER__REQUEST_TIMEOUT_MS` -> `server.request_timeout_ms`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use evv_config::EvvConfig;
//!
//! let config = EvvConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("remote database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod general;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound on any page size, mirrored from the list contract.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvvConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl EvvConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".evv/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("EVV_").split("__"))
    }

    /// Reject values that would only fail later, at request time.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` for an out-of-range page size or an empty
    /// local database path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.general.default_page_size;
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "general.default_page_size".into(),
                reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
            });
        }
        if !self.database.is_remote() && self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty when no remote database is configured".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("evv").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EvvConfig::default();
        assert!(!config.database.is_remote());
        assert_eq!(config.general.default_page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: EvvConfig = EvvConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.server.request_timeout_ms, 10_000);
    }

    #[test]
    fn oversized_page_size_is_rejected() {
        let mut config = EvvConfig::default();
        config.general.default_page_size = 101;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn empty_local_path_is_rejected() {
        let mut config = EvvConfig::default();
        config.database.path = String::new();
        assert!(config.validate().is_err());

        config.database.url = "libsql://evv.turso.io".into();
        config.database.auth_token = "t".into();
        assert!(config.validate().is_ok());
    }
}
