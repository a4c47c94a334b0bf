//! # steward-config
//!
//! Layered configuration loading for Site Steward using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STEWARD_*` prefix, `__` as separator)
//! 2. Project-level `.steward/config.toml`
//! 3. User-level `~/.config/steward/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STEWARD_DATABASE__PATH` -> `database.path`,
//! `STEWARD_CUSTODY__EXPORT_DIR` -> `custody.export_dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use steward_config::StewardConfig;
//!
//! let config = StewardConfig::load_with_dotenv().expect("config");
//! println!("store: {}", config.database.path);
//! ```

mod custody;
mod database;
mod error;
mod general;

pub use custody::CustodyConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local configuration file, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".steward/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StewardConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub custody: CustodyConfig,
}

impl StewardConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is the common case.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can layer extra providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("STEWARD_").split("__"))
    }

    /// Reject values no component can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.custody.export_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "custody.export_dir".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("steward").join("config.toml"))
    }
}
