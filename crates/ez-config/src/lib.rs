//! # ez-config
//!
//! Layered configuration loading for Ezriya using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EZRIYA_*` prefix, `__` as separator)
//! 2. Project-level `.ezriya/config.toml`
//! 3. User-level `~/.config/ezriya/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EZRIYA_SERVER__BIND` -> `server.bind`,
//! `EZRIYA_AUTH__SERVICE_KEYS='["k1","k2"]'` -> `auth.service_keys`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ez_config::EzConfig;
//!
//! let config = EzConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.database.is_configured() {
//!     println!("remote database: {}", config.database.url);
//! }
//! ```

mod auth;
mod database;
mod error;
mod general;
mod maintenance;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use maintenance::MaintenanceConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EzConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
}

impl EzConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".ezriya/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("EZRIYA_").split("__"))
    }

    /// Check values figment cannot check by type alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.socket_addr()?;

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.max_body_bytes".into(),
                reason: "must be greater than zero".into(),
            });
        }

        if self.maintenance.stale_listing_days == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maintenance.stale_listing_days".into(),
                reason: "must be at least one day".into(),
            });
        }

        if self.database.path.is_empty() && !self.database.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }

        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ezriya").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Missing files are fine.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
