//! # sd-config
//!
//! Layered configuration loading for sprintdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SPRINTDESK_*` prefix, `__` as separator)
//! 2. Project-level `.sprintdesk/config.toml`
//! 3. User-level `~/.config/sprintdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SPRINTDESK_API__BASE_URL` -> `api.base_url`,
//! `SPRINTDESK_SYNC__REPORT_POLL_INTERVAL_MS` -> `sync.report_poll_interval_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sd_config::SdConfig;
//!
//! let config = SdConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod auth;
mod error;
mod sync;

pub use api::ApiConfig;
pub use auth::AuthConfig;
pub use error::ConfigError;
pub use sync::SyncConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SdConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl SdConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".sprintdesk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SPRINTDESK_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sprintdesk").join("config.toml"))
    }

    /// Load `.env` from the current directory, or from the workspace root when
    /// running under cargo. Silently does nothing if none is found.
    fn load_dotenv() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = SdConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(config.sync.report_poll_interval_ms, 3000);
        assert_eq!(config.auth.keyring_service, "sprintdesk");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: SdConfig = SdConfig::figment().extract()?;
            assert_eq!(config.sync.default_page_size, 20);
            Ok(())
        });
    }
}
