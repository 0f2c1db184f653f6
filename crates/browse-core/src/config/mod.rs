//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file via the
//! `config` crate, overlaid with `BROWSE__`-prefixed environment
//! variables.

pub mod browse;
pub mod logging;

use serde::{Deserialize, Serialize};
use tracing::debug;

use self::browse::BrowseConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Browse tree behaviour.
    #[serde(default)]
    pub browse: BrowseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; missing keys fall back to their defaults.
    /// Environment variables use the `BROWSE` prefix and `__` as the
    /// section separator, e.g. `BROWSE__LOGGING__LEVEL=debug`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: &str, env: config::Environment) -> Result<Self, AppError> {
        debug!(path, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an inline TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("BROWSE")
        .separator("__")
        .try_parsing(true)
}
