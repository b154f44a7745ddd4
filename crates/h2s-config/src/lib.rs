//! # h2s-config
//!
//! Layered configuration loading for html2svelte using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`H2S_*` prefix, `__` as separator)
//! 2. Project-level `.h2s/config.toml`
//! 3. User-level `<config dir>/h2s/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `H2S_EXTRACT__PREFIX` -> `extract.prefix`,
//! `H2S_OUTPUT__INDENT_WIDTH` -> `output.indent_width`, and so on.
//!
//! ```no_run
//! use h2s_config::H2sConfig;
//!
//! let config = H2sConfig::load_with_dotenv().expect("config");
//! println!("extracting `{}*` into {}", config.extract.prefix, config.output.out_dir);
//! ```

mod error;
mod extract;
mod output;

pub use error::ConfigError;
pub use extract::{DuplicatePolicy, ExtractConfig};
pub use output::OutputConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".h2s/config.toml";

/// Prefix of environment variables read into the config.
pub const ENV_PREFIX: &str = "H2S_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct H2sConfig {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl H2sConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and callers can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values that deserialize fine but cannot drive a conversion.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extract.validate()?;
        self.output.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("h2s").join("config.toml"))
    }
}
