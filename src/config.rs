//! Configuration loading.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `./genome-tui.toml`
//! 3. An explicit `--config` file
//! 4. `GENOME_TUI_*` environment variables
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Language;
use crate::request::DEFAULT_FLANK;

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "genome-tui.toml";

/// Prefix of the environment variables read as configuration.
pub const ENV_PREFIX: &str = "GENOME_TUI_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Configuration file not found: {0}")]
    MissingFile(PathBuf),

    #[error("flank cannot be 0")]
    ZeroFlank,

    #[error("timeout_secs cannot be 0")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the prediction service. Without it analyses are disabled.
    pub endpoint: Option<String>,
    /// API key prefilled in the form
    pub api_key: Option<String>,
    /// Interface language at startup
    pub language: Language,
    /// Bases of context on each side of a variant
    pub flank: u64,
    /// Client-side timeout for service calls, none by default
    pub timeout_secs: Option<u64>,
    /// Use emoji glyphs instead of ASCII
    pub fancy: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            language: Language::default(),
            flank: DEFAULT_FLANK,
            timeout_secs: None,
            fancy: false,
        }
    }
}

impl Settings {
    /// Loads settings from all sources.
    pub fn load(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()));
            }
        }
        let settings: Settings = Self::figment(config_path).extract().map_err(Box::new)?;
        settings.validate()?;
        Ok(settings)
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        let project = PathBuf::from(PROJECT_CONFIG_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.flank == 0 {
            return Err(ConfigError::ZeroFlank);
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Endpoint, if one is configured and not blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
