//! Server configuration: optional TOML file plus environment overrides.

use crate::models::{FixtureError, MatchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("Invalid match defaults: {0}")]
    MatchDefaults(#[from] FixtureError),
}

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FIXTURES_CONFIG";

/// Config file looked up in the working directory when `FIXTURES_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "fixtures.toml";

/// Web server settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Built single-page app to serve at `/`, if any.
    pub static_dir: Option<PathBuf>,
    /// Match configuration for newly generated fixtures.
    pub match_defaults: MatchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: None,
            match_defaults: MatchConfig::default(),
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    /// Load from `FIXTURES_CONFIG`, else `fixtures.toml` when present, else defaults;
    /// then apply `HOST`, `PORT` and `STATIC_DIR` from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env_value(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        config.match_defaults.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.match_defaults.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = env_value("HOST") {
            self.host = host;
        }
        if let Some(port) = env_value("PORT") {
            self.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "PORT", value: port })?;
        }
        if let Some(dir) = env_value("STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}
