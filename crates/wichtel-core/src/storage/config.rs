//! TOML-based application configuration.
//!
//! Stores the draw-policy thresholds and the defaults applied to newly
//! created groups. Stored at `~/.config/wichtel/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::draw::DrawPolicy;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Defaults applied to newly created groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDefaults {
    #[serde(default = "default_budget")]
    pub budget: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_budget() -> String {
    "100".to_string()
}
fn default_currency() -> String {
    "PLN".to_string()
}

impl Default for GroupDefaults {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            currency: default_currency(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/wichtel/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub draw: DrawPolicy,
    #[serde(default)]
    pub group_defaults: GroupDefaults,
}

impl Config {
    /// Load from `config.toml` under `dir`; missing file yields defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Write to `config.toml` under `dir`.
    pub fn save(&self, dir: &Path) -> Result<(), ConfigError> {
        let path = dir.join("config.toml");
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.draw.auto_threshold_days, 14.0);
        assert_eq!(config.draw.force_threshold_days, 21.0);
        assert_eq!(config.group_defaults.currency, "PLN");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.draw.auto_threshold_days = 7.0;
        config.group_defaults.budget = "200".into();
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.draw.auto_threshold_days, 7.0);
        assert_eq!(loaded.group_defaults.budget, "200");
    }

    #[test]
    fn partial_config_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[draw]\nauto_threshold_days = 10.0\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.draw.auto_threshold_days, 10.0);
        assert_eq!(config.draw.force_threshold_days, 21.0);
    }
}
