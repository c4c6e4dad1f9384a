//! Configuration for the restaurant service.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use qeats_search::SearchConfig;

use crate::error::{QeatsError, Result};

/// Top-level service configuration, stored as TOML.
///
/// ```toml
/// [search]
/// concurrent_sources = ["name", "attribute"]
/// timeout_seconds = 8
/// peak_radius_km = 3.0
/// off_peak_radius_km = 5.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QeatsConfig {
    /// Search aggregation settings.
    pub search: SearchConfig,
}

impl QeatsConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, cannot be parsed, or
    /// holds invalid search settings.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| QeatsError::Config(e.to_string()))?;
        config.search.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| QeatsError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `$XDG_CONFIG_HOME/qeats/config.toml`,
    /// else `~/.config/qeats/config.toml`.
    pub fn default_config_path() -> PathBuf {
        config_path_in(
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            dirs::home_dir(),
        )
    }
}

fn config_path_in(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(config) = xdg_config_home {
        config.join("qeats").join("config.toml")
    } else if let Some(home) = home {
        home.join(".config").join("qeats").join("config.toml")
    } else {
        PathBuf::from("/tmp/qeats-config/config.toml")
    }
}
