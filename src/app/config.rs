//! Configuration for tokenizing and measuring

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::measure::{Measurer, DEFAULT_TAB_SIZE};

/// Measurement configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab stop interval in cells (at least 1)
    pub tab_size: usize,
    /// Attach combining marks to the preceding unit
    pub clusters: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
            clusters: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::result::Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/termtext/config.json
        if let Some(config_path) = default_path() {
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        debug!(path = %config_path.display(), error = %e, "ignoring config file")
                    }
                }
            }
        }
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.tab_size == 0 {
            return Err(Error::InvalidConfiguration(
                "tab_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Measurer for the configured tab size
    pub fn measurer(&self) -> Result<Measurer> {
        self.validate()?;
        Measurer::new(self.tab_size)
    }
}

/// Path of the default configuration file
pub fn default_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("termtext")
            .join("config.json")
    })
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.tab_size, 8);
        assert!(config.clusters);
        assert!(config.validate().is_ok());
        assert_eq!(config.measurer().unwrap().tab_size(), 8);
    }

    #[test]
    fn test_config_validate() {
        let config = Config {
            tab_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            config.measurer(),
            Err(Error::InvalidConfiguration(msg)) if msg.contains("tab_size")
        ));
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            tab_size: 4,
            clusters: false,
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"tab_size": 2}"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.tab_size, 2);
        assert!(config.clusters);
    }

    #[test]
    fn test_config_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{tab_size").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Json(_))));
    }
}
