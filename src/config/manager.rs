//! Configuration manager for loading and saving carousel configuration
//!
//! This module provides functionality to load and save configuration to
//! `$MAPLECAROUSEL_HOME/maplecarousel/config.json` with atomic writes to prevent corruption.

use crate::config::models::AppConfig;
use crate::error::{CarouselError, Result, StringError};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable naming the base directory for config and logs
pub const HOME_ENV_VAR: &str = "MAPLECAROUSEL_HOME";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Base directory for config and logs
    ///
    /// Returns: `$MAPLECAROUSEL_HOME/maplecarousel`, or `./maplecarousel` when unset
    pub fn get_data_dir() -> PathBuf {
        let home = std::env::var(HOME_ENV_VAR).unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join("maplecarousel")
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::get_data_dir().join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_path = Self::get_config_path();
        let config_dir = config_path
            .parent()
            .ok_or_else(|| CarouselError::ConfigError(StringError::new("Invalid config path")))?;

        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns default configuration.
    /// Carousels that fail validation are dropped with a warning.
    pub fn load() -> Result<AppConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str::<AppConfig>(&json) {
            Ok(mut config) => {
                config.carousels.retain(|carousel| match carousel.validate() {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Ignoring carousel '{}': {}", carousel.name, e);
                        false
                    }
                });
                info!(
                    "Configuration loaded successfully ({} carousel(s))",
                    config.carousels.len()
                );
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    ///
    /// Writes to a temporary file in the same directory and persists it over the target.
    pub fn save(config: &AppConfig) -> Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = Self::get_config_path();

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(&config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&config_path)
            .map_err(|e| CarouselError::ConfigError(Box::new(e)))?;

        info!("Configuration saved successfully");
        Ok(())
    }
}
