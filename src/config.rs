// Configuration module for rowfill
// Handles loading and parsing configuration from ~/.config/rowfill/config.toml

mod types;

pub use types::{AutofillConfig, Config, OpenAiConfig, ProviderKind};

use std::fs;
use std::path::{Path, PathBuf};

/// Result of loading configuration
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration from ~/.config/rowfill/config.toml
/// Returns default configuration if the file doesn't exist or on parse errors
pub fn load_config() -> ConfigResult {
    load_config_from(&config_path())
}

/// Loads configuration from an explicit path. Missing or malformed
/// files degrade to defaults, with a warning for the caller to show.
pub fn load_config_from(path: &Path) -> ConfigResult {
    if !path.exists() {
        log::debug!("config file {:?} does not exist, using defaults", path);
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("failed to read config file {:?}: {}", path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(e) => {
            log::warn!("failed to parse config file {:?}: {}", path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/rowfill/config.toml on all platforms for consistency.
fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("rowfill")
        .join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
