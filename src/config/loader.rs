#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use super::GameConfig;

// Fallback config file path when no user config directory exists
const CONFIG_FILE_PATH: &str = "config/blockfall.toml";

// Environment variable overriding the config file location
const CONFIG_PATH_ENV: &str = "BLOCKFALL_CONFIG";

/// Loads the configuration from the file system, writing a default file on
/// first run. The result is validated; a file that parses but describes an
/// unplayable board is rejected here rather than at session construction.
pub fn load_config_from_file() -> Result<GameConfig> {
    let config_path = get_config_file_path();

    if !config_path.exists() {
        let default_config = GameConfig::default();
        save_config_to_file(&default_config)?;
        info!("wrote default config to {}", config_path.display());
        return Ok(default_config);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config at {}", config_path.display()))?;

    let config: GameConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config at {}", config_path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config at {}", config_path.display()))?;

    Ok(config)
}

/// Saves the configuration, creating parent directories as needed.
pub fn save_config_to_file(config: &GameConfig) -> Result<()> {
    let config_path = get_config_file_path();

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let toml_string = toml::to_string_pretty(config).context("failed to serialize config")?;

    fs::write(&config_path, toml_string)
        .with_context(|| format!("failed to write config to {}", config_path.display()))?;

    Ok(())
}

// Get the path to the config file
fn get_config_file_path() -> PathBuf {
    // Check for environment variable override
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    // Otherwise use default path in user's config directory
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("blockfall").join("config.toml")
    } else {
        // Fallback to local directory
        PathBuf::from(CONFIG_FILE_PATH)
    }
}
