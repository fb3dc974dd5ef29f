use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::PanelError;

pub const CONFIG_FILE: &str = "guitar_panel.cfg";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error while reading or writing a config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not find the user config directory")]
    MissingConfigDirectory,

    #[error("Invalid panel data: {0}")]
    Invalid(#[from] PanelError),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Resource)]
pub struct AppConfig {
    pub window: WindowConfig,
    #[serde(default)]
    pub paths: PathConfig,
    pub saves: SaveConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WindowConfig {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PathConfig {
    /// Exercise YAML to show on startup; the built-in sample when unset.
    #[serde(default)]
    pub exercise_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SaveConfig {
    pub directory: String,
    pub theme_file: String,
    pub settings_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "Guitar Panel".to_string(),
            },
            paths: PathConfig::default(),
            saves: SaveConfig {
                directory: "guitar_panel".to_string(),
                theme_file: "theme.yaml".to_string(),
                settings_file: "settings.yaml".to_string(),
            },
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let mut config = load_config(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
            warn!("Failed to load '{CONFIG_FILE}' ({e}), using defaults");
            AppConfig::default()
        });

        match get_save_directory(&config.saves.directory) {
            Ok(save_path) => {
                if let Err(e) = fs::create_dir_all(&save_path) {
                    warn!("Failed to create save directory '{}': {e}", save_path.display());
                }
                config.saves.directory = save_path.to_string_lossy().into_owned();
            }
            Err(e) => warn!("{e}, saving next to the executable"),
        }

        app.insert_resource(config);
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

pub fn get_save_directory(save_dir: &str) -> Result<PathBuf, ConfigError> {
    let mut path = dirs::config_dir().ok_or(ConfigError::MissingConfigDirectory)?;
    path.push(save_dir);
    Ok(path)
}
