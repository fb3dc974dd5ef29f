use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PanelError;
use crate::file::config::{AppConfig, ConfigError};
use crate::file::theme::DEFAULT_THEME;
use crate::layout::{RulerVariant, DEFAULT_TIME_SCALE};
use crate::scroll::DEFAULT_SCROLL_DURATION;
use crate::states::StartupLatch;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub start_theme: String,
    pub window: WindowSettings,
    #[serde(default)]
    pub panel: PanelSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    pub font_scale: f32,
    /// Overrides the ruler's gap between strings.
    pub string_spacing_dp: Option<f32>,
    /// Timeline milliseconds per pixel.
    pub time_scale_ratio: f32,
    pub default_scroll_ms: u64,
    pub ruler_variant: RulerVariant,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            string_spacing_dp: None,
            time_scale_ratio: DEFAULT_TIME_SCALE,
            default_scroll_ms: DEFAULT_SCROLL_DURATION.as_millis() as u64,
            ruler_variant: RulerVariant::default(),
        }
    }
}

impl PanelSettings {
    pub fn validate(&self) -> Result<(), PanelError> {
        if self.time_scale_ratio > 0.0 && self.time_scale_ratio.is_finite() {
            Ok(())
        } else {
            Err(PanelError::InvalidTimeScale(self.time_scale_ratio))
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_theme: DEFAULT_THEME.to_string(),
            window: WindowSettings {
                width: 1024.0,
                height: 640.0,
            },
            panel: PanelSettings::default(),
        }
    }
}

pub fn load_or_create_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        warn!("Settings file not found at '{}', creating default...", path.display());
        let default = Settings::default();
        fs::write(path, serde_yaml::to_string(&default)?)?;
        return Ok(default);
    }

    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_yaml::from_str(&content)?;
    settings.panel.validate()?;
    Ok(settings)
}

fn change_window(mut windows: Query<&mut Window>, settings: &Settings) {
    if let Ok(mut window) = windows.single_mut() {
        window
            .resolution
            .set(settings.window.width, settings.window.height);
    } else {
        warn!("Primary window not available to apply settings");
    }
}

pub fn setup_settings(
    mut commands: Commands,
    windows: Query<&mut Window>,
    config: Res<AppConfig>,
    mut latch: ResMut<StartupLatch>,
) {
    let path = PathBuf::from(&config.saves.directory).join(&config.saves.settings_file);

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Failed to create save directory '{}': {e}", parent.display());
            }
        }
    }

    let settings = load_or_create_settings(&path).unwrap_or_else(|e| {
        warn!("Failed to load settings from '{}': {e}", path.display());
        Settings::default()
    });
    change_window(windows, &settings);
    commands.insert_resource(settings);
    latch.settings_loaded = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_panel_section_uses_defaults() {
        let yaml = "start_theme: default\nwindow:\n  width: 800.0\n  height: 600.0\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.panel, PanelSettings::default());
        assert_eq!(settings.panel.default_scroll_ms, 250);
    }

    #[test]
    fn partial_panel_section_keeps_other_defaults() {
        let yaml = "start_theme: practice\nwindow:\n  width: 800.0\n  height: 600.0\npanel:\n  string_spacing_dp: 24.0\n  ruler_variant:\n    symmetric_margins: true\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.panel.string_spacing_dp, Some(24.0));
        assert!(settings.panel.ruler_variant.symmetric_margins);
        assert!(!settings.panel.ruler_variant.half_glyph_top_inset);
        assert_eq!(settings.panel.time_scale_ratio, DEFAULT_TIME_SCALE);
    }

    #[test]
    fn non_positive_time_scale_is_rejected() {
        let panel = PanelSettings {
            time_scale_ratio: 0.0,
            ..PanelSettings::default()
        };
        assert_eq!(panel.validate(), Err(PanelError::InvalidTimeScale(0.0)));
    }

    #[test]
    fn settings_file_is_created_then_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        let created = load_or_create_settings(&path).unwrap();
        assert!(path.exists());
        assert_eq!(load_or_create_settings(&path).unwrap(), created);
    }
}
