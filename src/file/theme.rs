use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::file::config::{AppConfig, ConfigError};
use crate::model::NoteState;
use crate::states::StartupLatch;

pub const DEFAULT_THEME: &str = "default";

/// Fill, outline and label color of one tablature note.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NoteColors {
    #[serde(with = "srgb_float")]
    pub fill: Color,
    #[serde(with = "srgb_float")]
    pub border: Color,
    #[serde(with = "srgb_float")]
    pub text: Color,
}

/// Note colors per practice state. Whether correct and wrong notes look
/// different is purely a theme decision.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NotePalette {
    pub none: NoteColors,
    pub correct: NoteColors,
    pub wrong: NoteColors,
}

impl NotePalette {
    pub fn uniform(colors: NoteColors) -> Self {
        Self {
            none: colors,
            correct: colors,
            wrong: colors,
        }
    }

    pub fn for_state(&self, state: NoteState) -> &NoteColors {
        match state {
            NoteState::None => &self.none,
            NoteState::Correct => &self.correct,
            NoteState::Wrong => &self.wrong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PanelTheme {
    #[serde(with = "srgb_float")]
    pub chord_symbol: Color,
    #[serde(with = "srgb_float")]
    pub chord_marker: Color,
    #[serde(with = "srgb_float")]
    pub chord_grid: Color,
    #[serde(with = "srgb_float")]
    pub chord_dot: Color,
    #[serde(with = "srgb_float")]
    pub chord_background: Color,
    #[serde(with = "srgb_float")]
    pub chord_background_border: Color,
    pub notes: NotePalette,
    #[serde(with = "srgb_float")]
    pub ruler_background: Color,
    #[serde(with = "srgb_float")]
    pub ruler_string: Color,
    #[serde(with = "srgb_float")]
    pub ruler_letter: Color,
    #[serde(with = "srgb_float")]
    pub ruler_dot: Color,
}

const DARK_GREEN: Color = Color::srgb(0.1804, 0.4902, 0.1961); // #2e7d32
const LIGHT_GREEN: Color = Color::srgb(0.6471, 0.8392, 0.6549); // #a5d6a7
const DARK_YELLOW: Color = Color::srgb(0.7882, 0.6353, 0.1529); // #c9a227
const PAPER: Color = Color::srgb(0.9804, 0.9686, 0.9294); // #faf7ed
const WHITE: Color = Color::srgb(1.0, 1.0, 1.0);

impl Default for PanelTheme {
    fn default() -> Self {
        Self {
            chord_symbol: DARK_YELLOW,
            chord_marker: DARK_YELLOW,
            chord_grid: DARK_YELLOW,
            chord_dot: DARK_GREEN,
            chord_background: PAPER,
            chord_background_border: DARK_YELLOW,
            notes: NotePalette::uniform(NoteColors {
                fill: LIGHT_GREEN,
                border: DARK_GREEN,
                text: DARK_GREEN,
            }),
            ruler_background: DARK_YELLOW,
            ruler_string: WHITE,
            ruler_letter: WHITE,
            ruler_dot: WHITE,
        }
    }
}

impl PanelTheme {
    /// Default look with distinct colors for correct and wrong notes.
    pub fn practice() -> Self {
        Self {
            notes: NotePalette {
                correct: NoteColors {
                    fill: Color::srgb(0.7843, 0.9020, 0.7882), // #c8e6c9
                    border: Color::srgb(0.1059, 0.3686, 0.1255), // #1b5e20
                    text: Color::srgb(0.1059, 0.3686, 0.1255),
                },
                wrong: NoteColors {
                    fill: Color::srgb(1.0, 0.8039, 0.8235), // #ffcdd2
                    border: Color::srgb(0.7176, 0.1098, 0.1098), // #b71c1c
                    text: Color::srgb(0.7176, 0.1098, 0.1098),
                },
                ..PanelTheme::default().notes
            },
            ..PanelTheme::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Resource)]
pub struct Themes {
    pub themes: HashMap<String, PanelTheme>,
}

impl Themes {
    pub fn get(&self, name: &str) -> Option<&PanelTheme> {
        self.themes.get(name)
    }

    /// The named theme, or the built-in default when it is not defined.
    pub fn resolve(&self, name: &str) -> PanelTheme {
        match self.get(name) {
            Some(theme) => theme.clone(),
            None => {
                warn!("Theme '{name}' not found, using the built-in default");
                PanelTheme::default()
            }
        }
    }
}

pub fn create_default_themes() -> Themes {
    let mut themes = HashMap::new();
    themes.insert(DEFAULT_THEME.to_string(), PanelTheme::default());
    themes.insert("practice".to_string(), PanelTheme::practice());
    Themes { themes }
}

pub fn load_or_create_themes(path: &Path) -> Result<Themes, ConfigError> {
    if !path.exists() {
        warn!("Theme file not found at '{}', creating default theme file...", path.display());
        let default_themes = create_default_themes();
        fs::write(path, serde_yaml::to_string(&default_themes)?)?;
        return Ok(default_themes);
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

pub fn setup_theme(mut commands: Commands, config: Res<AppConfig>, mut latch: ResMut<StartupLatch>) {
    let theme_path = PathBuf::from(&config.saves.directory).join(&config.saves.theme_file);

    let themes = load_or_create_themes(&theme_path).unwrap_or_else(|e| {
        warn!("Failed to load themes from '{}': {e}", theme_path.display());
        create_default_themes()
    });

    commands.insert_resource(themes);
    latch.theme_loaded = true;
}

mod srgb_float {
    use bevy::prelude::Color;
    use serde::de::Deserializer;
    use serde::ser::{SerializeSeq, Serializer};
    use serde::Deserialize;

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let srgba = color.to_srgba();
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&srgba.red)?;
        seq.serialize_element(&srgba.green)?;
        seq.serialize_element(&srgba.blue)?;
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgb: [f32; 3] = <[f32; 3]>::deserialize(deserializer)?;
        Ok(Color::srgb(rgb[0], rgb[1], rgb[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_uniform() {
        let palette = PanelTheme::default().notes;
        assert_eq!(palette.for_state(NoteState::None), palette.for_state(NoteState::Correct));
        assert_eq!(palette.for_state(NoteState::None), palette.for_state(NoteState::Wrong));
    }

    #[test]
    fn practice_palette_separates_results() {
        let palette = PanelTheme::practice().notes;
        assert_ne!(palette.correct.fill, palette.wrong.fill);
        assert_eq!(palette.none, PanelTheme::default().notes.none);
    }

    #[test]
    fn themes_survive_a_yaml_round_trip() {
        let themes = create_default_themes();
        let yaml = serde_yaml::to_string(&themes).unwrap();
        let parsed: Themes = serde_yaml::from_str(&yaml).unwrap();

        let original = themes.get("practice").unwrap().notes.wrong.fill.to_srgba();
        let restored = parsed.get("practice").unwrap().notes.wrong.fill.to_srgba();
        assert!((original.red - restored.red).abs() < 1e-6);
        assert!((original.green - restored.green).abs() < 1e-6);
    }

    #[test]
    fn missing_theme_falls_back_to_default() {
        let themes = create_default_themes();
        assert_eq!(themes.resolve("neon"), PanelTheme::default());
    }

    #[test]
    fn missing_theme_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.yaml");
        let themes = load_or_create_themes(&path).unwrap();
        assert!(path.exists());
        assert!(themes.get(DEFAULT_THEME).is_some());

        let reloaded = load_or_create_themes(&path).unwrap();
        assert_eq!(reloaded.themes.len(), themes.themes.len());
    }
}
