pub mod config;
pub mod exercise;
pub mod settings;
pub mod theme;

pub use config::{AppConfig, ConfigError};
pub use exercise::Exercise;
pub use settings::{PanelSettings, Settings};
pub use theme::{NoteColors, NotePalette, PanelTheme, Themes};
