//! Error types for the panel library.
//!
//! `PanelError` covers contract violations by the host (bad indices, malformed
//! chord frames). Nothing in the layout or rendering path is fallible at runtime,
//! so every variant here points at a caller bug. File loading has its own
//! `ConfigError` in `file::config`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PanelError {
    #[error("note group index {index} is out of range for a tablature of {len} groups")]
    GroupIndexOutOfRange { index: usize, len: usize },

    #[error("string {0} is outside the playable range 1..=6")]
    StringOutOfRange(u8),

    #[error("fret {0} is beyond the last fret (24)")]
    FretOutOfRange(u8),

    #[error("string {0} appears more than once in the chord frame")]
    DuplicateString(u8),

    #[error("fretted notes span frets {lowest}..={highest}, wider than the {window}-fret window")]
    ChordTooWide { lowest: u8, highest: u8, window: u8 },

    #[error("note duration must be greater than zero")]
    ZeroDuration,

    #[error("time scale ratio must be positive, got {0}")]
    InvalidTimeScale(f32),
}
