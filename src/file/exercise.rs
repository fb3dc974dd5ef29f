use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::PanelError;
use crate::file::config::ConfigError;
use crate::model::{ChordFrame, FrameNote, Note, NoteGroup};

/// A practice exercise as stored on disk: one chord diagram and the note
/// groups of the scrolling tablature.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Exercise {
    pub chord: ChordSpec,
    #[serde(default)]
    pub groups: Vec<Vec<NoteSpec>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChordSpec {
    pub symbol: String,
    pub notes: Vec<FrameNoteSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FrameNoteSpec {
    pub string: u8,
    /// Missing means the string is muted.
    #[serde(default)]
    pub fret: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct NoteSpec {
    pub string: u8,
    pub fret: u8,
    /// Milliseconds.
    pub duration: u32,
}

impl Exercise {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let exercise: Exercise = serde_yaml::from_str(content)?;
        exercise.chord_frame()?;
        exercise.note_groups()?;
        Ok(exercise)
    }

    pub fn chord_frame(&self) -> Result<ChordFrame, PanelError> {
        let notes = self
            .chord
            .notes
            .iter()
            .map(|spec| FrameNote::new(spec.string, spec.fret))
            .collect::<Result<Vec<_>, _>>()?;
        ChordFrame::new(self.chord.symbol.clone(), notes)
    }

    pub fn note_groups(&self) -> Result<Vec<NoteGroup>, PanelError> {
        self.groups
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|spec| Note::new(spec.string, spec.fret, spec.duration))
                    .collect::<Result<Vec<_>, _>>()
                    .map(NoteGroup::new)
            })
            .collect()
    }

    /// Open D chord over forty alternating two-note groups: 500 ms groups on
    /// the high strings, 300 ms groups on the low strings.
    pub fn sample() -> Self {
        let chord = ChordSpec {
            symbol: "D".to_string(),
            notes: vec![
                FrameNoteSpec { string: 4, fret: Some(0) },
                FrameNoteSpec { string: 3, fret: Some(2) },
                FrameNoteSpec { string: 2, fret: Some(3) },
                FrameNoteSpec { string: 1, fret: Some(2) },
            ],
        };

        let mut groups = Vec::with_capacity(40);
        for i in 0..20u8 {
            groups.push(vec![
                NoteSpec { string: 1 + i % 3, fret: 1 + (i * 7) % 20, duration: 500 },
                NoteSpec { string: 1 + (i + 1) % 3, fret: 1 + (i * 11) % 20, duration: 500 },
            ]);
            groups.push(vec![
                NoteSpec { string: 4 + i % 3, fret: 1 + (i * 13) % 20, duration: 300 },
                NoteSpec { string: 4 + (i + 2) % 3, fret: 1 + (i * 3) % 20, duration: 300 },
            ]);
        }

        Self { chord, groups }
    }
}
