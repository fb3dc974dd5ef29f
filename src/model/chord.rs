use crate::error::PanelError;
use crate::model::note::{check_string, MAX_FRET, STRING_COUNT};

/// Number of frets a chord diagram shows at once.
pub const VISIBLE_FRETS: u8 = 5;

/// One string of a chord shape. `fret: None` marks the string as muted,
/// `Some(0)` as played open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameNote {
    pub string: u8,
    pub fret: Option<u8>,
}

impl FrameNote {
    pub fn new(string: u8, fret: Option<u8>) -> Result<Self, PanelError> {
        check_string(string)?;
        if let Some(fret) = fret.filter(|fret| *fret > MAX_FRET) {
            return Err(PanelError::FretOutOfRange(fret));
        }
        Ok(Self { string, fret })
    }

    pub fn open(string: u8) -> Result<Self, PanelError> {
        Self::new(string, Some(0))
    }

    pub fn fretted(string: u8, fret: u8) -> Result<Self, PanelError> {
        Self::new(string, Some(fret))
    }

    pub fn muted(string: u8) -> Result<Self, PanelError> {
        Self::new(string, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChordFrame {
    symbol: String,
    notes: Vec<FrameNote>,
}

impl ChordFrame {
    pub fn new(symbol: impl Into<String>, notes: Vec<FrameNote>) -> Result<Self, PanelError> {
        let mut seen = [false; STRING_COUNT as usize];
        for note in &notes {
            check_string(note.string)?;
            let slot = &mut seen[(note.string - 1) as usize];
            if *slot {
                return Err(PanelError::DuplicateString(note.string));
            }
            *slot = true;
        }
        check_span(&notes)?;
        Ok(Self {
            symbol: symbol.into(),
            notes,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn notes(&self) -> &[FrameNote] {
        &self.notes
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Fretted notes must fit in one diagram window, otherwise shifting would
/// push the lowest of them onto the nut.
fn check_span(notes: &[FrameNote]) -> Result<(), PanelError> {
    let fretted = notes.iter().filter_map(|note| note.fret).filter(|fret| *fret > 0);
    let (Some(lowest), Some(highest)) = (fretted.clone().min(), fretted.max()) else {
        return Ok(());
    };
    if highest - lowest >= VISIBLE_FRETS {
        return Err(PanelError::ChordTooWide {
            lowest,
            highest,
            window: VISIBLE_FRETS,
        });
    }
    Ok(())
}

/// What the diagram shows for one string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringMarker {
    /// No note, or a note without a fret: drawn as "x".
    Muted,
    /// Fret 0: drawn as "o".
    Open,
    /// Dot in the given visible column (1..=5).
    Fretted(u8),
}

/// Chord shape shifted into the visible fret window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedChord {
    pub notes: Vec<FrameNote>,
    /// First fret shown by the diagram when the shape had to be shifted.
    pub start_fret: Option<u8>,
}

impl NormalizedChord {
    pub fn marker(&self, string: u8) -> StringMarker {
        match self.notes.iter().find(|note| note.string == string) {
            None | Some(FrameNote { fret: None, .. }) => StringMarker::Muted,
            Some(FrameNote { fret: Some(0), .. }) => StringMarker::Open,
            Some(FrameNote { fret: Some(fret), .. }) => StringMarker::Fretted(*fret),
        }
    }

    pub fn start_fret_label(&self) -> Option<String> {
        self.start_fret.map(start_fret_label)
    }
}

pub fn start_fret_label(start_fret: u8) -> String {
    format!("start fret = {start_fret}")
}

/// Shift a shape whose highest fret lies beyond the visible window so that it
/// fits. Open and muted strings are left alone.
pub fn normalize(frame: &ChordFrame) -> NormalizedChord {
    let notes = frame.notes();
    let max_fret = notes.iter().filter_map(|note| note.fret).max().unwrap_or(0);
    if max_fret <= VISIBLE_FRETS {
        return NormalizedChord {
            notes: notes.to_vec(),
            start_fret: None,
        };
    }

    // every fretted note is above `overflow`, see `check_span`
    let overflow = max_fret - VISIBLE_FRETS;
    let notes = notes
        .iter()
        .map(|note| FrameNote {
            string: note.string,
            fret: note
                .fret
                .map(|fret| if fret == 0 { 0 } else { fret - overflow }),
        })
        .collect();

    NormalizedChord {
        notes,
        start_fret: Some(overflow + 1),
    }
}
