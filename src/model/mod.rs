pub mod chord;
pub mod note;

pub use chord::{normalize, ChordFrame, FrameNote, NormalizedChord, StringMarker, VISIBLE_FRETS};
pub use note::{Note, NoteGroup, NoteState, Tablature, MAX_FRET, STRING_COUNT};
