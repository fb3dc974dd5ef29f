//! Guitar practice widgets: a chord diagram, a scrolling tablature and a
//! string ruler, plus the bevy screen that hosts them.
//!
//! The views in [`components`] never touch bevy's renderer. They compute
//! their geometry through [`layout`] and issue draw calls against a
//! [`surface::DrawingSurface`]; the practice scene records those calls and
//! turns them into UI nodes.

pub mod components;
#[cfg(not(feature = "production"))]
pub mod debug;
pub mod error;
pub mod file;
pub mod layout;
pub mod model;
pub mod scenes;
pub mod scroll;
pub mod states;
pub mod surface;

pub use components::{ChordDiagramView, FretBoardView, GuitarStringsView, PanelView};
pub use error::PanelError;
pub use layout::{MeasureSpec, RulerVariant, ScaleContext};
pub use model::{ChordFrame, FrameNote, Note, NoteGroup, NoteState, Tablature};
pub use scroll::{Easing, ScrollController, ScrollState};
pub use surface::{DisplayList, DrawCommand, DrawingSurface};
