//! The three panel views. Each owns its data and style, recomputes layout on
//! every render and draws through a [`DrawingSurface`].

pub mod chord_diagram;
pub mod fretboard;
pub mod guitar_strings;

pub use chord_diagram::{ChordDiagramView, MUTE_MARKER, OPEN_MARKER};
pub use fretboard::FretBoardView;
pub use guitar_strings::GuitarStringsView;

use bevy::math::Vec2;

use crate::layout::MeasureSpec;
use crate::surface::DrawingSurface;

pub trait PanelView {
    fn on_size_changed(&mut self, width: f32, height: f32);

    fn size(&self) -> Vec2;

    /// Size the view wants under the host's constraints.
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2;

    fn render(&self, surface: &mut dyn DrawingSurface);

    fn is_invalidated(&self) -> bool;

    /// Clear the redraw request and report whether there was one.
    fn take_invalidation(&mut self) -> bool;
}

/// Redraw request shared by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Invalidation(bool);

impl Default for Invalidation {
    fn default() -> Self {
        Invalidation(true)
    }
}

impl Invalidation {
    pub(crate) fn invalidate(&mut self) {
        self.0 = true;
    }

    pub(crate) fn is_set(&self) -> bool {
        self.0
    }

    pub(crate) fn take(&mut self) -> bool {
        std::mem::replace(&mut self.0, false)
    }
}
