use bevy::log::debug;
use bevy::math::Vec2;

use crate::components::{Invalidation, PanelView};
use crate::error::PanelError;
use crate::file::theme::PanelTheme;
use crate::layout::text::centered_origin;
use crate::layout::{default_size, ChordLayout, ChordMetrics, MeasureSpec, ScaleContext};
use crate::model::{
    normalize, ChordFrame, FrameNote, NormalizedChord, StringMarker, STRING_COUNT, VISIBLE_FRETS,
};
use crate::surface::{DrawingSurface, Paint, TextPaint};

pub const MUTE_MARKER: &str = "x";
pub const OPEN_MARKER: &str = "o";

#[derive(Debug, Clone, PartialEq)]
pub struct ChordDiagramStyle {
    pub symbol: TextPaint,
    pub marker: TextPaint,
    pub grid: Paint,
    pub capo: Paint,
    pub dot: Paint,
    pub background: Paint,
    pub background_border: Paint,
}

impl ChordDiagramStyle {
    pub fn new(theme: &PanelTheme, metrics: &ChordMetrics) -> Self {
        Self {
            symbol: TextPaint::new(theme.chord_symbol, metrics.symbol_text_size),
            marker: TextPaint::new(theme.chord_marker, metrics.marker_text_size),
            grid: Paint::stroke(theme.chord_grid, metrics.border_width),
            capo: Paint::fill(theme.chord_grid),
            dot: Paint::fill(theme.chord_dot),
            background: Paint::fill(theme.chord_background),
            background_border: Paint::stroke(theme.chord_background_border, metrics.border_width),
        }
    }
}

/// Chord box: symbol on top, "x"/"o" markers on the left, capo bar, a five
/// fret window and finger dots. Shapes above the fifth fret are shifted into
/// the window on every pass and labelled with their starting fret.
#[derive(Debug, Clone)]
pub struct ChordDiagramView {
    frame: ChordFrame,
    metrics: ChordMetrics,
    style: ChordDiagramStyle,
    size: Vec2,
    invalidation: Invalidation,
}

impl ChordDiagramView {
    pub fn new(theme: &PanelTheme, scale: &ScaleContext) -> Self {
        let metrics = ChordMetrics::new(scale);
        Self {
            frame: ChordFrame::default(),
            style: ChordDiagramStyle::new(theme, &metrics),
            metrics,
            size: Vec2::ZERO,
            invalidation: Invalidation::default(),
        }
    }

    pub fn frame(&self) -> &ChordFrame {
        &self.frame
    }

    /// Replace the shown chord. Without a symbol the current one is kept.
    pub fn set_data(&mut self, symbol: Option<&str>, notes: Vec<FrameNote>) -> Result<(), PanelError> {
        let symbol = symbol.unwrap_or(self.frame.symbol()).to_string();
        self.set_frame(ChordFrame::new(symbol, notes)?);
        Ok(())
    }

    pub fn set_frame(&mut self, frame: ChordFrame) {
        self.frame = frame;
        self.invalidation.invalidate();
    }

    /// Clear all notes; an empty chord draws nothing.
    pub fn reset(&mut self) {
        self.frame = ChordFrame::default();
        self.invalidation.invalidate();
    }

    pub fn layout(&self, surface: &dyn DrawingSurface) -> ChordLayout {
        let marker_width = surface.text_bounds(MUTE_MARKER, &self.style.marker).width();
        ChordLayout::compute(self.size.x, self.size.y, self.metrics, marker_width)
    }

    fn draw_symbol(&self, surface: &mut dyn DrawingSurface, layout: &ChordLayout) {
        let symbol = self.frame.symbol();
        if symbol.is_empty() {
            return;
        }
        let bounds = surface.text_bounds(symbol, &self.style.symbol);
        surface.draw_text(symbol, layout.symbol_origin(&bounds), &self.style.symbol);
    }

    fn draw_background(&self, surface: &mut dyn DrawingSurface, layout: &ChordLayout) {
        let rect = layout.background_rect();
        let radius = self.metrics.background_radius;
        surface.fill_background(rect, radius, &self.style.background);
        surface.draw_round_rect(rect, radius, &self.style.background_border);
    }

    fn draw_grid(&self, surface: &mut dyn DrawingSurface, layout: &ChordLayout, chord: &NormalizedChord) {
        surface.draw_rect(layout.capo_rect(), &self.style.capo);

        if let Some(label) = chord.start_fret_label() {
            let bounds = surface.text_bounds(&label, &self.style.marker);
            surface.draw_text(&label, layout.start_fret_origin(&bounds), &self.style.marker);
        }

        for index in 0..=VISIBLE_FRETS as usize {
            if ChordLayout::is_fret_line_drawn(index) {
                let (from, to) = layout.fret_line(index);
                surface.draw_line(from, to, &self.style.grid);
            }
        }

        for index in 0..STRING_COUNT as usize {
            if ChordLayout::is_string_line_drawn(index) {
                let (from, to) = layout.string_line(index);
                surface.draw_line(from, to, &self.style.grid);
            }
            let string = index as u8 + 1;
            self.draw_string_marker(surface, layout, chord.marker(string), string);
        }
    }

    fn draw_string_marker(
        &self,
        surface: &mut dyn DrawingSurface,
        layout: &ChordLayout,
        marker: StringMarker,
        string: u8,
    ) {
        let glyph = match marker {
            StringMarker::Muted => MUTE_MARKER,
            StringMarker::Open => OPEN_MARKER,
            StringMarker::Fretted(column) => {
                surface.draw_circle(layout.dot_center(string, column), self.metrics.dot_radius, &self.style.dot);
                return;
            }
        };
        let bounds = surface.text_bounds(glyph, &self.style.marker);
        let origin = centered_origin(&bounds, layout.marker_center(string));
        surface.draw_text(glyph, origin, &self.style.marker);
    }
}

impl PanelView for ChordDiagramView {
    fn on_size_changed(&mut self, width: f32, height: f32) {
        let size = Vec2::new(width, height);
        if size != self.size {
            self.size = size;
            self.invalidation.invalidate();
        }
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
        Vec2::new(default_size(width), default_size(height))
    }

    fn render(&self, surface: &mut dyn DrawingSurface) {
        if self.frame.is_empty() {
            return;
        }
        let chord = normalize(&self.frame);
        let layout = self.layout(surface);
        if let Some(start) = chord.start_fret {
            debug!("chord '{}' shifted to start at fret {start}", self.frame.symbol());
        }

        self.draw_symbol(surface, &layout);
        self.draw_background(surface, &layout);
        self.draw_grid(surface, &layout, &chord);
    }

    fn is_invalidated(&self) -> bool {
        self.invalidation.is_set()
    }

    fn take_invalidation(&mut self) -> bool {
        self.invalidation.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawCommand};

    fn view_with(notes: &[(u8, Option<u8>)]) -> ChordDiagramView {
        let mut view = ChordDiagramView::new(&PanelTheme::default(), &ScaleContext::default());
        view.on_size_changed(240.0, 300.0);
        let notes = notes
            .iter()
            .map(|(string, fret)| FrameNote::new(*string, *fret).unwrap())
            .collect();
        view.set_data(Some("D"), notes).unwrap();
        view
    }

    #[test]
    fn empty_chord_draws_nothing() {
        let view = view_with(&[]);
        let mut list = DisplayList::new();
        view.render(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn grid_draws_five_fret_lines_and_four_string_lines() {
        let view = view_with(&[(4, Some(0)), (3, Some(2)), (2, Some(3)), (1, Some(2))]);
        let mut list = DisplayList::new();
        view.render(&mut list);

        let layout = view.layout(&list);
        let (vertical, horizontal): (Vec<_>, Vec<_>) =
            list.lines().partition(|(from, to, _)| from.x == to.x);
        assert_eq!(vertical.len(), 5);
        assert_eq!(horizontal.len(), 4);
        assert!(vertical.iter().all(|(from, _, _)| from.x < layout.fret_line_x(5)));
        assert!(horizontal
            .iter()
            .all(|(from, _, _)| from.y != layout.string_line_y(0) && from.y != layout.string_line_y(5)));
    }

    #[test]
    fn symbol_is_drawn_first_and_background_second() {
        let view = view_with(&[(1, Some(1))]);
        let mut list = DisplayList::new();
        view.render(&mut list);
        assert!(matches!(&list.commands()[0], DrawCommand::Text { text, .. } if text == "D"));
        assert!(matches!(list.commands()[1], DrawCommand::Background { .. }));
    }

    #[test]
    fn keeps_symbol_when_none_is_given() {
        let mut view = view_with(&[(1, Some(1))]);
        view.set_data(None, vec![FrameNote::open(2).unwrap()]).unwrap();
        assert_eq!(view.frame().symbol(), "D");
    }

    #[test]
    fn duplicate_strings_are_rejected() {
        let mut view = view_with(&[]);
        let notes = vec![FrameNote::open(2).unwrap(), FrameNote::fretted(2, 3).unwrap()];
        assert_eq!(view.set_data(None, notes), Err(PanelError::DuplicateString(2)));
    }

    #[test]
    fn shape_wider_than_the_window_is_rejected_and_frame_kept() {
        let mut view = view_with(&[(1, Some(2))]);
        view.take_invalidation();
        let notes = vec![FrameNote::fretted(2, 1).unwrap(), FrameNote::fretted(1, 9).unwrap()];
        assert_eq!(
            view.set_data(None, notes),
            Err(PanelError::ChordTooWide {
                lowest: 1,
                highest: 9,
                window: VISIBLE_FRETS,
            })
        );
        assert!(!view.is_invalidated());
        assert_eq!(view.frame().notes(), &[FrameNote::fretted(1, 2).unwrap()]);

        let mut list = DisplayList::new();
        view.render(&mut list);
        assert_eq!(list.circles().count(), 1);
    }

    #[test]
    fn reset_clears_and_invalidates() {
        let mut view = view_with(&[(1, Some(1))]);
        view.take_invalidation();
        view.reset();
        assert!(view.is_invalidated());
        assert!(view.frame().is_empty());
    }
}
