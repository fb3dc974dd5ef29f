use bevy::log::debug;
use bevy::math::{Rect, Vec2};

use crate::components::{Invalidation, PanelView};
use crate::file::theme::PanelTheme;
use crate::layout::{
    default_size, MeasureSpec, RulerLayout, RulerMetrics, RulerVariant, ScaleContext, STRING_LETTERS,
};
use crate::surface::{DrawingSurface, Paint, TextPaint};

#[derive(Debug, Clone, PartialEq)]
pub struct GuitarStringsStyle {
    pub background: Paint,
    pub string: Paint,
    pub letter: TextPaint,
    pub dot: Paint,
}

impl GuitarStringsStyle {
    pub fn new(theme: &PanelTheme, metrics: &RulerMetrics) -> Self {
        Self {
            background: Paint::fill(theme.ruler_background),
            string: Paint::stroke(theme.ruler_string, metrics.stroke_widths[0]),
            letter: TextPaint::new(theme.ruler_letter, metrics.text_size).bold(),
            dot: Paint::fill(theme.ruler_dot),
        }
    }
}

/// String ruler: one labelled line per string, thicker toward the low E,
/// with a dot at the right end.
#[derive(Debug, Clone)]
pub struct GuitarStringsView {
    metrics: RulerMetrics,
    variant: RulerVariant,
    style: GuitarStringsStyle,
    string_spacing: f32,
    scale: ScaleContext,
    size: Vec2,
    invalidation: Invalidation,
}

impl GuitarStringsView {
    pub fn new(theme: &PanelTheme, scale: &ScaleContext) -> Self {
        let metrics = RulerMetrics::new(scale);
        Self {
            style: GuitarStringsStyle::new(theme, &metrics),
            string_spacing: metrics.letter_band,
            metrics,
            variant: RulerVariant::default(),
            scale: *scale,
            size: Vec2::ZERO,
            invalidation: Invalidation::default(),
        }
    }

    pub fn with_variant(mut self, variant: RulerVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn variant(&self) -> RulerVariant {
        self.variant
    }

    pub fn string_spacing(&self) -> f32 {
        self.string_spacing
    }

    pub fn set_string_spacing(&mut self, spacing: f32) {
        self.string_spacing = spacing.max(0.0);
        self.invalidation.invalidate();
    }

    pub fn set_string_spacing_dp(&mut self, spacing_dp: f32) {
        self.set_string_spacing(self.scale.dp_whole(spacing_dp));
    }

    pub fn layout(&self) -> RulerLayout {
        RulerLayout::compute(self.size.x, self.metrics, self.variant, self.string_spacing)
    }
}

impl PanelView for GuitarStringsView {
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

    /// Width always comes from the host. Height is intrinsic once the width
    /// is pinned.
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
        let measured = if width.is_exact() {
            let layout = RulerLayout::compute(width.size(), self.metrics, self.variant, self.string_spacing);
            Vec2::new(width.size(), layout.intrinsic_height())
        } else {
            Vec2::new(default_size(width), default_size(height))
        };
        debug!("ruler measure {width:?} x {height:?} -> {measured}");
        measured
    }

    fn render(&self, surface: &mut dyn DrawingSurface) {
        let layout = self.layout();
        surface.fill_background(Rect::from_corners(Vec2::ZERO, self.size), 0.0, &self.style.background);

        for (index, letter) in STRING_LETTERS.iter().enumerate() {
            let bounds = surface.text_bounds(letter, &self.style.letter);
            surface.draw_text(letter, layout.letter_origin(index, &bounds), &self.style.letter);

            let (from, to) = layout.string_line(index, &bounds);
            let paint = self.style.string.with_stroke_width(layout.stroke_width(index));
            surface.draw_line(from, to, &paint);

            surface.draw_circle(layout.dot_center(index, &bounds), self.metrics.dot_radius, &self.style.dot);
        }
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
    use approx::assert_relative_eq;

    fn view() -> GuitarStringsView {
        let mut view = GuitarStringsView::new(&PanelTheme::default(), &ScaleContext::new(2.0, 1.0));
        view.on_size_changed(300.0, 400.0);
        view
    }

    #[test]
    fn draws_six_labelled_strings_over_a_background() {
        let view = view();
        let mut list = DisplayList::new();
        view.render(&mut list);

        assert!(matches!(list.commands()[0], DrawCommand::Background { .. }));
        let letters: Vec<&str> = list.texts().map(|(text, _)| text).collect();
        assert_eq!(letters, STRING_LETTERS.to_vec());
        assert_eq!(list.lines().count(), 6);
        assert_eq!(list.circles().count(), 6);
    }

    #[test]
    fn strings_get_thicker_and_dots_sit_on_their_line() {
        let view = view();
        let mut list = DisplayList::new();
        view.render(&mut list);

        let widths: Vec<f32> = list.lines().map(|(_, _, paint)| paint.stroke_width).collect();
        assert!(widths.windows(2).all(|pair| pair[0] < pair[1]));

        for ((from, to, _), (center, radius)) in list.lines().zip(list.circles()) {
            assert_relative_eq!(from.y, center.y);
            assert_relative_eq!(to.x, 300.0);
            assert_relative_eq!(center.x + radius, 300.0);
        }
    }

    #[test]
    fn exact_width_measures_intrinsic_height() {
        let view = view();
        let size = view.measure(MeasureSpec::Exactly(250.0), MeasureSpec::Unspecified);
        assert_relative_eq!(size.x, 250.0);
        assert_relative_eq!(size.y, (32.0 + 32.0) * 6.0);

        let loose = view.measure(MeasureSpec::AtMost(250.0), MeasureSpec::AtMost(100.0));
        assert_eq!(loose, Vec2::new(default_size(MeasureSpec::AtMost(250.0)), default_size(MeasureSpec::AtMost(100.0))));
    }

    #[test]
    fn spacing_override_changes_the_pitch() {
        let mut view = view();
        view.take_invalidation();
        view.set_string_spacing_dp(10.0);
        assert!(view.is_invalidated());
        assert_relative_eq!(view.string_spacing(), 20.0);

        let mut list = DisplayList::new();
        view.render(&mut list);
        let ys: Vec<f32> = list.lines().map(|(from, _, _)| from.y).collect();
        assert_relative_eq!(ys[1] - ys[0], 20.0 + 32.0);
    }

    #[test]
    fn symmetric_variant_grows_by_edge_margins() {
        let plain = view();
        let symmetric = view().with_variant(RulerVariant {
            symmetric_margins: true,
            half_glyph_top_inset: false,
        });
        let spec = MeasureSpec::Exactly(300.0);
        let plain_height = plain.measure(spec, MeasureSpec::Unspecified).y;
        let symmetric_height = symmetric.measure(spec, MeasureSpec::Unspecified).y;
        assert_relative_eq!(symmetric_height - plain_height, 2.0 * 16.0 - 32.0);
    }
}
