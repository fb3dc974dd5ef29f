use std::time::Duration;

use bevy::log::debug;
use bevy::math::Vec2;

use crate::components::{Invalidation, PanelView};
use crate::error::PanelError;
use crate::file::theme::{NotePalette, PanelTheme};
use crate::layout::{MeasureSpec, ScaleContext, TabLayout, TabMetrics, DEFAULT_TIME_SCALE};
use crate::model::{NoteGroup, NoteState, Tablature};
use crate::scroll::{Easing, ScrollController, DEFAULT_SCROLL_DURATION};
use crate::surface::{DrawingSurface, Paint, TextPaint};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteStyle {
    pub fill: Paint,
    pub border: Paint,
    pub text: TextPaint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FretBoardStyle {
    none: NoteStyle,
    correct: NoteStyle,
    wrong: NoteStyle,
}

impl FretBoardStyle {
    pub fn new(palette: &NotePalette, metrics: &TabMetrics) -> Self {
        let style = |state| {
            let colors = palette.for_state(state);
            NoteStyle {
                fill: Paint::fill(colors.fill),
                border: Paint::stroke(colors.border, metrics.border_width),
                text: TextPaint::new(colors.text, metrics.text_size).bold(),
            }
        };
        Self {
            none: style(NoteState::None),
            correct: style(NoteState::Correct),
            wrong: style(NoteState::Wrong),
        }
    }

    pub fn for_state(&self, state: NoteState) -> &NoteStyle {
        match state {
            NoteState::None => &self.none,
            NoteState::Correct => &self.correct,
            NoteState::Wrong => &self.wrong,
        }
    }
}

/// Scrolling tablature. Note groups are laid out left to right by time, one
/// lane per string, and the whole strip is moved by the scroll controller.
///
/// `render` draws in content coordinates; the host shifts the output by
/// `-scroll_offset()` each frame.
#[derive(Debug, Clone)]
pub struct FretBoardView {
    tablature: Tablature,
    metrics: TabMetrics,
    style: FretBoardStyle,
    time_scale: f32,
    default_scroll: Duration,
    scroller: ScrollController,
    size: Vec2,
    invalidation: Invalidation,
}

impl FretBoardView {
    pub fn new(theme: &PanelTheme, scale: &ScaleContext) -> Self {
        let metrics = TabMetrics::new(scale);
        Self {
            tablature: Tablature::default(),
            style: FretBoardStyle::new(&theme.notes, &metrics),
            metrics,
            time_scale: DEFAULT_TIME_SCALE,
            default_scroll: DEFAULT_SCROLL_DURATION,
            scroller: ScrollController::new(Easing::Linear),
            size: Vec2::ZERO,
            invalidation: Invalidation::default(),
        }
    }

    /// Milliseconds of timeline per pixel.
    pub fn with_time_scale(mut self, time_scale: f32) -> Result<Self, PanelError> {
        if !(time_scale > 0.0 && time_scale.is_finite()) {
            return Err(PanelError::InvalidTimeScale(time_scale));
        }
        self.time_scale = time_scale;
        Ok(self)
    }

    pub fn with_default_scroll(mut self, duration: Duration) -> Self {
        self.default_scroll = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.scroller = ScrollController::new(easing);
        self
    }

    pub fn tablature(&self) -> &Tablature {
        &self.tablature
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn set_data(&mut self, groups: Vec<NoteGroup>) {
        self.tablature.set_data(groups);
        self.invalidation.invalidate();
    }

    pub fn update_group_state(&mut self, index: usize, state: NoteState) -> Result<(), PanelError> {
        self.tablature.update_group_state(index, state)?;
        self.invalidation.invalidate();
        Ok(())
    }

    pub fn reset_states(&mut self) {
        self.tablature.reset_states();
        self.invalidation.invalidate();
    }

    pub fn total_duration(&self) -> u64 {
        self.tablature.total_duration()
    }

    /// Scroll by `dx` timeline milliseconds (converted to pixels through the
    /// time scale) and `dy` pixels, starting at frame time `now`.
    pub fn smooth_scroll_by(&mut self, dx: f32, dy: f32, duration: Option<Duration>, now: Duration) {
        let delta = Vec2::new(dx / self.time_scale, dy);
        self.scroller
            .start_scroll(delta, duration.unwrap_or(self.default_scroll), now);
        self.invalidation.invalidate();
    }

    /// Jump back to the start of the timeline.
    pub fn reset_scroll(&mut self) {
        self.scroller.reset();
        self.invalidation.invalidate();
    }

    /// Advance the scroll animation to `now`. Returns `true` while the host
    /// should keep scheduling frames.
    pub fn compute_scroll(&mut self, now: Duration) -> bool {
        self.scroller.compute_scroll_offset(now)
    }

    pub fn scroll_offset(&self) -> Vec2 {
        self.scroller.current_offset()
    }

    pub fn scroll_progress(&self, now: Duration) -> f32 {
        self.scroller.progress(now)
    }

    pub fn is_scrolling(&self) -> bool {
        !self.scroller.is_finished()
    }

    pub fn layout(&self) -> TabLayout {
        TabLayout::compute(self.size.y, self.metrics, self.time_scale)
    }

    fn draw_group(&self, surface: &mut dyn DrawingSurface, layout: &TabLayout, group: &NoteGroup, x: f32) {
        let style = self.style.for_state(group.state());
        let radius = self.metrics.corner_radius;
        for note in group.notes() {
            let rect = layout.note_rect(x, note.duration_ms(), note.string());
            surface.draw_round_rect(rect, radius, &style.fill);
            surface.draw_round_rect(layout.border_rect(rect), radius, &style.border);

            let label = note.fret().to_string();
            let bounds = surface.text_bounds(&label, &style.text);
            surface.draw_text(&label, layout.label_origin(rect, &bounds), &style.text);
        }
    }
}

impl PanelView for FretBoardView {
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

    /// As wide as the whole timeline, as tall as the host allows.
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Vec2 {
        let measured = Vec2::new(
            self.layout().intrinsic_width(self.total_duration()),
            height.size(),
        );
        debug!("fretboard measure {width:?} x {height:?} -> {measured}");
        measured
    }

    fn render(&self, surface: &mut dyn DrawingSurface) {
        if self.tablature.is_empty() {
            return;
        }
        let layout = self.layout();
        let mut x = layout.metrics.start_offset;
        for group in self.tablature.groups() {
            self.draw_group(surface, &layout, group, x);
            x += layout.span(group.width() as u64);
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
    use crate::file::theme::NoteColors;
    use crate::model::Note;
    use crate::surface::{DisplayList, DrawCommand};
    use approx::assert_relative_eq;
    use bevy::color::Color;

    fn group(notes: &[(u8, u8, u32)]) -> NoteGroup {
        NoteGroup::new(
            notes
                .iter()
                .map(|(string, fret, duration)| Note::new(*string, *fret, *duration).unwrap())
                .collect(),
        )
    }

    fn view(theme: &PanelTheme) -> FretBoardView {
        let mut view = FretBoardView::new(theme, &ScaleContext::default());
        view.on_size_changed(600.0, 120.0);
        view.set_data(vec![
            group(&[(1, 3, 500), (2, 12, 400)]),
            group(&[(6, 0, 300)]),
        ]);
        view
    }

    #[test]
    fn groups_are_laid_out_back_to_back() {
        let view = view(&PanelTheme::default());
        let mut list = DisplayList::new();
        view.render(&mut list);

        let fills: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::RoundRect { rect, paint, .. } if paint.style == crate::surface::PaintStyle::Fill => {
                    Some(*rect)
                }
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 3);
        assert_relative_eq!(fills[0].min.x, 0.0);
        assert_relative_eq!(fills[0].width(), 500.0);
        assert_relative_eq!(fills[1].width(), 400.0);
        assert_relative_eq!(fills[2].min.x, 500.0);
        assert_relative_eq!(fills[2].max.x, 800.0);

        let labels: Vec<&str> = list.texts().map(|(text, _)| text).collect();
        assert_eq!(labels, vec!["3", "12", "0"]);
    }

    #[test]
    fn empty_tablature_draws_nothing() {
        let mut view = view(&PanelTheme::default());
        view.set_data(Vec::new());
        assert!(view.is_invalidated());
        assert_eq!(view.total_duration(), 0);

        let mut list = DisplayList::new();
        view.render(&mut list);
        assert!(list.is_empty());
        assert_eq!(
            view.measure(MeasureSpec::Unspecified, MeasureSpec::Exactly(120.0)),
            Vec2::new(0.0, 120.0)
        );
    }

    #[test]
    fn measure_reports_timeline_width() {
        let view = view(&PanelTheme::default());
        let size = view.measure(MeasureSpec::Unspecified, MeasureSpec::Exactly(120.0));
        assert_eq!(size, Vec2::new(800.0, 120.0));

        let half = view.clone().with_time_scale(2.0).unwrap();
        assert_eq!(half.measure(MeasureSpec::Unspecified, MeasureSpec::AtMost(90.0)), Vec2::new(400.0, 90.0));
    }

    #[test]
    fn group_color_follows_its_state() {
        let mut theme = PanelTheme::default();
        theme.notes.wrong = NoteColors {
            fill: Color::srgb(1.0, 0.0, 0.0),
            border: Color::srgb(0.5, 0.0, 0.0),
            text: Color::srgb(0.5, 0.0, 0.0),
        };
        let mut view = view(&theme);
        view.update_group_state(1, NoteState::Wrong).unwrap();

        let mut list = DisplayList::new();
        view.render(&mut list);
        let fill_colors: Vec<Color> = list
            .round_rects()
            .filter(|(_, paint)| paint.style == crate::surface::PaintStyle::Fill)
            .map(|(_, paint)| paint.color)
            .collect();
        assert_eq!(fill_colors[0], theme.notes.none.fill);
        assert_eq!(fill_colors[2], Color::srgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn bad_group_index_fails_loudly() {
        let mut view = view(&PanelTheme::default());
        assert_eq!(
            view.update_group_state(2, NoteState::Correct),
            Err(PanelError::GroupIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn scroll_dx_goes_through_the_time_scale() {
        let mut view = view(&PanelTheme::default()).with_time_scale(2.0).unwrap();
        view.smooth_scroll_by(800.0, 0.0, Some(Duration::from_millis(800)), Duration::ZERO);
        assert!(view.is_scrolling());
        view.compute_scroll(Duration::from_millis(800));
        assert_eq!(view.scroll_offset(), Vec2::new(400.0, 0.0));
        assert!(!view.is_scrolling());
        assert!(!view.compute_scroll(Duration::from_millis(900)));
    }

    #[test]
    fn default_scroll_duration_applies() {
        let mut view = view(&PanelTheme::default());
        view.smooth_scroll_by(100.0, 0.0, None, Duration::ZERO);
        view.compute_scroll(Duration::from_millis(249));
        assert!(view.is_scrolling());
        view.compute_scroll(Duration::from_millis(250));
        assert!(!view.is_scrolling());
    }

    #[test]
    fn reset_scroll_snaps_home() {
        let mut view = view(&PanelTheme::default());
        view.smooth_scroll_by(800.0, 0.0, Some(Duration::from_secs(1)), Duration::ZERO);
        view.compute_scroll(Duration::from_millis(500));
        view.reset_scroll();
        assert_eq!(view.scroll_offset(), Vec2::ZERO);
        assert!(!view.is_scrolling());
    }

    #[test]
    fn invalid_time_scale_is_rejected() {
        let view = FretBoardView::new(&PanelTheme::default(), &ScaleContext::default());
        assert!(matches!(view.with_time_scale(0.0), Err(PanelError::InvalidTimeScale(_))));
    }
}
