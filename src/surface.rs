//! Drawing surface seam between the views and whatever rasterizes them.
//!
//! Views only issue primitive calls and query text bounds. `DisplayList` is
//! the recording implementation: it keeps every call as a [`DrawCommand`] so
//! the bevy host (or a test) can replay or inspect a frame.

use bevy::color::Color;
use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::layout::text::TextBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaintStyle {
    Fill,
    Stroke,
}

/// Immutable shape style, built once per view from the theme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
        }
    }

    pub fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width,
        }
    }

    pub fn with_stroke_width(self, stroke_width: f32) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextPaint {
    pub color: Color,
    pub size: f32,
    pub bold: bool,
}

impl TextPaint {
    pub fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            bold: false,
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

pub trait TextMetrics {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds;
}

/// Primitive drawing calls in view-local pixel coordinates, y pointing down.
/// Text is placed by its baseline origin.
pub trait DrawingSurface {
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint);
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint);
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);
    fn draw_text(&mut self, text: &str, origin: Vec2, paint: &TextPaint);
    fn fill_background(&mut self, rect: Rect, radius: f32, paint: &Paint);
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds;
}

const ADVANCE: f32 = 0.6;
const SIDE_BEARING: f32 = 0.08;
const CAP_HEIGHT: f32 = 0.72;
const ASCENDER: f32 = 0.76;
const X_HEIGHT: f32 = 0.52;
const DESCENDER: f32 = 0.22;
const BOLD_WIDEN: f32 = 1.05;

/// Glyph-class font model for hosts without access to real font metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateMetrics;

impl ApproximateMetrics {
    fn glyph_extent(glyph: char) -> (f32, f32) {
        match glyph {
            ' ' => (0.0, 0.0),
            'g' | 'j' | 'p' | 'q' | 'y' => (X_HEIGHT, DESCENDER),
            'b' | 'd' | 'f' | 'h' | 'i' | 'k' | 'l' | 't' => (ASCENDER, 0.0),
            '=' | '-' | '+' => (X_HEIGHT * 0.8, 0.0),
            c if c.is_ascii_lowercase() => (X_HEIGHT, 0.0),
            _ => (CAP_HEIGHT, 0.0),
        }
    }
}

impl TextMetrics for ApproximateMetrics {
    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        let widen = if paint.bold { BOLD_WIDEN } else { 1.0 };
        let advance = paint.size * ADVANCE * widen;
        let count = text.chars().count() as f32;

        let (ascent, descent) = text
            .chars()
            .map(Self::glyph_extent)
            .fold((0.0f32, 0.0f32), |(a, d), (ga, gd)| (a.max(ga), d.max(gd)));

        TextBounds {
            left: advance * SIDE_BEARING,
            top: -ascent * paint.size,
            right: advance * count - advance * SIDE_BEARING,
            bottom: descent * paint.size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        paint: Paint,
    },
    Rect {
        rect: Rect,
        paint: Paint,
    },
    RoundRect {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
    Circle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    Text {
        text: String,
        origin: Vec2,
        bounds: TextBounds,
        paint: TextPaint,
    },
    Background {
        rect: Rect,
        radius: f32,
        paint: Paint,
    },
}

/// Recorded frame of draw calls.
#[derive(Debug, Clone, Default)]
pub struct DisplayList<M = ApproximateMetrics> {
    commands: Vec<DrawCommand>,
    metrics: M,
}

impl<M: TextMetrics> DisplayList<M> {
    pub fn with_metrics(metrics: M) -> Self {
        Self {
            commands: Vec::new(),
            metrics,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, origin, .. } => Some((text.as_str(), *origin)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, &Paint)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { from, to, paint } => Some((*from, *to, paint)),
            _ => None,
        })
    }

    pub fn round_rects(&self) -> impl Iterator<Item = (Rect, &Paint)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::RoundRect { rect, paint, .. } => Some((*rect, paint)),
            _ => None,
        })
    }
}

impl DisplayList<ApproximateMetrics> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TextMetrics> DrawingSurface for DisplayList<M> {
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: &Paint) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            paint: *paint,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::Rect { rect, paint: *paint });
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::RoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint: *paint,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Vec2, paint: &TextPaint) {
        let bounds = self.metrics.text_bounds(text, paint);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            bounds,
            paint: *paint,
        });
    }

    fn fill_background(&mut self, rect: Rect, radius: f32, paint: &Paint) {
        self.commands.push(DrawCommand::Background {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn text_bounds(&self, text: &str, paint: &TextPaint) -> TextBounds {
        self.metrics.text_bounds(text, paint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_bounds_follow_glyph_classes() {
        let paint = TextPaint::new(Color::WHITE, 10.0);
        let metrics = ApproximateMetrics;

        let x = metrics.text_bounds("x", &paint);
        let e = metrics.text_bounds("E", &paint);
        let g = metrics.text_bounds("g", &paint);

        assert!(x.top > e.top, "lowercase x sits lower than a capital");
        assert_eq!(e.bottom, 0.0);
        assert!(g.bottom > 0.0);
        assert!(metrics.text_bounds("12", &paint).width() > metrics.text_bounds("1", &paint).width());
        assert_eq!(metrics.text_bounds("", &paint), TextBounds::default());
    }

    #[test]
    fn bold_text_is_wider() {
        let regular = TextPaint::new(Color::WHITE, 16.0);
        let bold = regular.bold();
        let metrics = ApproximateMetrics;
        assert!(metrics.text_bounds("A", &bold).width() > metrics.text_bounds("A", &regular).width());
    }

    #[test]
    fn display_list_records_in_order() {
        let mut list = DisplayList::new();
        let paint = Paint::stroke(Color::BLACK, 2.0);
        list.draw_line(Vec2::ZERO, Vec2::new(10.0, 0.0), &paint);
        list.draw_text("o", Vec2::new(4.0, 4.0), &TextPaint::new(Color::BLACK, 12.0));
        list.draw_circle(Vec2::new(5.0, 5.0), 3.0, &Paint::fill(Color::BLACK));

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Line { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec![("o", Vec2::new(4.0, 4.0))]);
        assert_eq!(list.circles().count(), 1);

        list.clear();
        assert!(list.is_empty());
    }
}
