use bevy::math::{Rect, Vec2};

use crate::layout::scale::ScaleContext;
use crate::layout::text::{centered_origin, TextBounds};
use crate::model::STRING_COUNT;

const NOTE_HEIGHT_DP: f32 = 12.0;
const CORNER_RADIUS_DP: f32 = 10.0;
const BORDER_WIDTH_DP: f32 = 1.0;
const FRET_TEXT_SP: f32 = 12.0;

pub const DEFAULT_TIME_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabMetrics {
    pub note_height: f32,
    pub corner_radius: f32,
    pub border_width: f32,
    pub text_size: f32,
    /// Where the first group starts.
    pub start_offset: f32,
}

impl TabMetrics {
    pub fn new(scale: &ScaleContext) -> Self {
        Self {
            note_height: scale.dp(NOTE_HEIGHT_DP),
            corner_radius: scale.dp(CORNER_RADIUS_DP),
            border_width: scale.dp(BORDER_WIDTH_DP),
            text_size: scale.sp(FRET_TEXT_SP),
            start_offset: 0.0,
        }
    }
}

/// Time-to-pixel mapping of the tablature. Horizontal position is purely a
/// function of elapsed milliseconds; lanes split the height evenly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabLayout {
    pub metrics: TabMetrics,
    pub height: f32,
    /// Milliseconds per pixel.
    pub time_scale: f32,
    pub lane_spacing: f32,
}

impl TabLayout {
    pub fn compute(height: f32, metrics: TabMetrics, time_scale: f32) -> Self {
        let gaps = (STRING_COUNT - 1) as f32;
        Self {
            metrics,
            height,
            time_scale,
            lane_spacing: (height - metrics.note_height) / gaps,
        }
    }

    pub fn span(&self, duration_ms: u64) -> f32 {
        duration_ms as f32 / self.time_scale
    }

    pub fn x_at(&self, time_ms: u64) -> f32 {
        self.metrics.start_offset + self.span(time_ms)
    }

    /// Width the view needs to show `total_ms` without clipping.
    pub fn intrinsic_width(&self, total_ms: u64) -> f32 {
        self.span(total_ms)
    }

    pub fn lane_top(&self, string: u8) -> f32 {
        self.lane_spacing * (string - 1) as f32 + self.metrics.border_width / 2.0
    }

    pub fn lane_bottom(&self, string: u8) -> f32 {
        self.lane_spacing * (string - 1) as f32 + self.metrics.note_height
    }

    pub fn note_rect(&self, x: f32, duration_ms: u32, string: u8) -> Rect {
        Rect::new(
            x,
            self.lane_top(string),
            x + self.span(duration_ms as u64),
            self.lane_bottom(string),
        )
    }

    /// Outline rect, pulled in by half a stroke so the border stays inside the fill.
    pub fn border_rect(&self, note_rect: Rect) -> Rect {
        let inset = self.metrics.border_width / 2.0;
        Rect::new(
            note_rect.min.x + inset,
            note_rect.min.y,
            note_rect.max.x - inset,
            note_rect.max.y,
        )
    }

    pub fn label_origin(&self, note_rect: Rect, bounds: &TextBounds) -> Vec2 {
        centered_origin(bounds, note_rect.center())
    }
}
