use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::scale::ScaleContext;
use crate::layout::text::TextBounds;
use crate::model::STRING_COUNT;

/// Open-string names, string 1 (high E) first.
pub const STRING_LETTERS: [&str; STRING_COUNT as usize] = ["E", "B", "G", "D", "A", "E"];

const LETTER_BAND_DP: f32 = 16.0;
const LETTER_STRING_MARGIN_DP: f32 = 8.0;
const EDGE_MARGIN_DP: f32 = 8.0;
const DOT_RADIUS_DP: f32 = 4.0;
const LETTER_TEXT_SP: f32 = 16.0;
const STROKE_WIDTHS_DP: [f32; STRING_COUNT as usize] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];

/// Margin rules of the string ruler.
///
/// The default places half a string spacing above the first letter and none
/// below the last. `symmetric_margins` swaps that for a fixed edge margin at
/// both ends. `half_glyph_top_inset` centers each letter on half its own ink
/// height below the lane top instead of the middle of the letter band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulerVariant {
    #[serde(default)]
    pub symmetric_margins: bool,
    #[serde(default)]
    pub half_glyph_top_inset: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerMetrics {
    pub letter_band: f32,
    pub letter_string_margin: f32,
    pub edge_margin: f32,
    pub dot_radius: f32,
    pub text_size: f32,
    pub stroke_widths: [f32; STRING_COUNT as usize],
}

impl RulerMetrics {
    pub fn new(scale: &ScaleContext) -> Self {
        Self {
            letter_band: scale.dp_whole(LETTER_BAND_DP),
            letter_string_margin: scale.dp_whole(LETTER_STRING_MARGIN_DP),
            edge_margin: scale.dp_whole(EDGE_MARGIN_DP),
            dot_radius: scale.dp_whole(DOT_RADIUS_DP),
            text_size: scale.sp(LETTER_TEXT_SP),
            stroke_widths: STROKE_WIDTHS_DP.map(|width| scale.dp_whole(width)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulerLayout {
    pub metrics: RulerMetrics,
    pub variant: RulerVariant,
    /// Gap between letter bands.
    pub string_spacing: f32,
    pub width: f32,
}

impl RulerLayout {
    pub fn compute(
        width: f32,
        metrics: RulerMetrics,
        variant: RulerVariant,
        string_spacing: f32,
    ) -> Self {
        Self {
            metrics,
            variant,
            string_spacing,
            width,
        }
    }

    fn pitch(&self) -> f32 {
        self.string_spacing + self.metrics.letter_band
    }

    pub fn top_inset(&self) -> f32 {
        if self.variant.symmetric_margins {
            self.metrics.edge_margin
        } else {
            self.string_spacing / 2.0
        }
    }

    /// Top of the letter band for zero-based string `index`.
    pub fn lane_top(&self, index: usize) -> f32 {
        self.top_inset() + self.pitch() * index as f32
    }

    /// Y of the visual center of the letter, which is also the string line.
    pub fn string_y(&self, index: usize, bounds: &TextBounds) -> f32 {
        let inset = if self.variant.half_glyph_top_inset {
            bounds.height() / 2.0
        } else {
            self.metrics.letter_band / 2.0
        };
        self.lane_top(index) + inset
    }

    /// Baseline origin of the letter: ink flush with the left edge, ink
    /// center on the string line.
    pub fn letter_origin(&self, index: usize, bounds: &TextBounds) -> Vec2 {
        Vec2::new(-bounds.left, self.string_y(index, bounds) - bounds.center_y())
    }

    pub fn string_line(&self, index: usize, bounds: &TextBounds) -> (Vec2, Vec2) {
        let y = self.string_y(index, bounds);
        let start = self.metrics.letter_string_margin + bounds.width();
        (Vec2::new(start, y), Vec2::new(self.width, y))
    }

    pub fn dot_center(&self, index: usize, bounds: &TextBounds) -> Vec2 {
        Vec2::new(self.width - self.metrics.dot_radius, self.string_y(index, bounds))
    }

    pub fn stroke_width(&self, index: usize) -> f32 {
        self.metrics.stroke_widths[index]
    }

    pub fn intrinsic_height(&self) -> f32 {
        let strings = STRING_COUNT as f32;
        if self.variant.symmetric_margins {
            2.0 * self.metrics.edge_margin + self.pitch() * strings - self.string_spacing
        } else {
            self.pitch() * strings
        }
    }
}
