use bevy::math::{Rect, Vec2};

use crate::layout::scale::ScaleContext;
use crate::layout::text::TextBounds;
use crate::model::{STRING_COUNT, VISIBLE_FRETS};

const SYMBOL_TEXT_SP: f32 = 24.0;
const MARKER_TEXT_SP: f32 = 16.0;
const SYMBOL_BAND_DP: f32 = 24.0;
const START_FRET_BAND_DP: f32 = 16.0;
const TOP_MARGIN_DP: f32 = 10.0;
const BOTTOM_MARGIN_DP: f32 = 10.0;
const CAPO_WIDTH_DP: f32 = 8.0;
const MARKER_LEFT_MARGIN_DP: f32 = 8.0;
const MARKER_CAPO_MARGIN_DP: f32 = 8.0;
const DOT_RADIUS_DP: f32 = 6.0;
const BORDER_WIDTH_DP: f32 = 2.0;
const BACKGROUND_RADIUS_DP: f32 = 16.0;

/// Pixel constants of the chord diagram for one display scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordMetrics {
    pub symbol_text_size: f32,
    pub marker_text_size: f32,
    pub symbol_band: f32,
    pub start_fret_band: f32,
    /// Space above the symbol band; the start-fret band is always reserved.
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub capo_width: f32,
    pub marker_left_margin: f32,
    pub marker_capo_margin: f32,
    pub dot_radius: f32,
    pub border_width: f32,
    pub background_radius: f32,
}

impl ChordMetrics {
    pub fn new(scale: &ScaleContext) -> Self {
        let start_fret_band = scale.dp(START_FRET_BAND_DP);
        Self {
            symbol_text_size: scale.sp(SYMBOL_TEXT_SP),
            marker_text_size: scale.sp(MARKER_TEXT_SP),
            symbol_band: scale.dp(SYMBOL_BAND_DP),
            start_fret_band,
            top_margin: scale.dp(TOP_MARGIN_DP) + start_fret_band,
            bottom_margin: scale.dp(BOTTOM_MARGIN_DP),
            capo_width: scale.dp(CAPO_WIDTH_DP),
            marker_left_margin: scale.dp(MARKER_LEFT_MARGIN_DP),
            marker_capo_margin: scale.dp(MARKER_CAPO_MARGIN_DP),
            dot_radius: scale.dp(DOT_RADIUS_DP),
            border_width: scale.dp(BORDER_WIDTH_DP),
            background_radius: scale.dp(BACKGROUND_RADIUS_DP),
        }
    }
}

/// Grid geometry of one chord diagram pass. Strings run horizontally (string 1
/// on top), frets are the columns between the vertical lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordLayout {
    pub metrics: ChordMetrics,
    pub width: f32,
    pub height: f32,
    /// Top of the grid: margins plus the symbol band.
    pub grid_top: f32,
    pub grid_bottom: f32,
    pub capo_left: f32,
    /// Left edge of the grid, right edge of the capo bar.
    pub left_margin: f32,
    pub column_width: f32,
    pub row_height: f32,
}

impl ChordLayout {
    /// `marker_width` is the ink width of the "x" marker glyph.
    pub fn compute(width: f32, height: f32, metrics: ChordMetrics, marker_width: f32) -> Self {
        let grid_top = metrics.top_margin + metrics.symbol_band;
        let grid_bottom = height - metrics.bottom_margin;
        let capo_left = marker_width + metrics.marker_left_margin + metrics.marker_capo_margin;
        let left_margin = capo_left + metrics.capo_width;
        let columns = VISIBLE_FRETS as f32;

        Self {
            metrics,
            width,
            height,
            grid_top,
            grid_bottom,
            capo_left,
            left_margin,
            column_width: (width - left_margin - metrics.border_width) / columns,
            row_height: (grid_bottom - grid_top - metrics.border_width) / columns,
        }
    }

    pub fn capo_rect(&self) -> Rect {
        Rect::new(self.capo_left, self.grid_top, self.left_margin, self.grid_bottom)
    }

    pub fn background_rect(&self) -> Rect {
        Rect::new(self.left_margin, self.grid_top, self.width, self.grid_bottom)
    }

    /// X of the fret line `index` (0 = next to the capo bar, 5 = far right).
    pub fn fret_line_x(&self, index: usize) -> f32 {
        self.left_margin + self.column_width * index as f32 + self.metrics.border_width / 2.0
    }

    /// Y of the line for zero-based string row `index`.
    pub fn string_line_y(&self, index: usize) -> f32 {
        self.grid_top + self.row_height * index as f32 + self.metrics.border_width / 2.0
    }

    pub fn string_y(&self, string: u8) -> f32 {
        self.string_line_y((string - 1) as usize)
    }

    /// The far right fret line is left to the background's rounded edge.
    pub fn is_fret_line_drawn(index: usize) -> bool {
        index < VISIBLE_FRETS as usize
    }

    /// Only the four inner string lines are drawn; the outer two are left to
    /// the background's border.
    pub fn is_string_line_drawn(index: usize) -> bool {
        index != 0 && index != STRING_COUNT as usize - 1
    }

    pub fn fret_line(&self, index: usize) -> (Vec2, Vec2) {
        let x = self.fret_line_x(index);
        (Vec2::new(x, self.grid_top), Vec2::new(x, self.grid_bottom))
    }

    pub fn string_line(&self, index: usize) -> (Vec2, Vec2) {
        let y = self.string_line_y(index);
        (Vec2::new(self.left_margin, y), Vec2::new(self.width, y))
    }

    /// Center of a finger dot for `string` in visible `column` (1..=5).
    pub fn dot_center(&self, string: u8, column: u8) -> Vec2 {
        let left = self.fret_line_x((column - 1) as usize);
        Vec2::new(left + self.column_width / 2.0, self.string_y(string))
    }

    /// Center of the "x"/"o" marker glyph for `string`.
    pub fn marker_center(&self, string: u8) -> Vec2 {
        Vec2::new(self.metrics.marker_left_margin, self.string_y(string))
    }

    pub fn symbol_origin(&self, bounds: &TextBounds) -> Vec2 {
        Vec2::new(
            -bounds.left,
            -bounds.top + self.metrics.top_margin - self.metrics.symbol_band / 2.0,
        )
    }

    pub fn start_fret_origin(&self, bounds: &TextBounds) -> Vec2 {
        Vec2::new(
            self.left_margin + bounds.left,
            self.grid_top - self.metrics.start_fret_band / 2.0,
        )
    }
}
