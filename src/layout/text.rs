use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Ink bounds of a rendered string relative to its baseline origin. `top` is
/// negative for glyphs rising above the baseline, as with most font APIs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl TextBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Baseline origin that puts the visual center of the ink at `center`.
pub fn centered_origin(bounds: &TextBounds, center: Vec2) -> Vec2 {
    Vec2::new(center.x - bounds.center_x(), center.y - bounds.center_y())
}
