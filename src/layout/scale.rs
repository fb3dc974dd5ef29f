use serde::{Deserialize, Serialize};

/// Display density and font scale of the host surface. Every length constant
/// in the layout code is given in dp (or sp for text) and converted here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleContext {
    pub density: f32,
    pub font_scale: f32,
}

impl Default for ScaleContext {
    fn default() -> Self {
        Self {
            density: 1.0,
            font_scale: 1.0,
        }
    }
}

impl ScaleContext {
    pub fn new(density: f32, font_scale: f32) -> Self {
        Self { density, font_scale }
    }

    pub fn dp(&self, value: f32) -> f32 {
        value * self.density + 0.5
    }

    /// Like [`Self::dp`] but truncated to whole pixels.
    pub fn dp_whole(&self, value: f32) -> f32 {
        self.dp(value).trunc()
    }

    pub fn sp(&self, value: f32) -> f32 {
        value * self.font_scale + 0.5
    }
}

/// Size constraint handed down by the host when it measures a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureSpec {
    Exactly(f32),
    AtMost(f32),
    Unspecified,
}

impl MeasureSpec {
    pub fn size(&self) -> f32 {
        match self {
            MeasureSpec::Exactly(size) | MeasureSpec::AtMost(size) => *size,
            MeasureSpec::Unspecified => 0.0,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, MeasureSpec::Exactly(_))
    }
}

/// Size a view takes when it has no opinion of its own.
pub fn default_size(spec: MeasureSpec) -> f32 {
    spec.size()
}
