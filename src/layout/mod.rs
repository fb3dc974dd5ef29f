//! Pure geometry: widget size, scale and data in, pixel positions out.

pub mod chord;
pub mod ruler;
pub mod scale;
pub mod tablature;
pub mod text;

pub use chord::{ChordLayout, ChordMetrics};
pub use ruler::{RulerLayout, RulerMetrics, RulerVariant, STRING_LETTERS};
pub use scale::{default_size, MeasureSpec, ScaleContext};
pub use tablature::{TabLayout, TabMetrics, DEFAULT_TIME_SCALE};
pub use text::{centered_origin, TextBounds};
