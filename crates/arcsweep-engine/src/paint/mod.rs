//! Paint model shared between the UI layer and renderers.
//!
//! Scope:
//! - color representation (display-space premultiplied alpha, ARGB boundary helpers)
//! - paint sources (solid, horizontal linear gradients)
//!
//! Geometry types remain in `coords` and `arc`.

pub mod color;
mod error;
pub mod gradient;

pub use color::Color;
pub use error::PaintError;
pub use gradient::{GradientSpec, GradientStop, LinearGradient, SpreadMode};

/// Paint source for stroking geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    #[inline]
    pub fn solid(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::LinearGradient(g)
    }
}
