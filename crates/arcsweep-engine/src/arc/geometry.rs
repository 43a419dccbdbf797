use crate::coords::{Vec2, Viewport};

/// Bounding box of the arc's centre line, in the widget's local space.
///
/// Always a square (`right - left == bottom - top`): the box is sized from the
/// shorter viewport side, so the arc is a circle and never an ellipse.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ArcGeometry {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ArcGeometry {
    /// Resolves geometry for a measured viewport.
    #[inline]
    pub fn for_viewport(viewport: Viewport, stroke_width: f32) -> Self {
        resolve(viewport.width, viewport.height, stroke_width)
    }

    /// Side length of the square (may be negative for degenerate input).
    #[inline]
    pub fn side(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    /// Radius of the stroke's centre line.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.side() * 0.5
    }

    /// Horizontal extent of the stroked ring, measured from local `x = 0`.
    #[inline]
    pub fn outer_extent(&self) -> f32 {
        self.left + self.right
    }

    /// True when there is nothing to draw.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.side() > 0.0 && self.side().is_finite())
    }
}

/// Computes the arc box from the viewport size and stroke width.
///
/// The box is inset by half the stroke on the top/left edge and its
/// right/bottom edge sits at `min(width, height) - stroke_width / 2`.
/// Zero or negative input yields a degenerate box; it is not an error.
pub fn resolve(viewport_width: f32, viewport_height: f32, stroke_width: f32) -> ArcGeometry {
    let half = stroke_width / 2.0;
    let size = viewport_width.min(viewport_height) - half;

    ArcGeometry { left: half, top: half, right: size, bottom: size }
}
