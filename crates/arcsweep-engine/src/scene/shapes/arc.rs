use crate::arc::LineCap;
use crate::coords::Vec2;
use crate::paint::Paint;

/// Stroke parameters for outlined shapes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub cap: LineCap,
}

impl Stroke {
    #[inline]
    pub const fn new(width: f32, cap: LineCap) -> Self {
        Self { width, cap }
    }

    #[inline]
    pub const fn round(width: f32) -> Self {
        Self::new(width, LineCap::Round)
    }
}

/// Stroked circular arc payload.
///
/// Angles are in degrees, 0° at 3 o'clock, clockwise positive. A negative
/// sweep runs counter-clockwise from `start_angle`. Arcs are never filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCmd {
    pub center: Vec2,
    /// Radius of the stroke's centre line.
    pub radius: f32,
    pub start_angle: f32,
    pub sweep_angle: f32,
    pub stroke: Stroke,
    pub paint: Paint,
}

impl ArcCmd {
    #[inline]
    pub fn new(
        center: Vec2,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        stroke: Stroke,
        paint: Paint,
    ) -> Self {
        Self { center, radius, start_angle, sweep_angle, stroke, paint }
    }

    /// Returns a copy moved by `offset`, including the gradient axis.
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.center = self.center + offset;
        if let Paint::LinearGradient(g) = &mut self.paint {
            g.start = g.start + offset;
            g.end = g.end + offset;
        }
        self
    }

    /// Point on the centre line at the start of the sweep.
    #[inline]
    pub fn start_point(&self) -> Vec2 {
        self.center + Vec2::from_angle_deg(self.start_angle) * self.radius
    }

    /// Point on the centre line at the end of the sweep.
    #[inline]
    pub fn end_point(&self) -> Vec2 {
        self.center + Vec2::from_angle_deg(self.start_angle + self.sweep_angle) * self.radius
    }
}
