/// Shape drawn at the open ends of a stroked arc.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    /// Flat end exactly at the arc's angular limit.
    Butt,
    /// Half-disc of diameter `stroke_width` centred on each end.
    #[default]
    Round,
}

/// Static stroke parameters of an arc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcStyle {
    /// Where the arc begins, in degrees (0° = 3 o'clock, clockwise positive).
    pub start_angle: f32,
    /// Stroke thickness in logical pixels; also drives the geometry inset.
    pub stroke_width: f32,
    pub cap: LineCap,
}

impl ArcStyle {
    pub const DEFAULT_START_ANGLE: f32 = 135.0;
    pub const DEFAULT_STROKE_WIDTH: f32 = 40.0;

    #[inline]
    pub const fn new(start_angle: f32, stroke_width: f32) -> Self {
        Self { start_angle, stroke_width, cap: LineCap::Round }
    }
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_START_ANGLE, Self::DEFAULT_STROKE_WIDTH)
    }
}

/// Current and target sweep of an arc, in degrees.
///
/// `current` is what gets drawn; `destination` is where the next animation
/// run heads. No wraparound is applied.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepState {
    pub current: f32,
    pub destination: f32,
}

impl SweepState {
    pub const DEFAULT_SWEEP: f32 = 270.0;

    #[inline]
    pub const fn new(current: f32, destination: f32) -> Self {
        Self { current, destination }
    }
}

impl Default for SweepState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SWEEP, Self::DEFAULT_SWEEP)
    }
}
