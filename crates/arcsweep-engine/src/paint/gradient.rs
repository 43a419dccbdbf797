use std::sync::Arc;

use crate::arc::ArcGeometry;
use crate::coords::Vec2;

use super::{Color, PaintError};

/// Gradient spread behavior outside [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

impl SpreadMode {
    /// Maps a raw ramp parameter into `[0, 1]` according to this mode.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        match self {
            SpreadMode::Pad => t.clamp(0.0, 1.0),
            SpreadMode::Repeat => t - t.floor(),
            SpreadMode::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        }
    }
}

/// A single gradient stop.
///
/// `position` is expected in [0, 1]; values outside are clamped when sampling.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    #[inline]
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Ordered color ramp, independent of any geometry.
///
/// Positions are expected to be non-decreasing, starting at `0.0` and ending
/// at `1.0`. This is not enforced; an unordered ramp samples without panicking
/// but its look is unspecified.
///
/// Stops are shared: built gradients and their clones point at the same slice.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    stops: Arc<[GradientStop]>,
}

impl GradientSpec {
    /// Zips parallel `colors` / `positions` into a ramp.
    pub fn from_parts(colors: &[Color], positions: &[f32]) -> Result<Self, PaintError> {
        if colors.is_empty() || colors.len() != positions.len() {
            return Err(PaintError::InvalidGradientSpec {
                colors: colors.len(),
                positions: positions.len(),
            });
        }

        let stops = colors
            .iter()
            .zip(positions)
            .map(|(&color, &position)| GradientStop::new(position, color))
            .collect();

        Ok(Self { stops })
    }

    /// Like [`from_parts`](Self::from_parts), but degrades to
    /// [`default_ramp`](Self::default_ramp) on a malformed spec.
    pub fn from_parts_or_default(colors: &[Color], positions: &[f32]) -> Self {
        match Self::from_parts(colors, positions) {
            Ok(spec) => spec,
            Err(err) => {
                log::warn!("{err}; falling back to the default black ramp");
                Self::default_ramp()
            }
        }
    }

    /// Flat black: two opaque black stops at 0 and 1.
    pub fn default_ramp() -> Self {
        Self {
            stops: Arc::from([
                GradientStop::new(0.0, Color::BLACK),
                GradientStop::new(1.0, Color::BLACK),
            ]),
        }
    }

    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Lays the ramp horizontally across `geometry`.
    ///
    /// The ramp runs from `x = 0` to the outer edge of the stroked ring at
    /// `y = 0`; every point on the ring takes the color under its x-coordinate.
    /// The outer edge sits at `min(W, H)`, so the ramp covers the full view
    /// width only for square views. In a wider view it ends at the ring's right
    /// edge and the remaining strip is padded with the last stop.
    pub fn build(&self, geometry: &ArcGeometry) -> LinearGradient {
        LinearGradient::new(
            Vec2::zero(),
            Vec2::new(geometry.outer_extent(), 0.0),
            Arc::clone(&self.stops),
            SpreadMode::Pad,
        )
    }
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self::default_ramp()
    }
}

/// Builds the horizontal arc gradient in one step.
///
/// Like [`GradientSpec::build`], the ramp ends at `geometry.outer_extent()`
/// (`min(W, H)`), not at the view width.
///
/// Fails with [`PaintError::InvalidGradientSpec`] when the sequences are empty
/// or of different lengths.
pub fn build(
    geometry: &ArcGeometry,
    colors: &[Color],
    positions: &[f32],
) -> Result<LinearGradient, PaintError> {
    Ok(GradientSpec::from_parts(colors, positions)?.build(geometry))
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - Stops carry premultiplied colors; interpolation happens on straight channels.
/// - `spread` defines out-of-range behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Arc<[GradientStop]>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(
        start: Vec2,
        end: Vec2,
        stops: impl Into<Arc<[GradientStop]>>,
        spread: SpreadMode,
    ) -> Self {
        Self { start, end, stops: stops.into(), spread }
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.position.is_finite() && s.color.is_finite())
            && !self.stops.is_empty()
    }

    /// Color at `point`, projected onto the gradient axis.
    ///
    /// A zero-length axis samples the ramp start.
    pub fn sample(&self, point: Vec2) -> Color {
        let axis = self.end - self.start;
        let len2 = axis.dot(axis);
        let t = if len2 > 0.0 { (point - self.start).dot(axis) / len2 } else { 0.0 };
        self.sample_t(t)
    }

    /// Color at ramp parameter `t` (0 = first stop, 1 = last stop).
    pub fn sample_t(&self, t: f32) -> Color {
        let t = self.spread.apply(t);

        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Color::transparent(),
        };

        if t <= first.position.clamp(0.0, 1.0) {
            return first.color;
        }
        if t >= last.position.clamp(0.0, 1.0) {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let p0 = pair[0].position.clamp(0.0, 1.0);
            let p1 = pair[1].position.clamp(0.0, 1.0);
            if t >= p0 && t <= p1 {
                let span = p1 - p0;
                if span <= f32::EPSILON {
                    return pair[1].color;
                }
                return pair[0].color.lerp(pair[1].color, (t - p0) / span);
            }
        }

        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arc;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn red_blue_300() -> LinearGradient {
        // 300×300 viewport with a 40px stroke: the ring spans x ∈ [0, 300].
        let geometry = arc::resolve(300.0, 300.0, 40.0);
        build(&geometry, &[Color::RED, Color::BLUE], &[0.0, 1.0]).unwrap()
    }

    #[test]
    fn ramp_spans_outer_extent() {
        let g = red_blue_300();
        assert_eq!(g.start, Vec2::zero());
        assert_eq!(g.end, Vec2::new(300.0, 0.0));
        assert_eq!(g.spread, SpreadMode::Pad);
    }

    #[test]
    fn red_blue_endpoints_and_middle() {
        let g = red_blue_300();
        assert_eq!(g.sample(Vec2::new(0.0, 0.0)), Color::RED);
        assert_eq!(g.sample(Vec2::new(300.0, 0.0)), Color::BLUE);

        let mid = g.sample(Vec2::new(150.0, 0.0));
        assert!(close(mid.r, 0.5) && close(mid.b, 0.5));
        assert_eq!(mid.g, 0.0);
    }

    #[test]
    fn ramp_ignores_y() {
        let g = red_blue_300();
        assert_eq!(g.sample(Vec2::new(75.0, 0.0)), g.sample(Vec2::new(75.0, 280.0)));
    }

    #[test]
    fn channels_move_monotonically() {
        let g = red_blue_300();
        let mut prev = g.sample(Vec2::zero());
        for x in (10..=300).step_by(10) {
            let c = g.sample(Vec2::new(x as f32, 0.0));
            assert!(c.r <= prev.r + 1e-6);
            assert!(c.b >= prev.b - 1e-6);
            prev = c;
        }
    }

    #[test]
    fn sampling_beyond_ramp_clamps() {
        let g = red_blue_300();
        assert_eq!(g.sample(Vec2::new(-50.0, 0.0)), Color::RED);
        assert_eq!(g.sample(Vec2::new(900.0, 0.0)), Color::BLUE);
    }

    #[test]
    fn out_of_range_positions_clamp() {
        let spec = GradientSpec::from_parts(&[Color::RED, Color::BLUE], &[-1.0, 2.0]).unwrap();
        let g = spec.build(&arc::resolve(300.0, 300.0, 40.0));
        assert_eq!(g.sample_t(0.0), Color::RED);
        assert_eq!(g.sample_t(1.0), Color::BLUE);
    }

    #[test]
    fn three_stops_hit_middle_color() {
        let green = Color::from_argb(0xFF00_FF00);
        let spec =
            GradientSpec::from_parts(&[Color::RED, green, Color::BLUE], &[0.0, 0.5, 1.0]).unwrap();
        let g = spec.build(&arc::resolve(200.0, 200.0, 0.0));
        assert_eq!(g.sample_t(0.5), green);
        let quarter = g.sample_t(0.25);
        assert!(close(quarter.r, 0.5) && close(quarter.g, 0.5));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        assert_eq!(red_blue_300(), red_blue_300());
    }

    #[test]
    fn builds_share_stops_with_spec() {
        let spec = GradientSpec::from_parts(&[Color::RED, Color::BLUE], &[0.0, 1.0]).unwrap();
        let a = spec.build(&arc::resolve(300.0, 300.0, 40.0));
        let b = spec.build(&arc::resolve(120.0, 80.0, 4.0));
        assert!(Arc::ptr_eq(&a.stops, &b.stops));
        assert!(Arc::ptr_eq(&a.stops, &a.clone().stops));
    }

    #[test]
    fn wide_view_ramp_ends_at_ring_edge() {
        // 400×200: the ring spans x ∈ [0, 200] and the rest pads with blue.
        let geometry = arc::resolve(400.0, 200.0, 20.0);
        let g = build(&geometry, &[Color::RED, Color::BLUE], &[0.0, 1.0]).unwrap();
        assert_eq!(g.end, Vec2::new(200.0, 0.0));
        assert_eq!(g.sample(Vec2::new(300.0, 0.0)), Color::BLUE);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let geometry = arc::resolve(300.0, 300.0, 40.0);
        let err = build(&geometry, &[Color::RED, Color::BLUE], &[0.0]).unwrap_err();
        assert_eq!(err, PaintError::InvalidGradientSpec { colors: 2, positions: 1 });
    }

    #[test]
    fn empty_rejected() {
        assert!(GradientSpec::from_parts(&[], &[]).is_err());
    }

    #[test]
    fn invalid_spec_falls_back_to_black() {
        let spec = GradientSpec::from_parts_or_default(&[Color::RED, Color::BLUE], &[0.0]);
        assert_eq!(spec, GradientSpec::default_ramp());
        assert!(spec.stops().iter().all(|s| s.color == Color::BLACK));
    }

    #[test]
    fn repeat_and_reflect_wrap() {
        assert!(close(SpreadMode::Repeat.apply(1.25), 0.25));
        assert!(close(SpreadMode::Reflect.apply(1.25), 0.75));
        assert!(close(SpreadMode::Reflect.apply(-0.25), 0.25));
        assert_eq!(SpreadMode::Pad.apply(f32::NAN), 0.0);
    }

    #[test]
    fn degenerate_axis_samples_first_stop() {
        let g = GradientSpec::from_parts(&[Color::RED, Color::BLUE], &[0.0, 1.0])
            .unwrap()
            .build(&arc::resolve(0.0, 0.0, 0.0));
        assert_eq!(g.sample(Vec2::new(10.0, 0.0)), Color::RED);
    }
}
