use crate::coords::Vec2;
use crate::paint::{Color, Paint};
use crate::scene::{ArcCmd, Canvas, Stroke};

use super::{ArcGeometry, ArcStyle, SweepState};

/// Flat color used when neither a gradient nor a color is configured.
pub const DEFAULT_ARC_COLOR: Color = Color::RED;

/// Paints a stroked arc onto any [`Canvas`].
///
/// Stateless apart from the fallback color; geometry and paint are resolved
/// by the caller once per resize and passed in by reference every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcRenderer {
    default_color: Color,
}

impl ArcRenderer {
    pub const fn new() -> Self {
        Self { default_color: DEFAULT_ARC_COLOR }
    }

    /// Overrides the color used when `paint` is `None`.
    pub const fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    /// Strokes the arc at `origin` (widget top-left in canvas space).
    ///
    /// The draw is bracketed by `save` / `restore`; the translation to
    /// `origin` never outlives this call. Degenerate geometry or an empty
    /// sweep draws nothing. Returns whether anything was drawn.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        origin: Vec2,
        geometry: &ArcGeometry,
        style: &ArcStyle,
        paint: Option<&Paint>,
        sweep: &SweepState,
    ) -> bool {
        if geometry.is_degenerate() || style.stroke_width <= 0.0 {
            return false;
        }
        if sweep.current == 0.0 || !sweep.current.is_finite() {
            return false;
        }

        // Gradient stops are reference-counted; cloning the paint shares them.
        let paint = paint.cloned().unwrap_or(Paint::Solid(self.default_color));
        let cmd = ArcCmd::new(
            geometry.center(),
            geometry.radius(),
            style.start_angle,
            sweep.current.clamp(-360.0, 360.0),
            Stroke::new(style.stroke_width, style.cap),
            paint,
        );

        canvas.save();
        canvas.translate(origin);
        canvas.stroke_arc(cmd);
        canvas.restore();

        true
    }
}

impl Default for ArcRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::arc::{resolve, LineCap};
    use crate::paint::GradientSpec;
    use crate::scene::DrawList;

    /// Records call order so bracketing can be asserted.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<&'static str>,
        depth: i32,
    }

    impl Canvas for CallLog {
        fn save(&mut self) {
            self.depth += 1;
            self.calls.push("save");
        }
        fn restore(&mut self) {
            self.depth -= 1;
            self.calls.push("restore");
        }
        fn translate(&mut self, _offset: Vec2) {
            self.calls.push("translate");
        }
        fn stroke_arc(&mut self, _arc: ArcCmd) {
            self.calls.push("stroke_arc");
        }
    }

    fn sweep(current: f32) -> SweepState {
        SweepState::new(current, 270.0)
    }

    #[test]
    fn draw_is_bracketed_by_save_restore() {
        let mut log = CallLog::default();
        let g = resolve(300.0, 300.0, 40.0);
        let drawn = ArcRenderer::new().render(&mut log, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(270.0));

        assert!(drawn);
        assert_eq!(log.calls, ["save", "translate", "stroke_arc", "restore"]);
        assert_eq!(log.depth, 0);
    }

    #[test]
    fn origin_does_not_leak_to_later_draws() {
        let mut list = DrawList::new();
        let g = resolve(300.0, 300.0, 40.0);
        ArcRenderer::new().render(&mut list, Vec2::new(50.0, 25.0), &g, &ArcStyle::default(), None, &sweep(90.0));

        assert_eq!(list.offset(), Vec2::zero());
        assert_eq!(list.save_depth(), 0);
        assert_eq!(list.arcs().next().unwrap().center, Vec2::new(200.0, 175.0));
    }

    #[test]
    fn arc_command_matches_style_and_sweep() {
        let mut list = DrawList::new();
        let g = resolve(300.0, 300.0, 40.0);
        ArcRenderer::new().render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(200.0));

        let arc = list.arcs().next().unwrap();
        assert_eq!(arc.center, Vec2::new(150.0, 150.0));
        assert_eq!(arc.radius, 130.0);
        assert_eq!(arc.start_angle, 135.0);
        assert_eq!(arc.sweep_angle, 200.0);
        assert_eq!(arc.stroke, Stroke::new(40.0, LineCap::Round));
    }

    #[test]
    fn missing_paint_uses_default_color() {
        let mut list = DrawList::new();
        let g = resolve(100.0, 100.0, 10.0);
        ArcRenderer::new().render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(10.0));
        assert_eq!(list.arcs().next().unwrap().paint, Paint::Solid(DEFAULT_ARC_COLOR));

        list.clear();
        let blue = ArcRenderer::new().with_default_color(Color::BLUE);
        blue.render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(10.0));
        assert_eq!(list.arcs().next().unwrap().paint, Paint::Solid(Color::BLUE));
    }

    #[test]
    fn gradient_paint_is_passed_through() {
        let mut list = DrawList::new();
        let g = resolve(300.0, 300.0, 40.0);
        let paint = Paint::LinearGradient(GradientSpec::default_ramp().build(&g));
        ArcRenderer::new().render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), Some(&paint), &sweep(10.0));
        assert_eq!(list.arcs().next().unwrap().paint, paint);
    }

    #[test]
    fn repaints_share_gradient_stops() {
        let mut list = DrawList::new();
        let g = resolve(300.0, 300.0, 40.0);
        let paint = Paint::LinearGradient(GradientSpec::default_ramp().build(&g));
        let renderer = ArcRenderer::new();
        for _ in 0..3 {
            renderer.render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), Some(&paint), &sweep(10.0));
        }

        let Paint::LinearGradient(source) = &paint else { unreachable!() };
        assert_eq!(list.arcs().count(), 3);
        for arc in list.arcs() {
            let Paint::LinearGradient(recorded) = &arc.paint else { panic!("expected gradient") };
            assert!(Arc::ptr_eq(&recorded.stops, &source.stops));
        }
    }

    #[test]
    fn degenerate_geometry_draws_nothing() {
        let mut log = CallLog::default();
        let g = resolve(0.0, 0.0, 40.0);
        let drawn = ArcRenderer::new().render(&mut log, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(270.0));
        assert!(!drawn);
        assert!(log.calls.is_empty());
    }

    #[test]
    fn zero_sweep_draws_nothing() {
        let mut list = DrawList::new();
        let g = resolve(300.0, 300.0, 40.0);
        assert!(!ArcRenderer::new().render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(0.0)));
        assert!(list.is_empty());
    }

    #[test]
    fn oversized_sweep_clamps_to_full_turn() {
        let mut list = DrawList::new();
        let g = resolve(300.0, 300.0, 40.0);
        ArcRenderer::new().render(&mut list, Vec2::zero(), &g, &ArcStyle::default(), None, &sweep(725.0));
        assert_eq!(list.arcs().next().unwrap().sweep_angle, 360.0);
    }
}
