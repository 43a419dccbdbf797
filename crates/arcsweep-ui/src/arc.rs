use std::time::Instant;

use arcsweep_engine::anim::{SweepAnimator, SweepTick};
use arcsweep_engine::arc::{ArcGeometry, ArcRenderer, ArcStyle, SweepState};
use arcsweep_engine::coords::{Vec2, Viewport};
use arcsweep_engine::paint::{Color, GradientSpec, LinearGradient, Paint};
use arcsweep_engine::scene::Canvas;

use crate::config::{gradient_from_parts, ArcConfig};
use crate::policy::{AnimationOrigin, AnimationPolicy};

/// Animation state of an [`ArcWidget`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArcState {
    /// No run in flight; the sweep only changes through setters.
    Idle,
    /// A run is advancing the sweep on every `tick`.
    Animating,
}

/// A stroked arc whose sweep can animate towards a destination angle.
///
/// The host drives it with three calls: [`on_viewport_resized`] whenever the
/// measured size changes, [`tick`] once per frame with the frame timestamp,
/// and [`paint`] when [`take_repaint_request`] says something changed.
///
/// # Example
/// ```rust,ignore
/// let mut arc = ArcWidget::new()
///     .gradient(GradientSpec::from_parts(&[Color::RED, Color::BLUE], &[0.0, 1.0])?)
///     .policy(AnimationPolicy::auto(AnimationSpec::SLOW))
///     .on_animation_end(|angle| log::info!("arc settled at {angle}°"));
///
/// arc.on_viewport_resized(Viewport::new(300.0, 300.0), Instant::now());
/// ```
///
/// [`on_viewport_resized`]: Self::on_viewport_resized
/// [`tick`]: Self::tick
/// [`paint`]: Self::paint
/// [`take_repaint_request`]: Self::take_repaint_request
pub struct ArcWidget {
    style: ArcStyle,
    sweep: SweepState,

    viewport: Viewport,
    geometry: ArcGeometry,
    layout_ready: bool,

    color: Option<Color>,
    gradient_colors: Option<Vec<Color>>,
    gradient_positions: Option<Vec<f32>>,
    /// Built from the stops and the geometry; only rebuilt when either changes.
    gradient: Option<Paint>,
    gradient_builds: u64,

    policy: AnimationPolicy,
    animator: SweepAnimator,
    state: ArcState,

    renderer: ArcRenderer,
    repaint: bool,

    /// Called with every applied sweep value, including the final one.
    on_sweep_change: Option<Box<dyn FnMut(f32)>>,
    /// Called once per completed run, after its final sweep value.
    on_animation_end: Option<Box<dyn FnMut(f32)>>,
}

impl ArcWidget {
    pub fn new() -> Self {
        Self {
            style: ArcStyle::default(),
            sweep: SweepState::default(),
            viewport: Viewport::default(),
            geometry: ArcGeometry::default(),
            layout_ready: false,
            color: None,
            gradient_colors: None,
            gradient_positions: None,
            gradient: None,
            gradient_builds: 0,
            policy: AnimationPolicy::STATIC,
            animator: SweepAnimator::new(),
            state: ArcState::Idle,
            renderer: ArcRenderer::new(),
            repaint: true,
            on_sweep_change: None,
            on_animation_end: None,
        }
    }

    /// Widget configured from parsed attributes.
    pub fn from_config(config: &ArcConfig) -> Self {
        let mut widget = Self::new()
            .style(config.style())
            .initial_sweep(config.sweep_angle)
            .destination(config.destination_sweep_angle)
            .policy(config.policy());
        widget.color = config.arc_color;
        widget.gradient_colors = config.gradient_colors.clone();
        widget.gradient_positions = config.gradient_positions.clone();
        widget
    }

    // ── builders ──────────────────────────────────────────────────────────

    pub fn style(mut self, style: ArcStyle) -> Self { self.style = style; self }
    pub fn initial_sweep(mut self, v: f32) -> Self { self.sweep.current = v; self }
    pub fn destination(mut self, v: f32) -> Self { self.sweep.destination = v; self }
    pub fn color(mut self, v: Color) -> Self { self.color = Some(v); self }
    pub fn policy(mut self, v: AnimationPolicy) -> Self { self.policy = v; self }

    pub fn gradient(mut self, spec: GradientSpec) -> Self {
        let (colors, positions) = spec.stops().iter().map(|s| (s.color, s.position)).unzip();
        self.gradient_colors = Some(colors);
        self.gradient_positions = Some(positions);
        self
    }

    pub fn on_sweep_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_sweep_change = Some(Box::new(f));
        self
    }

    pub fn on_animation_end(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_animation_end = Some(Box::new(f));
        self
    }

    // ── sweep control ─────────────────────────────────────────────────────

    /// Sets the drawn sweep directly. Legal while animating; the next tick
    /// overrides it.
    pub fn set_sweep_angle(&mut self, angle: f32) {
        self.sweep.current = angle;
        self.repaint = true;
    }

    #[inline]
    pub fn sweep_angle(&self) -> f32 {
        self.sweep.current
    }

    /// Target of the next run. Does not repaint or animate.
    pub fn set_destination_sweep_angle(&mut self, angle: f32) {
        self.sweep.destination = angle;
    }

    #[inline]
    pub fn destination_sweep_angle(&self) -> f32 {
        self.sweep.destination
    }

    /// Starts a run towards the destination, replacing any run in flight.
    ///
    /// Returns `false` without side effects when the policy disables
    /// animation.
    pub fn start_animation(&mut self, now: Instant) -> bool {
        if !self.policy.enabled {
            log::info!("arc animation requested but disabled by configuration");
            return false;
        }

        let from = match self.policy.origin {
            AnimationOrigin::Zero => 0.0,
            AnimationOrigin::Current => self.sweep.current,
        };
        self.animator.start(from, self.sweep.destination, self.policy.spec, now);
        self.state = ArcState::Animating;

        self.sweep.current = from;
        self.repaint = true;
        true
    }

    /// Stops the run in flight, leaving the sweep where it is.
    pub fn cancel_animation(&mut self) -> bool {
        let cancelled = self.animator.cancel();
        if cancelled {
            log::debug!("arc animation cancelled at {}°", self.sweep.current);
        }
        self.state = ArcState::Idle;
        cancelled
    }

    /// Advances the run in flight to `now`.
    ///
    /// Returns whether a repaint is pending.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(tick) = self.animator.poll(now) {
            self.apply_tick(tick);
        }
        self.repaint
    }

    /// Applies a tick if it belongs to the current run.
    ///
    /// Ticks from a replaced or cancelled run, and repeats after the run has
    /// finished, are dropped.
    pub fn apply_tick(&mut self, tick: SweepTick) -> bool {
        if self.state != ArcState::Animating || !self.animator.is_current(tick.token) {
            log::trace!("dropping stale sweep tick (run {})", tick.token.generation());
            return false;
        }

        self.sweep.current = tick.angle;
        self.repaint = true;
        if let Some(f) = &mut self.on_sweep_change { f(tick.angle); }

        if tick.is_final() {
            self.state = ArcState::Idle;
            log::debug!("arc animation finished at {}°", tick.angle);
            if let Some(f) = &mut self.on_animation_end { f(tick.angle); }
        }
        true
    }

    // ── layout ────────────────────────────────────────────────────────────

    /// Recomputes geometry and the gradient for a new measured size.
    ///
    /// The first valid size also fires the one-shot layout signal, which
    /// starts a run when the policy autoplays.
    pub fn on_viewport_resized(&mut self, viewport: Viewport, now: Instant) {
        if viewport == self.viewport && self.layout_ready {
            return;
        }
        self.viewport = viewport;
        self.relayout();

        if !self.layout_ready && viewport.is_valid() {
            self.layout_ready = true;
            log::debug!("arc layout ready at {}x{}", viewport.width, viewport.height);
            if self.policy.autoplays() {
                self.start_animation(now);
            }
        }
    }

    /// True once a valid size has been seen.
    #[inline]
    pub fn is_layout_ready(&self) -> bool {
        self.layout_ready
    }

    // ── style ─────────────────────────────────────────────────────────────

    pub fn set_stroke_width(&mut self, width: f32) {
        self.style.stroke_width = width;
        self.relayout();
    }

    pub fn set_start_angle(&mut self, angle: f32) {
        self.style.start_angle = angle;
        self.repaint = true;
    }

    /// Flat color, used when no gradient is configured.
    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
        self.repaint = true;
    }

    /// Replaces the gradient colors. Positions default to `[0, 1]` if never set.
    pub fn set_colors(&mut self, colors: &[Color]) {
        self.gradient_colors = Some(colors.to_vec());
        self.rebuild_gradient();
    }

    /// Replaces the gradient stop positions. Colors default to two black
    /// stops if never set.
    pub fn set_positions(&mut self, positions: &[f32]) {
        self.gradient_positions = Some(positions.to_vec());
        self.rebuild_gradient();
    }

    // ── painting ──────────────────────────────────────────────────────────

    /// Strokes the arc with its top-left corner at `origin`.
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C, origin: Vec2) -> bool {
        let solid = self.color.map(Paint::Solid);
        let paint = self.gradient.as_ref().or(solid.as_ref());
        self.renderer.render(canvas, origin, &self.geometry, &self.style, paint, &self.sweep)
    }

    /// Returns and clears the pending repaint flag.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint)
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> ArcState {
        self.state
    }

    #[inline]
    pub fn geometry(&self) -> &ArcGeometry {
        &self.geometry
    }

    /// The cached gradient, if one is configured.
    pub fn gradient_paint(&self) -> Option<&LinearGradient> {
        match &self.gradient {
            Some(Paint::LinearGradient(g)) => Some(g),
            _ => None,
        }
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn relayout(&mut self) {
        self.geometry = ArcGeometry::for_viewport(self.viewport, self.style.stroke_width);
        self.rebuild_gradient();
    }

    fn rebuild_gradient(&mut self) {
        self.repaint = true;

        let Some(spec) = gradient_from_parts(
            self.gradient_colors.as_deref(),
            self.gradient_positions.as_deref(),
        ) else {
            self.gradient = None;
            return;
        };

        self.gradient = Some(Paint::LinearGradient(spec.build(&self.geometry)));
        self.gradient_builds += 1;
        log::trace!("arc gradient rebuilt ({} builds)", self.gradient_builds);
    }
}

impl Default for ArcWidget { fn default() -> Self { Self::new() } }
