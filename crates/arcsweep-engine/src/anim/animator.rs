use std::time::{Duration, Instant};

use super::Easing;

/// Duration + easing pair driving one run.
#[derive(Debug, Copy, Clone)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSpec {
    /// Quick sweep used for explicitly triggered runs.
    pub const FAST: AnimationSpec = AnimationSpec::new(Duration::from_millis(500), Easing::Decelerate);

    /// Slower sweep used when playing automatically on first layout.
    pub const SLOW: AnimationSpec = AnimationSpec::new(Duration::from_millis(1000), Easing::Decelerate);

    #[inline]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::FAST
    }
}

/// Run generation token. Strictly increasing per animator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RunToken(u64);

impl RunToken {
    #[inline]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickPhase {
    /// More ticks follow.
    Running,
    /// Last tick of the run; carries exactly the destination angle.
    Final,
}

/// One sampled animation value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepTick {
    pub token: RunToken,
    pub angle: f32,
    /// Normalized elapsed time in `[0, 1]`, before easing.
    pub progress: f32,
    pub phase: TickPhase,
}

impl SweepTick {
    #[inline]
    pub fn is_final(&self) -> bool {
        self.phase == TickPhase::Final
    }
}

/// A single in-flight animation.
#[derive(Debug, Copy, Clone)]
pub struct AnimationRun {
    pub token: RunToken,
    pub from: f32,
    pub to: f32,
    pub spec: AnimationSpec,
    pub started_at: Instant,
    /// Latest elapsed time handed out; keeps ticks non-decreasing.
    last_elapsed: Duration,
}

impl AnimationRun {
    fn new(token: RunToken, from: f32, to: f32, spec: AnimationSpec, started_at: Instant) -> Self {
        Self { token, from, to, spec, started_at, last_elapsed: Duration::ZERO }
    }

    /// Samples the run at `now`.
    fn sample(&mut self, now: Instant) -> SweepTick {
        let elapsed = now.saturating_duration_since(self.started_at).max(self.last_elapsed);
        self.last_elapsed = elapsed;

        let t = if self.spec.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.spec.duration.as_secs_f64()).clamp(0.0, 1.0) as f32
        };

        if t >= 1.0 {
            return SweepTick { token: self.token, angle: self.to, progress: 1.0, phase: TickPhase::Final };
        }

        let eased = self.spec.easing.apply(t);
        SweepTick {
            token: self.token,
            angle: self.from + (self.to - self.from) * eased,
            progress: t,
            phase: TickPhase::Running,
        }
    }
}

/// Drives a sweep angle from a start value to a destination over time.
///
/// At most one run is active. [`start`](Self::start) replaces any run in
/// flight and bumps the generation, so ticks from the replaced run are stale.
#[derive(Debug, Default)]
pub struct SweepAnimator {
    run: Option<AnimationRun>,
    generation: u64,
}

impl SweepAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a run from `from` to `to`, cancelling the previous one.
    pub fn start(&mut self, from: f32, to: f32, spec: AnimationSpec, now: Instant) -> RunToken {
        self.generation += 1;
        let token = RunToken(self.generation);

        if let Some(old) = self.run.replace(AnimationRun::new(token, from, to, spec, now)) {
            log::debug!("sweep run {} replaced by {}", old.token.0, token.0);
        }
        log::debug!(
            "sweep run {} started: {from}° → {to}° over {:?} ({:?})",
            token.0,
            spec.duration,
            spec.easing
        );

        token
    }

    /// Drops the active run. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        let had_run = self.run.take().is_some();
        if had_run {
            // Invalidate ticks already handed out for the cancelled run.
            self.generation += 1;
        }
        had_run
    }

    /// Samples the active run at `now`.
    ///
    /// Returns `None` when idle. The tick that reaches the end of the run is
    /// [`TickPhase::Final`] and clears the run.
    pub fn poll(&mut self, now: Instant) -> Option<SweepTick> {
        let run = self.run.as_mut()?;
        let tick = run.sample(now);
        if tick.is_final() {
            self.run = None;
            log::debug!("sweep run {} finished at {}°", tick.token.0, tick.angle);
        }
        Some(tick)
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    #[inline]
    pub fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    /// Token of the active run, if any.
    #[inline]
    pub fn current_token(&self) -> Option<RunToken> {
        self.run.map(|r| r.token)
    }

    /// True if `token` belongs to the most recently started run and that run
    /// has not been cancelled or replaced.
    ///
    /// The final tick of a run stays current until another run starts.
    #[inline]
    pub fn is_current(&self, token: RunToken) -> bool {
        token.0 == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    /// Polls every 16ms until the run finishes, collecting all ticks.
    fn drain(animator: &mut SweepAnimator, t0: Instant) -> Vec<SweepTick> {
        let mut ticks = Vec::new();
        let mut at = 0;
        while let Some(tick) = animator.poll(t0 + ms(at)) {
            ticks.push(tick);
            at += 16;
            assert!(at < 10_000, "run never finished");
        }
        ticks
    }

    #[test]
    fn zero_to_270_decelerate_scenario() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(0.0, 270.0, AnimationSpec::FAST, t0);

        let ticks = drain(&mut a, t0);
        let last = ticks.last().unwrap();
        assert_eq!(last.angle, 270.0);
        assert!(last.is_final());
        assert_eq!(ticks.iter().filter(|t| t.is_final()).count(), 1);

        assert!(!a.is_running());
        assert_eq!(a.poll(t0 + ms(2_000)), None);
    }

    #[test]
    fn decelerate_midpoint_value() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(0.0, 270.0, AnimationSpec::FAST, t0);
        let tick = a.poll(t0 + ms(250)).unwrap();
        assert!((tick.angle - 202.5).abs() < 1e-3);
        assert_eq!(tick.phase, TickPhase::Running);
    }

    #[test]
    fn monotonic_easings_give_monotonic_ticks() {
        let easings = [Easing::Linear, Easing::Accelerate, Easing::Decelerate, Easing::AccelerateDecelerate];
        for easing in easings {
            for &(from, to) in &[(0.0f32, 270.0f32), (300.0, 45.0)] {
                let mut a = SweepAnimator::new();
                let t0 = Instant::now();
                a.start(from, to, AnimationSpec::new(ms(300), easing), t0);

                let ticks = drain(&mut a, t0);
                let (lo, hi) = (from.min(to), from.max(to));
                for pair in ticks.windows(2) {
                    let step = pair[1].angle - pair[0].angle;
                    assert!(step * (to - from).signum() >= -1e-4, "{easing:?} {from}->{to}");
                }
                assert!(ticks.iter().all(|t| t.angle >= lo - 1e-4 && t.angle <= hi + 1e-4));
                assert_eq!(ticks.last().unwrap().angle, to);
            }
        }
    }

    #[test]
    fn overshoot_ends_exactly_on_target() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(0.0, 100.0, AnimationSpec::new(ms(400), Easing::OVERSHOOT), t0);
        let ticks = drain(&mut a, t0);
        assert!(ticks.iter().any(|t| t.angle > 100.0));
        assert_eq!(ticks.last().unwrap().angle, 100.0);
    }

    #[test]
    fn restart_makes_old_ticks_stale() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        let first = a.start(0.0, 270.0, AnimationSpec::FAST, t0);
        let old_tick = a.poll(t0 + ms(100)).unwrap();
        assert!(a.is_current(old_tick.token));

        let second = a.start(0.0, 90.0, AnimationSpec::FAST, t0 + ms(120));
        assert!(second > first);
        assert!(!a.is_current(old_tick.token));
        assert!(a.is_current(second));

        for tick in drain(&mut a, t0 + ms(120)) {
            assert_eq!(tick.token, second);
        }
    }

    #[test]
    fn rapid_double_start_leaves_one_run() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(0.0, 270.0, AnimationSpec::FAST, t0);
        let token = a.start(0.0, 270.0, AnimationSpec::FAST, t0);
        assert_eq!(a.current_token(), Some(token));
        assert_eq!(token.generation(), 2);

        let ticks = drain(&mut a, t0);
        assert!(ticks.iter().all(|t| t.token == token));
    }

    #[test]
    fn cancel_invalidates_pending_ticks() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(0.0, 270.0, AnimationSpec::FAST, t0);
        let tick = a.poll(t0 + ms(50)).unwrap();

        assert!(a.cancel());
        assert!(!a.is_current(tick.token));
        assert!(!a.cancel());
        assert_eq!(a.poll(t0 + ms(60)), None);
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(10.0, 20.0, AnimationSpec::new(Duration::ZERO, Easing::Linear), t0);
        let tick = a.poll(t0).unwrap();
        assert!(tick.is_final());
        assert_eq!(tick.angle, 20.0);
    }

    #[test]
    fn elapsed_never_goes_backwards() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(0.0, 100.0, AnimationSpec::new(ms(1000), Easing::Linear), t0);
        let later = a.poll(t0 + ms(600)).unwrap();
        let earlier = a.poll(t0 + ms(200)).unwrap();
        assert_eq!(earlier.angle, later.angle);
    }

    #[test]
    fn poll_before_start_yields_from() {
        let mut a = SweepAnimator::new();
        let t0 = Instant::now();
        a.start(30.0, 100.0, AnimationSpec::SLOW, t0 + ms(100));
        let tick = a.poll(t0).unwrap();
        assert_eq!(tick.angle, 30.0);
        assert_eq!(tick.progress, 0.0);
    }

    #[test]
    fn presets_carry_expected_durations() {
        assert_eq!(AnimationSpec::FAST.duration, ms(500));
        assert_eq!(AnimationSpec::SLOW.duration, ms(1000));
        assert_eq!(AnimationSpec::SLOW.easing.name(), Some("decelerate"));
    }
}
