//! Sweep animation.
//!
//! Poll-driven and single-threaded: the host calls
//! [`SweepAnimator::poll`] with the frame timestamp and applies the returned
//! [`SweepTick`]. Waiting for the next tick is simply the next frame.
//!
//! Every run carries a [`RunToken`]; starting a new run makes all earlier
//! tokens stale, so ticks that were produced but not yet applied can be
//! rejected with [`SweepAnimator::is_current`].

mod animator;
mod easing;

pub use animator::{AnimationRun, AnimationSpec, RunToken, SweepAnimator, SweepTick, TickPhase};
pub use easing::{Easing, UnknownEasing};
