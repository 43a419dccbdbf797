//! Frame timing.
//!
//! One [`FrameClock`] per window; `tick()` once per presented frame. The
//! resulting [`FrameTime::now`] is the timestamp animations are polled with.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
