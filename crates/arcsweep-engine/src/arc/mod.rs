//! Arc model: geometry resolution, stroke style, sweep state and the
//! surface-agnostic renderer.
//!
//! The renderer only talks to [`Canvas`](crate::scene::Canvas); recording into
//! a [`DrawList`](crate::scene::DrawList) and replaying it on the GPU are
//! separate steps.

mod geometry;
mod renderer;
mod style;

pub use geometry::{resolve, ArcGeometry};
pub use renderer::{ArcRenderer, DEFAULT_ARC_COLOR};
pub use style::{ArcStyle, LineCap, SweepState};
