//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - define the [`Canvas`] surface contract renderers draw through
//! - record renderer-agnostic draw commands in insertion order
//! - keep shape-specific payloads isolated per shape file under `scene::shapes`

mod canvas;
mod cmd;
mod list;

pub mod shapes;

pub use canvas::Canvas;
pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use shapes::{ArcCmd, Stroke};
