//! Arcsweep engine crate.
//!
//! Arc geometry, gradient paint, sweep animation and the recording canvas,
//! plus the platform and GPU runtime pieces used by higher layers.

pub mod anim;
pub mod arc;
pub mod coords;
pub mod paint;
pub mod scene;

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
