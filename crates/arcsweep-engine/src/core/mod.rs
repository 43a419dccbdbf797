//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! higher layers. Apps see logical-pixel host events and a per-frame context;
//! winit types stay behind the runtime.

mod app;
mod ctx;

pub use app::{App, AppControl, HostEvent, HostKey};
pub use ctx::FrameCtx;
pub(crate) use ctx::logical_viewport;
