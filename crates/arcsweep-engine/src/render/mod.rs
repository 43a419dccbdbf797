//! GPU rendering subsystem.
//!
//! Pipelines consume `scene` draw streams and issue GPU commands via wgpu.
//! Each pipeline owns its GPU resources (shader, buffers, bind groups) and
//! creates them lazily on first use.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shader converts to NDC using a viewport uniform.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use shapes::arc::ArcPipeline;
