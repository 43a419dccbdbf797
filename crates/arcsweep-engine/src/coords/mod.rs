//! Coordinate types shared by the arc engine and the UI layer.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Angles follow the surface convention: 0° points to 3 o'clock and positive
//! angles turn clockwise (because +Y is down).

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
