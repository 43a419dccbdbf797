//! Arcsweep UI: the animated arc widget on top of `arcsweep-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use arcsweep_ui::prelude::*;
//!
//! let (config, failures) = ArcConfig::parse_block("useAnimation = true\nautoAnimation = true");
//! let mut arc = ArcWidget::from_config(&config);
//!
//! // On every size change:
//! arc.on_viewport_resized(viewport, now);
//!
//! // Once per frame:
//! if arc.tick(now) && arc.take_repaint_request() {
//!     draw_list.clear();
//!     arc.paint(&mut draw_list, Vec2::zero());
//! }
//! ```

pub mod arc;
pub mod config;
pub mod policy;

pub use arc::{ArcState, ArcWidget};
pub use config::{ArcConfig, ConfigParseFailure};
pub use policy::{AnimationOrigin, AnimationPolicy, AnimationTrigger};

/// Everything a host needs to configure, drive and paint an arc.
pub mod prelude {
    pub use crate::arc::{ArcState, ArcWidget};
    pub use crate::config::{ArcConfig, ConfigParseFailure};
    pub use crate::policy::{AnimationOrigin, AnimationPolicy, AnimationTrigger};

    // Re-export the engine primitives everyone needs.
    pub use arcsweep_engine::anim::{AnimationSpec, Easing};
    pub use arcsweep_engine::arc::{ArcStyle, LineCap};
    pub use arcsweep_engine::coords::{Vec2, Viewport};
    pub use arcsweep_engine::paint::{Color, GradientSpec, Paint};
    pub use arcsweep_engine::scene::{Canvas, DrawList};
}
