use crate::coords::Vec2;

use super::shapes::ArcCmd;

/// Drawing surface contract.
///
/// Mirrors the usual immediate-mode canvas: a stack of saved transform states
/// plus stroke operations that are affected by the current transform.
/// `save` / `restore` calls must be balanced by the caller.
pub trait Canvas {
    /// Pushes the current transform state.
    fn save(&mut self);

    /// Pops back to the most recently saved transform state.
    fn restore(&mut self);

    /// Offsets subsequent drawing by `offset` logical pixels.
    fn translate(&mut self, offset: Vec2);

    /// Strokes an arc in the current coordinate space.
    fn stroke_arc(&mut self, arc: ArcCmd);
}
