use crate::coords::Vec2;

use super::{ArcCmd, Canvas, DrawCmd};

/// A single recorded draw item.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub cmd: DrawCmd,
    /// Transform offset that was active when the item was recorded.
    /// Already baked into `cmd`; kept for inspection.
    pub offset: Vec2,
}

/// Recorded draw stream for a frame.
///
/// `DrawList` is the engine's [`Canvas`]: widgets paint into it, then a GPU
/// pipeline replays the items. Storage is reused across frames via [`clear`].
///
/// # Transform state
///
/// Use [`Canvas::save`] / [`Canvas::restore`] to scope translations:
///
/// ```ignore
/// draw_list.save();
/// draw_list.translate(widget_origin);
/// // ... stroke shapes in widget-local coordinates ...
/// draw_list.restore();
/// ```
///
/// [`clear`]: DrawList::clear
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,

    /// Current translation.
    offset: Vec2,

    /// Saved translations; the top is restored by the next `restore()`.
    saved: Vec<Vec2>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and transform state. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.saved.clear();
        self.offset = Vec2::zero();
    }

    /// Returns items in insertion (paint) order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current translation applied to newly recorded commands.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Number of `save()` calls not yet matched by `restore()`.
    #[inline]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Iterates recorded arcs in paint order.
    pub fn arcs(&self) -> impl Iterator<Item = &ArcCmd> {
        self.items.iter().map(|item| match &item.cmd {
            DrawCmd::Arc(arc) => arc,
        })
    }

    #[inline]
    fn push(&mut self, cmd: DrawCmd) {
        self.items.push(DrawItem { cmd, offset: self.offset });
    }
}

impl Canvas for DrawList {
    #[inline]
    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    /// # Panics
    /// Panics (debug only) if called without a matching `save`.
    #[inline]
    fn restore(&mut self) {
        debug_assert!(!self.saved.is_empty(), "restore called without matching save");
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    #[inline]
    fn translate(&mut self, offset: Vec2) {
        self.offset = self.offset + offset;
    }

    fn stroke_arc(&mut self, arc: ArcCmd) {
        let arc = arc.translated(self.offset);
        self.push(DrawCmd::Arc(arc));
    }
}
