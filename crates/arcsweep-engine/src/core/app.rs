use crate::coords::Viewport;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Keys the host forwards to the app. Everything else is dropped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostKey {
    Space,
    Enter,
    Escape,
}

/// Host events, already translated to logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostEvent {
    /// Drawable area changed. Also sent once when the window first appears.
    Resized(Viewport),
    /// Primary button pressed at a logical position.
    Click { x: f32, y: f32 },
    KeyPressed(HostKey),
    CloseRequested,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for translated host events.
    fn on_event(&mut self, event: HostEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Polled while the loop is idle. Returning `false` lets the window sleep
    /// until the next host event.
    fn wants_redraw(&self) -> bool {
        true
    }
}
