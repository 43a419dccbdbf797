use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{logical_viewport, App as CoreApp, AppControl, FrameCtx, HostEvent, HostKey};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "arcsweep".to_string(),
            initial_size: LogicalSize::new(480.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    pointer: Option<PhysicalPosition<f64>>,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self { config, gpu_init, app, entry: None, fatal: None }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::new(),
            pointer: None,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let viewport = entry.with_window(|w| logical_viewport(w));
        log::info!("window created ({}x{} logical)", viewport.width, viewport.height);

        self.entry = Some(entry);
        self.dispatch(event_loop, HostEvent::Resized(viewport));
        Ok(())
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: HostEvent) {
        if self.app.on_event(event) == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.entry = None;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };
        let app = &mut self.app;

        let control = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx { window: fields.window, gpu: fields.gpu, time };
            app.on_frame(&mut ctx)
        });

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.fatal = Some(e);
            event_loop.exit();
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        if !self.app.wants_redraw() {
            return;
        }
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.entry.is_none() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.dispatch(event_loop, HostEvent::CloseRequested);
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                let viewport = self.entry.as_mut().map(|entry| {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| logical_viewport(w))
                });
                if let Some(viewport) = viewport {
                    self.dispatch(event_loop, HostEvent::Resized(viewport));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let viewport = self.entry.as_mut().map(|entry| {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| logical_viewport(w))
                });
                if let Some(viewport) = viewport {
                    self.dispatch(event_loop, HostEvent::Resized(viewport));
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_pointer_mut(|p| *p = Some(position));
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_pointer_mut(|p| *p = None);
                }
            }

            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                let click = self.entry.as_ref().and_then(|entry| {
                    let scale = entry.with_window(|w| w.scale_factor());
                    entry.with_pointer(|p| {
                        p.map(|pos| {
                            let logical = pos.to_logical::<f64>(scale);
                            HostEvent::Click { x: logical.x as f32, y: logical.y as f32 }
                        })
                    })
                });
                if let Some(click) = click {
                    self.dispatch(event_loop, click);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let Some(key) = map_key(event.physical_key) {
                    self.dispatch(event_loop, HostEvent::KeyPressed(key));
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn map_key(pk: PhysicalKey) -> Option<HostKey> {
    match pk {
        PhysicalKey::Code(KeyCode::Space) => Some(HostKey::Space),
        PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Some(HostKey::Enter),
        PhysicalKey::Code(KeyCode::Escape) => Some(HostKey::Escape),
        _ => None,
    }
}
