use std::time::Instant;

use anyhow::{Context, Result};

use arcsweep_engine::core::{App, AppControl, FrameCtx, HostEvent, HostKey};
use arcsweep_engine::device::GpuInit;
use arcsweep_engine::logging::{init_logging, LoggingConfig};
use arcsweep_engine::render::ArcPipeline;
use arcsweep_engine::window::{Runtime, RuntimeConfig};
use arcsweep_ui::prelude::*;

/// Used when no config file is given: the gradient arc sweeping in on launch.
const DEMO_CONFIG: &str = "\
# arcsweep studio demo
startAngle = 135
sweepAngle = 0
destinationSweepAngle = 270
strokeWidthPx = 40px
useAnimation = true
autoAnimation = true
gradientColors = #FFFF0000, #FFFFC107, #FF0000FF
gradientColorPositions = 0, 0.5, 1
animationEasing = decelerate
";

const BACKGROUND: Color = Color::from_premul(0.08, 0.08, 0.1, 1.0);

struct StudioApp {
    arc: ArcWidget,
    draw_list: DrawList,
    pipeline: ArcPipeline,
    viewport: Viewport,
    /// A host event arrived since the last presented frame.
    dirty: bool,
}

impl StudioApp {
    fn new(arc: ArcWidget) -> Self {
        Self {
            arc,
            draw_list: DrawList::new(),
            pipeline: ArcPipeline::new(),
            viewport: Viewport::default(),
            dirty: true,
        }
    }

    /// Centers the arc's square in the window.
    fn arc_origin(&self) -> Vec2 {
        let side = self.viewport.min_side();
        Vec2::new((self.viewport.width - side) * 0.5, (self.viewport.height - side) * 0.5)
    }

    fn start(&mut self) {
        if self.arc.start_animation(Instant::now()) {
            log::info!("sweeping to {}°", self.arc.destination_sweep_angle());
        }
        self.dirty = true;
    }
}

impl App for StudioApp {
    fn on_event(&mut self, event: HostEvent) -> AppControl {
        match event {
            HostEvent::Resized(viewport) => {
                self.viewport = viewport;
                self.arc.on_viewport_resized(viewport, Instant::now());
                self.dirty = true;
            }
            HostEvent::Click { .. } => self.start(),
            HostEvent::KeyPressed(HostKey::Space | HostKey::Enter) => self.start(),
            HostEvent::KeyPressed(HostKey::Escape) | HostEvent::CloseRequested => {
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.arc.tick(ctx.time.now);

        if self.arc.take_repaint_request() {
            self.draw_list.clear();
            let origin = self.arc_origin();
            self.arc.paint(&mut self.draw_list, origin);
        }

        let (draw_list, pipeline) = (&self.draw_list, &mut self.pipeline);
        let control = ctx.render(BACKGROUND, |rctx, target| {
            pipeline.render(rctx, target, draw_list);
        });

        self.dirty = false;
        control
    }

    fn wants_redraw(&self) -> bool {
        self.dirty || self.arc.state() == ArcState::Animating
    }
}

fn load_config() -> Result<ArcConfig> {
    let (source, text) = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read arc config `{path}`"))?;
            (path, text)
        }
        None => ("built-in demo".to_string(), DEMO_CONFIG.to_string()),
    };

    let (config, failures) = ArcConfig::parse_block(&text);
    if failures.is_empty() {
        log::info!("loaded arc config from {source}");
    } else {
        log::warn!("loaded arc config from {source} with {} fallback(s)", failures.len());
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = load_config()?;
    let arc = ArcWidget::from_config(&config)
        .on_animation_end(|angle| log::info!("arc settled at {angle}°"));

    log::info!("click or press Space to replay the sweep; Esc quits");

    Runtime::run(
        RuntimeConfig { title: "arcsweep studio".to_string(), ..RuntimeConfig::default() },
        // Gradient stops are display-space values; keep them out of sRGB encoding.
        GpuInit { prefer_srgb: false, ..GpuInit::default() },
        StudioApp::new(arc),
    )
}
