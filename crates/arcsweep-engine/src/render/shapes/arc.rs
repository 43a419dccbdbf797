use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::arc::LineCap;
use crate::paint::{Color, Paint, SpreadMode};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{ArcCmd, DrawCmd, DrawList};

use super::common::{premul_alpha_blend, QuadVertex, ViewportUniform, QUAD_INDICES, QUAD_VERTICES};

/// Gradient stops the shader evaluates directly. Longer ramps are resampled.
const MAX_STOPS: usize = 4;

/// Pipeline for `DrawCmd::Arc`.
///
/// Each arc is one instanced quad covering the ring's bounds; the fragment
/// shader evaluates a signed distance to the stroked arc (round or butt caps)
/// and the horizontal gradient ramp.
#[derive(Default)]
pub struct ArcPipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    warned_long_ramp: bool,
}

impl ArcPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &DrawList) {
        let instances: Vec<ArcInstance> = draw_list
            .items()
            .iter()
            .filter_map(|item| match &item.cmd {
                DrawCmd::Arc(cmd) => ArcInstance::from_cmd(cmd, &mut self.warned_long_ramp),
            })
            .collect();

        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("arcsweep arc pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("arcsweep arc shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/arc.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("arcsweep arc bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<ViewportUniform>() as u64),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("arcsweep arc pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("arcsweep arc pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), ArcInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arcsweep arc viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("arcsweep arc bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("arcsweep arc quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("arcsweep arc quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(16);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arcsweep arc instance vbo"),
            size: (new_cap * std::mem::size_of::<ArcInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (128 bytes):
///
///  offset   0  center     [f32; 2]  loc 1
///  offset   8  radius_hw  [f32; 2]  loc 2  (.x = radius, .y = half stroke width)
///  offset  16  params     [f32; 4]  loc 3  (start rad, sweep rad, round cap, stop count)
///  offset  32  grad_axis  [f32; 4]  loc 4  (start.xy, end.xy)
///  offset  48  stop_pos   [f32; 4]  loc 5
///  offset  64  colors  4× [f32; 4]  loc 6..9 (straight alpha)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ArcInstance {
    center: [f32; 2],
    radius_hw: [f32; 2],
    params: [f32; 4],
    grad_axis: [f32; 4],
    stop_pos: [f32; 4],
    colors: [[f32; 4]; MAX_STOPS],
}

impl ArcInstance {
    const ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_hw
        3 => Float32x4, // params
        4 => Float32x4, // grad_axis
        5 => Float32x4, // stop_pos
        6 => Float32x4, // color0
        7 => Float32x4, // color1
        8 => Float32x4, // color2
        9 => Float32x4  // color3
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ArcInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Packs an arc command. Returns `None` for arcs with nothing to draw.
    fn from_cmd(cmd: &ArcCmd, warned_long_ramp: &mut bool) -> Option<Self> {
        if cmd.radius <= 0.0 || cmd.stroke.width <= 0.0 || cmd.sweep_angle == 0.0 {
            return None;
        }

        // Normalize to a clockwise sweep so the shader only handles one direction.
        let (start, sweep) = if cmd.sweep_angle < 0.0 {
            (cmd.start_angle + cmd.sweep_angle, -cmd.sweep_angle)
        } else {
            (cmd.start_angle, cmd.sweep_angle)
        };

        let mut stop_pos = [0.0f32; MAX_STOPS];
        let mut colors = [[0.0f32; 4]; MAX_STOPS];
        let mut grad_axis = [0.0f32; 4];

        let stop_count = match &cmd.paint {
            Paint::Solid(c) => {
                colors[0] = straight(*c);
                1
            }
            Paint::LinearGradient(g) => {
                if g.spread != SpreadMode::Pad {
                    log::debug!("arc pipeline only pads gradients; {:?} ignored", g.spread);
                }
                grad_axis = [g.start.x, g.start.y, g.end.x, g.end.y];

                if g.stops.len() <= MAX_STOPS {
                    for (i, stop) in g.stops.iter().enumerate() {
                        stop_pos[i] = stop.position.clamp(0.0, 1.0);
                        colors[i] = straight(stop.color);
                    }
                    g.stops.len()
                } else {
                    if !*warned_long_ramp {
                        log::debug!("gradient has {} stops; resampling to {MAX_STOPS}", g.stops.len());
                        *warned_long_ramp = true;
                    }
                    for i in 0..MAX_STOPS {
                        let t = i as f32 / (MAX_STOPS - 1) as f32;
                        stop_pos[i] = t;
                        colors[i] = straight(g.sample_t(t));
                    }
                    MAX_STOPS
                }
            }
        };

        if stop_count == 0 {
            return None;
        }

        let round_cap = match cmd.stroke.cap {
            LineCap::Round => 1.0,
            LineCap::Butt => 0.0,
        };

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_hw: [cmd.radius, cmd.stroke.width * 0.5],
            params: [start.to_radians(), sweep.min(360.0).to_radians(), round_cap, stop_count as f32],
            grad_axis,
            stop_pos,
            colors,
        })
    }
}

#[inline]
fn straight(c: Color) -> [f32; 4] {
    let (r, g, b, a) = c.to_straight();
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::{GradientSpec, GradientStop, LinearGradient};
    use crate::scene::Stroke;

    fn cmd(sweep: f32, paint: Paint) -> ArcCmd {
        ArcCmd::new(Vec2::new(150.0, 150.0), 130.0, 135.0, sweep, Stroke::round(40.0), paint)
    }

    #[test]
    fn instance_is_128_bytes() {
        assert_eq!(std::mem::size_of::<ArcInstance>(), 128);
    }

    #[test]
    fn solid_arc_packs_one_stop() {
        let mut warned = false;
        let inst = ArcInstance::from_cmd(&cmd(270.0, Paint::Solid(Color::RED)), &mut warned).unwrap();
        assert_eq!(inst.params[3], 1.0);
        assert_eq!(inst.colors[0], [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(inst.radius_hw, [130.0, 20.0]);
        assert_eq!(inst.params[2], 1.0);
    }

    #[test]
    fn negative_sweep_is_normalized() {
        let mut warned = false;
        let inst = ArcInstance::from_cmd(&cmd(-90.0, Paint::Solid(Color::RED)), &mut warned).unwrap();
        assert!((inst.params[0] - 45.0f32.to_radians()).abs() < 1e-6);
        assert!((inst.params[1] - 90.0f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn empty_arcs_are_skipped() {
        let mut warned = false;
        assert!(ArcInstance::from_cmd(&cmd(0.0, Paint::Solid(Color::RED)), &mut warned).is_none());

        let mut thin = cmd(90.0, Paint::Solid(Color::RED));
        thin.radius = 0.0;
        assert!(ArcInstance::from_cmd(&thin, &mut warned).is_none());
    }

    #[test]
    fn gradient_stops_and_axis_are_packed() {
        let mut warned = false;
        let g = GradientSpec::from_parts(&[Color::RED, Color::BLUE], &[0.0, 1.0])
            .unwrap()
            .build(&crate::arc::resolve(300.0, 300.0, 40.0));
        let inst = ArcInstance::from_cmd(&cmd(270.0, Paint::LinearGradient(g)), &mut warned).unwrap();
        assert_eq!(inst.params[3], 2.0);
        assert_eq!(inst.grad_axis, [0.0, 0.0, 300.0, 0.0]);
        assert_eq!(inst.stop_pos[..2], [0.0, 1.0]);
        assert_eq!(inst.colors[1], [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn long_ramp_is_resampled_once() {
        let stops = (0..6)
            .map(|i| GradientStop::new(i as f32 / 5.0, if i % 2 == 0 { Color::RED } else { Color::BLUE }))
            .collect::<Vec<_>>();
        let g = LinearGradient::new(Vec2::zero(), Vec2::new(100.0, 0.0), stops, SpreadMode::Pad);

        let mut warned = false;
        let inst = ArcInstance::from_cmd(&cmd(90.0, Paint::LinearGradient(g)), &mut warned).unwrap();
        assert!(warned);
        assert_eq!(inst.params[3], MAX_STOPS as f32);
        assert_eq!(inst.stop_pos, [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
    }
}
