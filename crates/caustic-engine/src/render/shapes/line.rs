use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    begin_load_pass, GrowableBuffer, QuadVertex, ShapePipeline, QUAD_INDICES, QUAD_VERTICES,
};

/// Renderer for `DrawCmd::Line`.
///
/// Each segment is one instanced quad oriented along the segment in the vertex
/// shader, so width is constant in logical pixels regardless of the backend's
/// native line support. Ends get square caps of half the width.
pub struct LineRenderer {
    pipeline: Option<ShapePipeline>,
    quad: Option<(wgpu::Buffer, wgpu::Buffer)>,
    instances: GrowableBuffer,
    scratch: Vec<LineInstance>,
    warned_degenerate: bool,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            quad: None,
            instances: GrowableBuffer::new("caustic line instance vbo", wgpu::BufferUsages::VERTEX),
            scratch: Vec::new(),
            warned_degenerate: false,
        }
    }
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.scratch.clear();
        let mut saw_degenerate = false;

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Line(cmd) = &item.cmd else {
                continue;
            };
            if cmd.width <= 0.0 || !cmd.from.is_finite() || !cmd.to.is_finite() {
                continue;
            }
            saw_degenerate |= cmd.is_degenerate();
            self.scratch.push(LineInstance {
                from: cmd.from.to_array(),
                to: cmd.to.to_array(),
                width: [cmd.width, 0.0],
                color: cmd.color.to_array(),
            });
        }

        if saw_degenerate && !self.warned_degenerate {
            log::debug!("LineRenderer: zero-length segments drawn as caps");
            self.warned_degenerate = true;
        }

        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_quad(ctx);

        let count = self.scratch.len() as u32;
        let Some(instance_vbo) = self.instances.upload(ctx, &self.scratch) else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        let Some((quad_vbo, quad_ibo)) = self.quad.as_ref() else {
            return;
        };

        pipeline.write_viewport(ctx);

        let mut rpass = begin_load_pass(target, "caustic line pass");
        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, &pipeline.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..count);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self
            .pipeline
            .as_ref()
            .is_some_and(|p| p.matches(ctx.surface_format))
        {
            return;
        }
        self.pipeline = Some(ShapePipeline::new(
            ctx,
            "line",
            include_str!("shaders/line.wgsl"),
            &[QuadVertex::layout(), LineInstance::layout()],
        ));
    }

    fn ensure_quad(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_some() {
            return;
        }
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("caustic line quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("caustic line quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.quad = Some((vbo, ibo));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  from   [f32; 2]   loc 1
///  offset  8  to     [f32; 2]   loc 2
///  offset 16  width  [f32; 2]   loc 3  (.x = width, .y unused)
///  offset 24  color  [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct LineInstance {
    from: [f32; 2],
    to: [f32; 2],
    width: [f32; 2],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // from
        2 => Float32x2, // to
        3 => Float32x2, // width
        4 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
