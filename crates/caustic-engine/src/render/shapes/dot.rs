use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    begin_load_pass, GrowableBuffer, QuadVertex, ShapePipeline, QUAD_INDICES, QUAD_VERTICES,
};

/// Renderer for `DrawCmd::Dot`: one instanced quad per dot, shaded as an
/// anti-aliased disc.
pub struct DotRenderer {
    pipeline: Option<ShapePipeline>,
    quad: Option<(wgpu::Buffer, wgpu::Buffer)>,
    instances: GrowableBuffer,
    scratch: Vec<DotInstance>,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            quad: None,
            instances: GrowableBuffer::new("caustic dot instance vbo", wgpu::BufferUsages::VERTEX),
            scratch: Vec::new(),
        }
    }
}

impl DotRenderer {
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
        self.scratch.extend(draw_list.iter_in_paint_order().filter_map(|item| {
            let DrawCmd::Dot(cmd) = &item.cmd else {
                return None;
            };
            (cmd.radius > 0.0 && cmd.center.is_finite()).then(|| DotInstance {
                center: cmd.center.to_array(),
                radius: [cmd.radius, 0.0],
                color: cmd.color.to_array(),
            })
        }));

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

        let mut rpass = begin_load_pass(target, "caustic dot pass");
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
            "dot",
            include_str!("shaders/dot.wgsl"),
            &[QuadVertex::layout(), DotInstance::layout()],
        ));
    }

    fn ensure_quad(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_some() {
            return;
        }
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("caustic dot quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("caustic dot quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.quad = Some((vbo, ibo));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (32 bytes):
///
///  offset  0  center  [f32; 2]   loc 1
///  offset  8  radius  [f32; 2]   loc 2  (.x = radius, .y unused)
///  offset 16  color   [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DotInstance {
    center: [f32; 2],
    radius: [f32; 2],
    color: [f32; 4],
}

impl DotInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<DotInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
