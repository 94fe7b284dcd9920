use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{GrowableBuffer, ShapePipeline, begin_load_pass};

/// Renderer for `DrawCmd::Triangle`. Vertices are expanded on the CPU into a
/// plain triangle list; there is no instancing.
pub struct TriangleRenderer {
    pipeline: Option<ShapePipeline>,
    vertices: GrowableBuffer,
    scratch: Vec<TriangleVertex>,
}

impl Default for TriangleRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            vertices: GrowableBuffer::new("caustic triangle vbo", wgpu::BufferUsages::VERTEX),
            scratch: Vec::new(),
        }
    }
}

impl TriangleRenderer {
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
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Triangle(cmd) = &item.cmd else {
                continue;
            };
            if !cmd.vertices.iter().all(|v| v.is_finite()) {
                continue;
            }
            let color = cmd.color.to_array();
            let vertices = cmd.vertices.iter().map(|v| TriangleVertex {
                pos: v.to_array(),
                color,
            });
            self.scratch.extend(vertices);
        }

        if self.scratch.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);

        let count = self.scratch.len() as u32;
        let Some(vbo) = self.vertices.upload(ctx, &self.scratch) else {
            return;
        };
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };

        pipeline.write_viewport(ctx);

        let mut rpass = begin_load_pass(target, "caustic triangle pass");
        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, &pipeline.bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..count, 0..1);
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
            "triangle",
            include_str!("shaders/triangle.wgsl"),
            &[TriangleVertex::layout()],
        ));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Vertex layout (24 bytes): `pos` at loc 0, `color` at loc 1.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TriangleVertex {
    pos: [f32; 2],
    color: [f32; 4],
}

impl TriangleVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TriangleVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
