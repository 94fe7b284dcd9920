//! GPU plumbing shared by the shape renderers.

use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};

// ── blend ─────────────────────────────────────────────────────────────────

fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size by construction")
}

// ── unit quad ─────────────────────────────────────────────────────────────

/// Corner of the unit quad, `[0, 1]²`. Instanced shapes stretch it in the
/// vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub corner: [f32; 2],
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [0.0, 0.0] },
    QuadVertex { corner: [1.0, 0.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

// ── pipeline ──────────────────────────────────────────────────────────────

/// Pipeline + viewport binding for one shape kind, tied to a surface format.
pub(super) struct ShapePipeline {
    format: wgpu::TextureFormat,
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
}

impl ShapePipeline {
    /// Builds the pipeline. `shader` must define `vs_main` / `fs_main` and read
    /// the viewport uniform at `@group(0) @binding(0)`.
    pub(super) fn new(
        ctx: &RenderCtx<'_>,
        name: &str,
        shader: &str,
        buffers: &[wgpu::VertexBufferLayout<'_>],
    ) -> Self {
        Self::build(ctx, name, shader, buffers, None)
    }

    /// Like [`ShapePipeline::new`], plus a filterable 2D texture at
    /// `@binding(1)` and its sampler at `@binding(2)`, both fragment-only.
    pub(super) fn textured(
        ctx: &RenderCtx<'_>,
        name: &str,
        shader: &str,
        buffers: &[wgpu::VertexBufferLayout<'_>],
        texture: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> Self {
        Self::build(ctx, name, shader, buffers, Some((texture, sampler)))
    }

    fn build(
        ctx: &RenderCtx<'_>,
        name: &str,
        shader: &str,
        buffers: &[wgpu::VertexBufferLayout<'_>],
        texture: Option<(&wgpu::TextureView, &wgpu::Sampler)>,
    ) -> Self {
        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("caustic {name} shader")),
            source: wgpu::ShaderSource::Wgsl(shader.into()),
        });

        let mut layout_entries = vec![wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: Some(viewport_ubo_min_binding_size()),
            },
            count: None,
        }];
        if texture.is_some() {
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            });
            layout_entries.push(wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            });
        }

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("caustic {name} bgl")),
                entries: &layout_entries,
            });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("caustic {name} pipeline layout")),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("caustic {name} pipeline")),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
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

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("caustic {name} viewport ubo")),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut group_entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: viewport_ubo.as_entire_binding(),
        }];
        if let Some((view, sampler)) = texture {
            group_entries.push(wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(view),
            });
            group_entries.push(wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            });
        }

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("caustic {name} bind group")),
            layout: &bind_group_layout,
            entries: &group_entries,
        });

        log::debug!("built {name} pipeline for {:?}", ctx.surface_format);

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
        }
    }

    #[inline]
    pub(super) fn matches(&self, format: wgpu::TextureFormat) -> bool {
        self.format == format
    }

    pub(super) fn write_viewport(&self, ctx: &RenderCtx<'_>) {
        ctx.queue.write_buffer(
            &self.viewport_ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }
}

// ── buffers ───────────────────────────────────────────────────────────────

const MIN_BUFFER_BYTES: u64 = 4096;

/// Capacity for a buffer that must hold `required` bytes.
fn grown_capacity(required: u64) -> u64 {
    required.next_power_of_two().max(MIN_BUFFER_BYTES)
}

/// GPU buffer rewritten every frame; grows to the next power of two, never
/// shrinks.
pub(super) struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: Option<wgpu::Buffer>,
    capacity: u64,
}

impl GrowableBuffer {
    pub(super) const fn new(label: &'static str, usage: wgpu::BufferUsages) -> Self {
        Self {
            label,
            usage,
            buffer: None,
            capacity: 0,
        }
    }

    /// Uploads `data` at offset 0. Returns `None` for empty input.
    pub(super) fn upload<T: Pod>(
        &mut self,
        ctx: &RenderCtx<'_>,
        data: &[T],
    ) -> Option<&wgpu::Buffer> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.is_empty() {
            return None;
        }

        let required = bytes.len() as u64;
        if self.buffer.is_none() || required > self.capacity {
            let capacity = grown_capacity(required);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: capacity,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        let buffer = self.buffer.as_ref()?;
        ctx.queue.write_buffer(buffer, 0, bytes);
        Some(buffer)
    }
}

// ── pass ──────────────────────────────────────────────────────────────────

/// Opens a pass that draws over what earlier passes left in the target.
pub(super) fn begin_load_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &str,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
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
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_buffers_get_the_minimum() {
        assert_eq!(grown_capacity(16), MIN_BUFFER_BYTES);
    }

    #[test]
    fn large_buffers_round_up_to_power_of_two() {
        assert_eq!(grown_capacity(5000), 8192);
        assert_eq!(grown_capacity(8192), 8192);
    }

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(viewport_ubo_min_binding_size().get(), 16);
    }
}
