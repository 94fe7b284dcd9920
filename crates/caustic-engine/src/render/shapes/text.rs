use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    GrowableBuffer, QUAD_INDICES, QUAD_VERTICES, QuadVertex, ShapePipeline, begin_load_pass,
};

const ATLAS_SIZE: u32 = 1024;
/// Empty texels kept around every glyph so linear filtering never bleeds.
const GLYPH_PADDING: u32 = 1;

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue on first use and cached in a single
/// `R8Unorm` coverage atlas for the renderer's lifetime. The cache key is
/// fontdue's `GlyphRasterConfig` (font, glyph, pixel size). Each visible glyph
/// becomes one instanced quad.
pub struct TextRenderer {
    pipeline: Option<ShapePipeline>,
    atlas: Option<GlyphAtlas>,
    quad: Option<(wgpu::Buffer, wgpu::Buffer)>,
    instances: GrowableBuffer,
    scratch: Vec<GlyphInstance>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline: None,
            atlas: None,
            quad: None,
            instances: GrowableBuffer::new("caustic text instance vbo", wgpu::BufferUsages::VERTEX),
            scratch: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.scratch.clear();
        let atlas = self.atlas.get_or_insert_with(|| GlyphAtlas::new(ctx));

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else {
                continue;
            };
            if cmd.text.is_empty() || cmd.size <= 0.0 || !cmd.origin.is_finite() {
                continue;
            }
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("text renderer: unknown {:?}, skipping", cmd.font);
                continue;
            };

            self.layout.reset(&LayoutSettings {
                x: cmd.origin.x,
                y: cmd.origin.y,
                ..LayoutSettings::default()
            });
            self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

            let color = cmd.color.to_array();
            for glyph in self.layout.glyphs() {
                if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
                    continue;
                }
                let Some(uv) = atlas.glyph(ctx, font, glyph.key) else {
                    continue;
                };
                self.scratch.push(GlyphInstance {
                    dst_min: [glyph.x, glyph.y],
                    dst_max: [glyph.x + glyph.width as f32, glyph.y + glyph.height as f32],
                    uv_min: uv.min,
                    uv_max: uv.max,
                    color,
                });
            }
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

        let mut rpass = begin_load_pass(target, "caustic text pass");
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
        let Some(atlas) = self.atlas.as_ref() else {
            return;
        };
        self.pipeline = Some(ShapePipeline::textured(
            ctx,
            "text",
            include_str!("shaders/text.wgsl"),
            &[QuadVertex::layout(), GlyphInstance::layout()],
            &atlas.view,
            &atlas.sampler,
        ));
    }

    fn ensure_quad(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_some() {
            return;
        }
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("caustic text quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("caustic text quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.quad = Some((vbo, ibo));
    }
}

// ── atlas ─────────────────────────────────────────────────────────────────

/// Normalized texture rectangle of one cached glyph.
#[derive(Debug, Copy, Clone, PartialEq)]
struct GlyphUv {
    min: [f32; 2],
    max: [f32; 2],
}

impl GlyphUv {
    fn of_cell(x: u32, y: u32, w: u32, h: u32, atlas_size: u32) -> Self {
        let s = atlas_size as f32;
        Self {
            min: [x as f32 / s, y as f32 / s],
            max: [(x + w) as f32 / s, (y + h) as f32 / s],
        }
    }
}

/// Row-by-row ("shelf") allocator for glyph cells.
///
/// Cells are placed left to right; a cell that does not fit starts a new row
/// below the tallest cell of the current one. Nothing is ever freed.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Top-left corner of a free `w × h` cell, or `None` when it cannot fit.
    fn place(&mut self, w: u32, h: u32) -> Option<[u32; 2]> {
        if self.full || w + 2 * GLYPH_PADDING > self.size || h + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let at = [self.cursor_x, self.cursor_y];
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

struct GlyphAtlas {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    packer: ShelfPacker,
    cached: HashMap<GlyphRasterConfig, GlyphUv>,
    warned_full: bool,
}

impl GlyphAtlas {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("caustic text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("caustic text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            packer: ShelfPacker::new(ATLAS_SIZE),
            cached: HashMap::new(),
            warned_full: false,
        }
    }

    /// Atlas rectangle of `key`, rasterizing and uploading it on first use.
    fn glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        font: &fontdue::Font,
        key: GlyphRasterConfig,
    ) -> Option<GlyphUv> {
        if let Some(uv) = self.cached.get(&key) {
            return Some(*uv);
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        let (w, h) = (metrics.width as u32, metrics.height as u32);

        let Some([x, y]) = self.packer.place(w, h) else {
            if !self.warned_full {
                log::warn!("glyph atlas is full; glyphs that do not fit are skipped");
                self.warned_full = true;
            }
            return None;
        };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        let uv = GlyphUv::of_cell(x, y, w, h, ATLAS_SIZE);
        self.cached.insert(key, uv);
        Some(uv)
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }

    #[test]
    fn cells_fill_a_row_then_wrap() {
        let mut packer = ShelfPacker::new(16);
        assert_eq!(packer.place(6, 4), Some([1, 1]));
        assert_eq!(packer.place(6, 3), Some([8, 1]));
        // 15 + 6 + 1 > 16: next row starts below the 4-texel cell.
        assert_eq!(packer.place(6, 2), Some([1, 6]));
    }

    #[test]
    fn full_atlas_stays_full() {
        let mut packer = ShelfPacker::new(8);
        assert_eq!(packer.place(6, 6), Some([1, 1]));
        assert_eq!(packer.place(6, 6), None);
        assert_eq!(packer.place(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_refused_without_filling_the_atlas() {
        let mut packer = ShelfPacker::new(8);
        assert_eq!(packer.place(7, 1), None);
        assert_eq!(packer.place(2, 2), Some([1, 1]));
    }

    #[test]
    fn uv_rectangle_is_normalized() {
        let uv = GlyphUv::of_cell(256, 512, 128, 64, 1024);
        assert_eq!(uv.min, [0.25, 0.5]);
        assert_eq!(uv.max, [0.375, 0.5625]);
    }
}
