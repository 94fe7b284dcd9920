//! The greeting scene: a single label centered in a small window.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use winit::dpi::LogicalSize;

use caustic_engine::coords::{Vec2, Viewport};
use caustic_engine::core::{App, AppControl, FrameCtx};
use caustic_engine::paint::Color;
use caustic_engine::render::shapes::text::TextRenderer;
use caustic_engine::scene::{DrawList, ZIndex};
use caustic_engine::text::{FontId, FontSystem};
use caustic_engine::window::{Runtime, RuntimeConfig};

use crate::options::StudioOptions;

const TITLE: &str = "Hello Marquette QT";
const GREETING: &str = "Hello Marquette!";
const WINDOW_SIZE: f64 = 400.0;

const SYSTEM_FONTS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

pub fn run(options: &StudioOptions) -> Result<()> {
    let bytes = read_font(options.text.font.as_deref())?;
    let mut fonts = FontSystem::new();
    let font = fonts.load_font(&bytes).context("failed to parse font")?;

    let config = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE),
    };
    let scene = HelloScene::new(fonts, font, options.text.size);

    Runtime::run(config, options.gpu_init(), scene)
}

/// Reads the configured font, or the first system font that exists.
fn read_font(configured: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(path) = configured {
        return std::fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()));
    }

    SYSTEM_FONTS
        .iter()
        .find_map(|path| {
            let bytes = std::fs::read(path).ok()?;
            log::info!("using system font {path}");
            Some(bytes)
        })
        .ok_or_else(|| anyhow!("no system font found; set [text] font in the options file"))
}

/// Qt's default window gray.
fn background() -> Color {
    Color::from_srgb_u8(239, 239, 239, 255)
}

struct HelloScene {
    fonts: FontSystem,
    font: FontId,
    size: f32,
    /// Measured once; the label never changes.
    label_extent: Vec2,
    draw_list: DrawList,
    renderer: TextRenderer,
}

impl HelloScene {
    fn new(fonts: FontSystem, font: FontId, size: f32) -> Self {
        let label_extent = fonts.measure_text(GREETING, font, size);
        Self {
            fonts,
            font,
            size,
            label_extent,
            draw_list: DrawList::new(),
            renderer: TextRenderer::new(),
        }
    }
}

impl App for HelloScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        build_label(
            self.font,
            self.size,
            self.label_extent,
            ctx.window.viewport(),
            &mut self.draw_list,
        );

        let Self {
            fonts,
            draw_list,
            renderer,
            ..
        } = self;
        ctx.render(background(), |rctx, target| {
            renderer.render(rctx, target, draw_list, fonts);
        })
    }
}

/// Top-left corner that centers a box of `extent` in `viewport`, snapped to
/// whole logical pixels so glyphs stay crisp.
fn centered_origin(extent: Vec2, viewport: Viewport) -> Vec2 {
    let window = Vec2::new(viewport.width, viewport.height);
    let origin = (window - extent) * 0.5;
    Vec2::new(origin.x.round(), origin.y.round())
}

fn build_label(font: FontId, size: f32, extent: Vec2, viewport: Viewport, list: &mut DrawList) {
    list.clear();
    let origin = centered_origin(extent, viewport);
    list.push_text(ZIndex(0), origin, GREETING, font, size, Color::BLACK);
}
