//! The caustic scene: curve samples as dots, the boundary polyline and the
//! chords, regenerated from the same parameters on every frame.

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;

use caustic_engine::coords::{Vec2, ViewBox, ViewTransform, Viewport};
use caustic_engine::core::{App, AppControl, FrameCtx};
use caustic_engine::render::shapes::dot::DotRenderer;
use caustic_engine::render::shapes::line::LineRenderer;
use caustic_engine::scene::{DrawList, ZIndex};
use caustic_engine::window::{Runtime, RuntimeConfig};
use caustic_geometry::{Curve, CurveGenerator, Point2D};

use crate::options::{StudioOptions, StyleOptions};

const POINT_Z: ZIndex = ZIndex(0);
const BOUNDARY_Z: ZIndex = ZIndex(1);
const CHORD_Z: ZIndex = ZIndex(2);

pub fn run(options: &StudioOptions) -> Result<()> {
    let generator = CurveGenerator::new(options.curve)
        .context("invalid [curve] parameters")?;
    log::info!(
        "caustic: Q={} P={} (normalized {}) A={} B={}",
        options.curve.point_count,
        options.curve.chord_stride,
        generator.stride(),
        options.curve.freq_x,
        options.curve.freq_y,
    );

    let config = RuntimeConfig {
        title: options.window_title(),
        initial_size: LogicalSize::new(options.window.width, options.window.height),
    };
    let scene = CausticScene::new(generator, options.style.clone());

    Runtime::run(config, options.gpu_init(), scene)
}

struct CausticScene {
    generator: CurveGenerator,
    style: StyleOptions,
    draw_list: DrawList,
    dots: DotRenderer,
    lines: LineRenderer,
    logged_counts: bool,
}

impl CausticScene {
    fn new(generator: CurveGenerator, style: StyleOptions) -> Self {
        Self {
            generator,
            style,
            draw_list: DrawList::new(),
            dots: DotRenderer::new(),
            lines: LineRenderer::new(),
            logged_counts: false,
        }
    }
}

impl App for CausticScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let curve = self.generator.generate();
        if !self.logged_counts {
            log::debug!(
                "generated {} points, {} boundary edges, {} chords",
                curve.sample().len(),
                curve.boundary().len(),
                curve.chords().len(),
            );
            self.logged_counts = true;
        }

        build_draw_list(
            &curve,
            &self.style,
            ctx.window.viewport(),
            &mut self.draw_list,
        );

        let Self {
            draw_list,
            dots,
            lines,
            style,
            ..
        } = self;
        ctx.render(style.background(), |rctx, target| {
            // Points first; lines are drawn over them.
            dots.render(rctx, target, draw_list);
            lines.render(rctx, target, draw_list);
        })
    }
}

/// Records `curve` into `list` in logical pixels for a window of `viewport`.
///
/// The world square `[-view_extent, view_extent]²` is fitted into the window.
/// `list` is cleared first.
fn build_draw_list(curve: &Curve, style: &StyleOptions, viewport: Viewport, list: &mut DrawList) {
    list.clear();

    let view = ViewBox::symmetric(style.view_extent);
    if !view.is_valid() || !viewport.is_valid() {
        return;
    }
    let transform = ViewTransform::fit(view, viewport);
    let to_screen = |p: Point2D| transform.apply(Vec2::new(p.x, p.y));

    let radius = style.point_size * 0.5;
    let point_color = style.point();
    for &p in curve.sample() {
        list.push_dot(POINT_Z, to_screen(p), radius, point_color);
    }

    let boundary_color = style.boundary();
    for (a, b) in curve.boundary().segments(curve.sample()) {
        list.push_line(
            BOUNDARY_Z,
            to_screen(a),
            to_screen(b),
            style.line_width,
            boundary_color,
        );
    }

    let chord_color = style.chord();
    for (a, b) in curve.chords().segments(curve.sample()) {
        list.push_line(
            CHORD_Z,
            to_screen(a),
            to_screen(b),
            style.line_width,
            chord_color,
        );
    }
}
