//! The triangle scene: one filled triangle on a dark background.

use anyhow::Result;
use winit::dpi::LogicalSize;

use caustic_engine::coords::{Vec2, Viewport};
use caustic_engine::core::{App, AppControl, FrameCtx};
use caustic_engine::paint::Color;
use caustic_engine::render::shapes::triangle::TriangleRenderer;
use caustic_engine::scene::{DrawList, ZIndex};
use caustic_engine::window::{Runtime, RuntimeConfig};

use crate::options::StudioOptions;

/// Vertices in normalized device coordinates (+Y up, `[-1, 1]` on both axes).
const VERTICES: [Vec2; 3] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(0.0, 0.5),
];

pub fn run(options: &StudioOptions) -> Result<()> {
    let config = RuntimeConfig {
        title: "Triangle".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
    };
    Runtime::run(config, options.gpu_init(), TriangleScene::default())
}

/// sRGB-encoded, like every color the studio hands to the engine.
fn background() -> Color {
    Color::from_srgb(0.1, 0.1, 0.1)
}

fn fill() -> Color {
    Color::from_srgb(0.2, 0.7, 0.3)
}

#[derive(Default)]
struct TriangleScene {
    draw_list: DrawList,
    renderer: TriangleRenderer,
}

impl App for TriangleScene {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        build_triangle(ctx.window.viewport(), &mut self.draw_list);

        let Self {
            draw_list,
            renderer,
        } = self;
        ctx.render(background(), |rctx, target| {
            renderer.render(rctx, target, draw_list);
        })
    }
}

/// NDC → logical pixels. Stretches with the window, so the triangle keeps its
/// share of the window rather than its shape.
fn ndc_to_logical(p: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (p.x + 1.0) * 0.5 * viewport.width,
        (1.0 - p.y) * 0.5 * viewport.height,
    )
}

fn build_triangle(viewport: Viewport, list: &mut DrawList) {
    list.clear();
    let vertices = VERTICES.map(|v| ndc_to_logical(v, viewport));
    list.push_triangle(ZIndex(0), vertices, fill());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use caustic_engine::scene::DrawCmd;

    #[test]
    fn ndc_corners_map_to_window_corners() {
        let vp = Viewport::new(800.0, 600.0);
        let map = |x, y| ndc_to_logical(Vec2::new(x, y), vp);
        assert_eq!(map(-1.0, 1.0), Vec2::new(0.0, 0.0));
        assert_eq!(map(1.0, -1.0), Vec2::new(800.0, 600.0));
        assert_eq!(map(0.0, 0.0), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn triangle_in_an_800_by_600_window() {
        let mut list = DrawList::new();
        build_triangle(Viewport::new(800.0, 600.0), &mut list);
        assert_eq!(list.len(), 1);

        let DrawCmd::Triangle(tri) = &list.items()[0].cmd else {
            panic!("expected a triangle");
        };
        assert_eq!(
            tri.vertices,
            [
                Vec2::new(200.0, 450.0),
                Vec2::new(600.0, 450.0),
                Vec2::new(400.0, 150.0),
            ]
        );
        assert_eq!(tri.color, fill());
    }

    #[test]
    fn colors_are_decoded_from_srgb() {
        // The surface re-encodes on write, so these display as 0.2/0.7/0.3.
        let fill = fill();
        assert_abs_diff_eq!(fill.r, 0.0331, epsilon = 1e-3);
        assert_abs_diff_eq!(fill.g, 0.4480, epsilon = 1e-3);
        assert_abs_diff_eq!(fill.b, 0.0656, epsilon = 1e-3);
        assert_eq!(fill.a, 1.0);

        let bg = background();
        assert_abs_diff_eq!(bg.r, 0.0100, epsilon = 1e-3);
        assert_eq!(bg.r, bg.g);
        assert_eq!(bg.g, bg.b);
    }

    #[test]
    fn rebuilding_does_not_accumulate() {
        let mut list = DrawList::new();
        build_triangle(Viewport::new(800.0, 600.0), &mut list);
        build_triangle(Viewport::new(400.0, 300.0), &mut list);
        assert_eq!(list.len(), 1);
    }
}
