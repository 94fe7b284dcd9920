use super::{Vec2, Viewport};

/// Axis-aligned world-space window, +Y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl ViewBox {
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// `[-half_extent, half_extent]²`, centered on the origin.
    #[inline]
    pub const fn symmetric(half_extent: f32) -> Self {
        Self::new(
            Vec2::new(-half_extent, -half_extent),
            Vec2::new(half_extent, half_extent),
        )
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width() > 0.0 && self.height() > 0.0 && self.min.is_finite() && self.max.is_finite()
    }
}

/// World → logical-pixel mapping with uniform scale and a Y flip.
///
/// Built by [`ViewTransform::fit`]: the whole [`ViewBox`] stays visible and
/// centered, the shorter viewport axis spans it exactly, and the longer axis
/// shows extra margin. Circles stay circles on non-square windows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    scale: f32,
    offset: Vec2,
}

impl ViewTransform {
    pub fn fit(view: ViewBox, viewport: Viewport) -> Self {
        if !view.is_valid() || !viewport.is_valid() {
            return Self {
                scale: 1.0,
                offset: Vec2::zero(),
            };
        }

        let scale = (viewport.width / view.width())
            .min(viewport.height / view.height());
        let c = view.center();

        Self {
            scale,
            offset: Vec2::new(
                viewport.width * 0.5 - c.x * scale,
                viewport.height * 0.5 + c.y * scale,
            ),
        }
    }

    /// Logical pixels per world unit.
    #[inline]
    pub fn scale(self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn apply(self, world: Vec2) -> Vec2 {
        Vec2::new(
            world.x * self.scale + self.offset.x,
            self.offset.y - world.y * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: Vec2, b: Vec2) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-3);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-3);
    }

    #[test]
    fn square_window_spans_the_box() {
        let t = ViewTransform::fit(ViewBox::symmetric(1.1), Viewport::new(640.0, 640.0));
        assert_vec_eq(t.apply(Vec2::new(0.0, 0.0)), Vec2::new(320.0, 320.0));
        assert_vec_eq(t.apply(Vec2::new(-1.1, 1.1)), Vec2::new(0.0, 0.0));
        assert_vec_eq(t.apply(Vec2::new(1.1, -1.1)), Vec2::new(640.0, 640.0));
    }

    #[test]
    fn world_up_is_screen_up() {
        let t = ViewTransform::fit(ViewBox::symmetric(1.0), Viewport::new(200.0, 200.0));
        let up = t.apply(Vec2::new(0.0, 1.0));
        let origin = t.apply(Vec2::new(0.0, 0.0));
        assert!(up.y < origin.y);
    }

    #[test]
    fn wide_window_letterboxes_horizontally() {
        let t = ViewTransform::fit(ViewBox::symmetric(1.0), Viewport::new(800.0, 400.0));
        assert_relative_eq!(t.scale(), 200.0);
        assert_vec_eq(t.apply(Vec2::new(0.0, 0.0)), Vec2::new(400.0, 200.0));
        assert_vec_eq(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(600.0, 0.0));
    }

    #[test]
    fn tall_window_letterboxes_vertically() {
        let t = ViewTransform::fit(ViewBox::symmetric(1.0), Viewport::new(300.0, 900.0));
        assert_relative_eq!(t.scale(), 150.0);
        assert_vec_eq(t.apply(Vec2::new(-1.0, -1.0)), Vec2::new(0.0, 600.0));
    }

    #[test]
    fn off_center_box_is_centered() {
        let view = ViewBox::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let t = ViewTransform::fit(view, Viewport::new(100.0, 100.0));
        assert_vec_eq(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn degenerate_inputs_fall_back_to_identity_scale() {
        let t = ViewTransform::fit(ViewBox::symmetric(0.0), Viewport::new(100.0, 100.0));
        assert_eq!(t.scale(), 1.0);
        let t = ViewTransform::fit(ViewBox::symmetric(1.0), Viewport::new(0.0, 100.0));
        assert_eq!(t.apply(Vec2::new(2.0, 3.0)), Vec2::new(2.0, -3.0));
    }
}
