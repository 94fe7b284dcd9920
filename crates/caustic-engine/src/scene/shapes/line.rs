use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Straight segment with a constant width in logical pixels.
///
/// Zero-length segments are kept; the renderer draws them as a square cap so
/// a self-loop stays visible as a speck.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        (self.to - self.from).length() <= f32::EPSILON
    }
}

impl DrawList {
    #[inline]
    pub fn push_line(&mut self, z: ZIndex, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.push(
            z,
            DrawCmd::Line(LineCmd {
                from,
                to,
                width,
                color,
            }),
        );
    }
}
