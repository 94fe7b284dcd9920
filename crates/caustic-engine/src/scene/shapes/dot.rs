use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Filled disc, the scene's stand-in for a fixed-size point.
#[derive(Debug, Clone, PartialEq)]
pub struct DotCmd {
    pub center: Vec2,
    /// Logical pixels.
    pub radius: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a dot; `radius` is in logical pixels.
    #[inline]
    pub fn push_dot(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        self.push(
            z,
            DrawCmd::Dot(DotCmd {
                center,
                radius,
                color,
            }),
        );
    }
}
