use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Solid triangle; winding does not matter, culling is off.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleCmd {
    pub vertices: [Vec2; 3],
    pub color: Color,
}

impl DrawList {
    #[inline]
    pub fn push_triangle(&mut self, z: ZIndex, vertices: [Vec2; 3], color: Color) {
        self.push(z, DrawCmd::Triangle(TriangleCmd { vertices, color }));
    }
}
