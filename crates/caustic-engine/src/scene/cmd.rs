use crate::scene::shapes::dot::DotCmd;
use crate::scene::shapes::line::LineCmd;
use crate::scene::shapes::text::TextCmd;
use crate::scene::shapes::triangle::TriangleCmd;

/// Renderer-agnostic draw command.
///
/// Adding a shape: a module under `scene::shapes`, a variant here, and a
/// renderer under `render::shapes` that picks its variant out of the list.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Dot(DotCmd),
    Line(LineCmd),
    Text(TextCmd),
    Triangle(TriangleCmd),
}
