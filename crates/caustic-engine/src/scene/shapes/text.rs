use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// One line of text, laid out left to right from `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the line box in logical pixels.
    pub origin: Vec2,
}

impl DrawList {
    pub fn push_text(
        &mut self,
        z: ZIndex,
        origin: Vec2,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
    ) {
        self.push(
            z,
            DrawCmd::Text(TextCmd {
                text: text.into(),
                font,
                size,
                color,
                origin,
            }),
        );
    }
}
