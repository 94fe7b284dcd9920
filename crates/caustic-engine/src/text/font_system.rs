use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the fonts an application draws with.
///
/// Fonts are immutable after loading. The application keeps the system and
/// hands it to `TextRenderer::render` every frame.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TrueType or OpenType font.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Size of `text` set on a single line at `size` logical pixels.
    ///
    /// The width runs to the pen position after the last glyph; the height is
    /// the font's ascent-to-descent line box, so strings with and without
    /// descenders measure the same. Unknown fonts measure as an empty line.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let fallback_height = size * 1.2;
        let Some(font) = self.get(id) else {
            return Vec2::new(0.0, fallback_height);
        };

        let height = font
            .horizontal_line_metrics(size)
            .map_or(fallback_height, |m| m.ascent - m.descent);

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let width = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);

        Vec2::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
        assert!(fonts.get(FontId(0)).is_none());
    }

    #[test]
    fn unknown_font_measures_as_an_empty_line() {
        let fonts = FontSystem::new();
        let extent = fonts.measure_text("Hello", FontId(3), 10.0);
        assert_eq!(extent, Vec2::new(0.0, 12.0));
    }
}
