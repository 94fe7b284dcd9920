//! Font loading and measurement.
//!
//! Glyph rasterization happens in `render::shapes::text`; this module only
//! owns the parsed fonts so both the renderer and the application can use
//! them.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
