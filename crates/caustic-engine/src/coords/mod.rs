//! Coordinate types shared by the scene and the renderers.
//!
//! Two spaces are in play:
//! - world space: whatever the caller draws in (curve space is `[-1, 1]²`,
//!   +Y up), bounded by a [`ViewBox`]
//! - logical pixels: DPI-aware, origin top-left, +X right, +Y down; this is
//!   what the draw list stores and what shaders convert to NDC
//!
//! [`ViewTransform`] maps the first onto the second.

mod vec2;
mod view;
mod viewport;

pub use vec2::Vec2;
pub use view::{ViewBox, ViewTransform};
pub use viewport::Viewport;
