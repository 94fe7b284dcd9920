//! GPU rendering.
//!
//! Renderers pull their own command variant out of a `scene::DrawList` and
//! record one render pass each. Every renderer owns its GPU resources and
//! (re)creates them lazily when the surface format changes.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down)
//! - vertex shaders convert to NDC with a viewport uniform

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
