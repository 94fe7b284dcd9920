//! Scene (draw stream) types.
//!
//! - renderer-agnostic draw commands in logical pixels
//! - deterministic ordering: z-index first, then insertion order
//! - per-shape push helpers live under `scene::shapes`

mod cmd;
mod key;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
