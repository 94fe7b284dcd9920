//! Caustic engine crate.
//!
//! Owns the platform + GPU runtime used by the viewer: a single winit window,
//! the wgpu surface behind it, and renderers for dots, lines, triangles and
//! text fed from a renderer-agnostic draw list.

pub mod core;
pub mod device;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
