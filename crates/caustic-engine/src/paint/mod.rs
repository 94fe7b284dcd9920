//! Paint model shared between the scene and the renderers.
//!
//! Only solid colors exist; every shape carries one [`Color`].

pub mod color;

pub use color::Color;
