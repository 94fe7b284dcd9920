//! Shape renderers, one per `DrawCmd` variant.

mod common;

pub mod dot;
pub mod line;
pub mod text;
pub mod triangle;
