pub mod dot;
pub mod line;
pub mod text;
pub mod triangle;
