//! Parametric caustic curve geometry.
//!
//! A caustic figure is drawn from `Q` samples of a closed curve
//! `(cos(A·θ), sin(B·θ))`, the boundary polyline through consecutive samples,
//! and chords joining sample `i` to sample `(i + P) mod Q`.
//!
//! This crate computes those three pieces as plain data. It knows nothing about
//! windows or GPUs; renderers consume the returned point list and edge lists.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`params`] | `CurveParameters` |
//! | [`point`] | `Point2D`, `CurveSample`, `sample_angle` |
//! | [`edges`] | `Edge`, `EdgeSet`, boundary and chord generation |
//! | [`generator`] | `generate_points`, `generate`, `Curve`, `CurveGenerator` |
//! | [`error`] | `CurveError` |
//!
//! # Quick start
//!
//! ```rust
//! use caustic_geometry::{generate, CurveParameters};
//!
//! let curve = generate(CurveParameters::new(200, 37, 1, 1)).unwrap();
//! assert_eq!(curve.sample().len(), 200);
//! assert_eq!(curve.chords().get(0).map(|e| (e.from, e.to)), Some((0, 37)));
//! ```

pub mod edges;
pub mod error;
pub mod generator;
pub mod params;
pub mod point;

pub use edges::{Edge, EdgeSet, generate_boundary_edges, generate_chord_edges};
pub use error::CurveError;
pub use generator::{Curve, CurveGenerator, generate, generate_points};
pub use params::CurveParameters;
pub use point::{CurveSample, Point2D, sample_angle};
