use crate::edges::{EdgeSet, closed_polyline, offset_edges};
use crate::error::CurveError;
use crate::params::{CurveParameters, checked_point_count, normalize_stride};
use crate::point::{CurveSample, Point2D, sample_angle};

/// Samples `(cos(A·θᵢ), sin(B·θᵢ))` for `θᵢ = i · 2π / Q`, `i` in `[0, Q)`.
///
/// Fails with [`CurveError::InvalidParameter`] when `point_count <= 0`.
pub fn generate_points(params: CurveParameters) -> Result<CurveSample, CurveError> {
    let q = checked_point_count(params.point_count)?;
    Ok(sample_curve(q, params.freq_x, params.freq_y))
}

/// Generates points, boundary edges and chord edges in one pass over the
/// parameters.
pub fn generate(params: CurveParameters) -> Result<Curve, CurveError> {
    CurveGenerator::new(params).map(|g| g.generate())
}

fn sample_curve(q: usize, freq_x: i32, freq_y: i32) -> CurveSample {
    let a = f64::from(freq_x);
    let b = f64::from(freq_y);

    let points = (0..q)
        .map(|i| {
            let theta = sample_angle(i, q);
            Point2D::new((a * theta).cos() as f32, (b * theta).sin() as f32)
        })
        .collect();

    CurveSample::from_points(points)
}

/// One generated figure: the samples plus both edge sets derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    sample: CurveSample,
    boundary: EdgeSet,
    chords: EdgeSet,
}

impl Curve {
    #[inline]
    pub fn sample(&self) -> &CurveSample {
        &self.sample
    }

    #[inline]
    pub fn boundary(&self) -> &EdgeSet {
        &self.boundary
    }

    #[inline]
    pub fn chords(&self) -> &EdgeSet {
        &self.chords
    }
}

/// Curve generator bound to one validated set of parameters.
///
/// Validation happens once in [`CurveGenerator::new`]; every accessor then
/// recomputes its output from scratch. Nothing is cached between calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CurveGenerator {
    params: CurveParameters,
    point_count: usize,
    stride: usize,
}

impl CurveGenerator {
    pub fn new(params: CurveParameters) -> Result<Self, CurveError> {
        let point_count = checked_point_count(params.point_count)?;
        let stride = normalize_stride(point_count, params.chord_stride);
        Ok(Self {
            params,
            point_count,
            stride,
        })
    }

    #[inline]
    pub fn params(&self) -> CurveParameters {
        self.params
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Chord stride reduced into `[0, point_count)`.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn points(&self) -> CurveSample {
        sample_curve(self.point_count, self.params.freq_x, self.params.freq_y)
    }

    pub fn boundary_edges(&self) -> EdgeSet {
        closed_polyline(self.point_count)
    }

    pub fn chord_edges(&self) -> EdgeSet {
        offset_edges(self.point_count, self.stride)
    }

    pub fn generate(&self) -> Curve {
        Curve {
            sample: self.points(),
            boundary: self.boundary_edges(),
            chords: self.chord_edges(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{Edge, generate_boundary_edges, generate_chord_edges};
    use approx::assert_abs_diff_eq;

    const EPS: f32 = 1e-5;

    fn params(q: i32, p: i32, a: i32, b: i32) -> CurveParameters {
        CurveParameters::new(q, p, a, b)
    }

    #[test]
    fn returns_exactly_q_points() {
        for q in [1, 2, 3, 7, 200, 1001] {
            let points = generate_points(params(q, 1, 1, 1)).unwrap();
            assert_eq!(points.len(), q as usize);
        }
    }

    #[test]
    fn first_point_of_unit_circle_is_on_x_axis() {
        let sample = generate_points(params(200, 37, 1, 1)).unwrap();
        assert_eq!(sample[0], Point2D::new(1.0, 0.0));
    }

    #[test]
    fn four_points_form_a_square_on_the_unit_circle() {
        let sample = generate_points(params(4, 1, 1, 1)).unwrap();
        let expected: [(f32, f32); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        for (p, (x, y)) in sample.iter().zip(expected) {
            assert_abs_diff_eq!(p.x, x, epsilon = EPS);
            assert_abs_diff_eq!(p.y, y, epsilon = EPS);
        }
    }

    #[test]
    fn unit_frequencies_stay_on_unit_circle() {
        let sample = generate_points(params(97, 5, 1, 1)).unwrap();
        for p in &sample {
            assert_abs_diff_eq!(p.x * p.x + p.y * p.y, 1.0, epsilon = EPS);
        }
    }

    #[test]
    fn frequencies_scale_each_axis_independently() {
        let q = 12;
        let sample = generate_points(params(q, 1, 2, 3)).unwrap();
        for (i, p) in sample.iter().enumerate() {
            let theta = sample_angle(i, q as usize);
            assert_abs_diff_eq!(p.x, (2.0 * theta).cos() as f32, epsilon = EPS);
            assert_abs_diff_eq!(p.y, (3.0 * theta).sin() as f32, epsilon = EPS);
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let p = params(200, 37, 3, 2);
        assert_eq!(generate_points(p).unwrap(), generate_points(p).unwrap());
        assert_eq!(generate(p).unwrap(), generate(p).unwrap());
    }

    #[test]
    fn single_point_curve() {
        let curve = generate(params(1, 37, 1, 1)).unwrap();
        assert_eq!(curve.sample().points(), &[Point2D::new(1.0, 0.0)]);
        assert_eq!(curve.boundary().edges(), &[Edge::new(0, 0)]);
        assert_eq!(curve.chords().edges(), &[Edge::new(0, 0)]);
        assert_eq!(curve.boundary(), &generate_boundary_edges(1).unwrap());
    }

    #[test]
    fn invalid_point_count_yields_no_sample() {
        for q in [0, -1, i32::MIN] {
            let err = generate_points(params(q, 1, 1, 1)).unwrap_err();
            assert_eq!(
                err,
                CurveError::InvalidParameter {
                    name: "point_count",
                    value: i64::from(q),
                    reason: "must be at least 1",
                }
            );
            assert!(generate(params(q, 1, 1, 1)).is_err());
            assert!(CurveGenerator::new(params(q, 1, 1, 1)).is_err());
        }
    }

    #[test]
    fn generator_agrees_with_free_functions() {
        let p = params(50, -7, 2, 1);
        let g = CurveGenerator::new(p).unwrap();
        assert_eq!(g.stride(), 43);
        assert_eq!(g.points(), generate_points(p).unwrap());
        assert_eq!(g.boundary_edges(), generate_boundary_edges(50).unwrap());
        assert_eq!(g.chord_edges(), generate_chord_edges(50, -7).unwrap());
    }

    #[test]
    fn curve_parts_share_one_point_count() {
        let curve = generate(params(31, 4, 1, 1)).unwrap();
        assert_eq!(curve.sample().len(), 31);
        assert_eq!(curve.boundary().len(), 31);
        assert_eq!(curve.chords().len(), 31);
        assert_eq!(curve.chords().segments(curve.sample()).count(), 31);
    }
}
