use core::ops::Index;
use std::f64::consts::TAU;

/// A point on the curve in curve space (unit radius, +Y up).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point2D> for (f32, f32) {
    #[inline]
    fn from(p: Point2D) -> Self {
        (p.x, p.y)
    }
}

/// Angle in radians of sample `index` out of `point_count`.
///
/// Sample `i` always sits at `i · 2π / Q`; this is the only ordering guarantee
/// the generator makes.
#[inline]
pub fn sample_angle(index: usize, point_count: usize) -> f64 {
    debug_assert!(point_count > 0);
    index as f64 * TAU / point_count as f64
}

/// Ordered samples of one curve, index `i` at [`sample_angle`]`(i, len)`.
///
/// Built once per request and owned by the caller. There is no mutable access.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveSample {
    points: Vec<Point2D>,
}

impl CurveSample {
    pub(crate) fn from_points(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Point2D> {
        self.points.get(index).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Point2D> {
        self.points.iter()
    }
}

impl Index<usize> for CurveSample {
    type Output = Point2D;

    #[inline]
    fn index(&self, index: usize) -> &Point2D {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a CurveSample {
    type Item = &'a Point2D;
    type IntoIter = core::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn first_sample_is_at_zero() {
        assert_eq!(sample_angle(0, 200), 0.0);
    }

    #[test]
    fn quarter_samples() {
        assert_relative_eq!(sample_angle(1, 4), FRAC_PI_2);
        assert_relative_eq!(sample_angle(2, 4), PI);
    }

    #[test]
    fn angles_increase_monotonically() {
        let q = 37;
        for i in 1..q {
            assert!(sample_angle(i, q) > sample_angle(i - 1, q));
        }
        assert!(sample_angle(q - 1, q) < TAU);
    }
}
