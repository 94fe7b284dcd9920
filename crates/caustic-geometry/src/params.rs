use serde::{Deserialize, Serialize};

use crate::error::CurveError;

/// Shape parameters of a caustic curve.
///
/// - `point_count` (Q): number of samples on the curve, must be `>= 1`
/// - `chord_stride` (P): each sample `i` is joined to `(i + P) mod Q`
/// - `freq_x` (A): `x(i) = cos(A · 2πi/Q)`
/// - `freq_y` (B): `y(i) = sin(B · 2πi/Q)`
///
/// Only `point_count` can be invalid. The stride accepts any integer and is
/// reduced modulo `point_count`; the frequencies are used as given.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParameters {
    pub point_count: i32,
    pub chord_stride: i32,
    pub freq_x: i32,
    pub freq_y: i32,
}

impl CurveParameters {
    #[inline]
    pub const fn new(point_count: i32, chord_stride: i32, freq_x: i32, freq_y: i32) -> Self {
        Self {
            point_count,
            chord_stride,
            freq_x,
            freq_y,
        }
    }

    /// Returns `point_count` as a usable length.
    pub fn validated_point_count(&self) -> Result<usize, CurveError> {
        checked_point_count(self.point_count)
    }

    /// Returns the chord stride reduced into `[0, point_count)`.
    pub fn normalized_stride(&self) -> Result<usize, CurveError> {
        let q = self.validated_point_count()?;
        Ok(normalize_stride(q, self.chord_stride))
    }

    /// Window caption used by the viewer, e.g. `"Caustic  Q=200  P=37  A=1  B=1"`.
    pub fn title(&self) -> String {
        format!(
            "Caustic  Q={}  P={}  A={}  B={}",
            self.point_count, self.chord_stride, self.freq_x, self.freq_y
        )
    }
}

impl Default for CurveParameters {
    /// The classic cardioid-style figure: 200 samples, stride 37, unit circle.
    fn default() -> Self {
        Self::new(200, 37, 1, 1)
    }
}

pub(crate) fn checked_point_count(point_count: i32) -> Result<usize, CurveError> {
    if point_count <= 0 {
        return Err(CurveError::non_positive_point_count(point_count));
    }
    Ok(point_count as usize)
}

/// Euclidean remainder so negative strides still land in `[0, q)`.
pub(crate) fn normalize_stride(q: usize, stride: i32) -> usize {
    debug_assert!(q > 0);
    i64::from(stride).rem_euclid(q as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_fixed_build() {
        let p = CurveParameters::default();
        assert_eq!(p, CurveParameters::new(200, 37, 1, 1));
    }

    #[test]
    fn title_lists_every_parameter() {
        assert_eq!(
            CurveParameters::new(200, 37, 1, 1).title(),
            "Caustic  Q=200  P=37  A=1  B=1"
        );
    }

    #[test]
    fn zero_point_count_is_rejected() {
        let err = CurveParameters::new(0, 3, 1, 1)
            .validated_point_count()
            .unwrap_err();
        assert!(matches!(
            err,
            CurveError::InvalidParameter { name: "point_count", value: 0, .. }
        ));
    }

    #[test]
    fn negative_point_count_is_rejected() {
        let err = CurveParameters::new(-5, 3, 1, 1)
            .normalized_stride()
            .unwrap_err();
        assert!(matches!(
            err,
            CurveError::InvalidParameter { value: -5, .. }
        ));
    }

    #[test]
    fn stride_larger_than_count_wraps() {
        let wrapped = CurveParameters::new(10, 23, 1, 1).normalized_stride();
        assert_eq!(wrapped, Ok(3));
    }

    #[test]
    fn negative_stride_wraps_forward() {
        let stride = |p: i32| CurveParameters::new(10, p, 1, 1).normalized_stride();
        assert_eq!(stride(-3), Ok(7));
        assert_eq!(stride(-20), Ok(0));
    }

    #[test]
    fn extreme_stride_does_not_overflow() {
        let expected = i64::from(i32::MIN).rem_euclid(7) as usize;
        assert_eq!(normalize_stride(7, i32::MIN), expected);
        assert!(normalize_stride(7, i32::MAX) < 7);
    }
}
