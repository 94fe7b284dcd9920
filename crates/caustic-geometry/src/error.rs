use thiserror::Error;

/// Errors reported by the curve generator.
///
/// Every operation validates its inputs before allocating, so an error never
/// comes with partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A parameter is outside the range the generator can work with.
    #[error("invalid curve parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
}

impl CurveError {
    pub(crate) fn non_positive_point_count(value: i32) -> Self {
        CurveError::InvalidParameter {
            name: "point_count",
            value: i64::from(value),
            reason: "must be at least 1",
        }
    }
}
