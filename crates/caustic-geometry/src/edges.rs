use crate::error::CurveError;
use crate::params::{checked_point_count, normalize_stride};
use crate::point::{CurveSample, Point2D};

/// Index pair into a [`CurveSample`]. Both indices are `< point_count`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    #[inline]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// `true` when both ends refer to the same sample (stride 0, or `Q == 1`).
    #[inline]
    pub fn is_self_loop(self) -> bool {
        self.from == self.to
    }
}

impl From<(usize, usize)> for Edge {
    #[inline]
    fn from((from, to): (usize, usize)) -> Self {
        Self::new(from, to)
    }
}

/// Ordered list of edges; entry `i` always starts at sample `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: Vec<Edge>,
}

impl EdgeSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Edge> {
        self.edges.get(index).copied()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Endpoint pairs of every edge, resolved against `sample`.
    ///
    /// Edges whose indices fall outside `sample` are skipped, which only happens
    /// when the set and the sample were generated for different point counts.
    pub fn segments<'a>(
        &'a self,
        sample: &'a CurveSample,
    ) -> impl Iterator<Item = (Point2D, Point2D)> + 'a {
        debug_assert_eq!(self.len(), sample.len(), "edge set / sample size mismatch");
        self.edges
            .iter()
            .filter_map(move |e| Some((sample.get(e.from)?, sample.get(e.to)?)))
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = core::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Closed polyline `(i, (i + 1) mod Q)` for every sample.
pub fn generate_boundary_edges(point_count: i32) -> Result<EdgeSet, CurveError> {
    let q = checked_point_count(point_count)?;
    Ok(closed_polyline(q))
}

/// Chords `(i, (i + stride) mod Q)` for every sample.
///
/// `stride` is reduced into `[0, Q)` first, so negative strides are accepted.
/// A stride that reduces to 0 yields `Q` self-loops.
pub fn generate_chord_edges(point_count: i32, stride: i32) -> Result<EdgeSet, CurveError> {
    let q = checked_point_count(point_count)?;
    Ok(offset_edges(q, normalize_stride(q, stride)))
}

/// `(i, (i + 1) mod q)`. For `q == 1` this is the single self-loop `(0, 0)`.
pub(crate) fn closed_polyline(q: usize) -> EdgeSet {
    offset_edges(q, 1 % q)
}

/// `offset` must already be in `[0, q)`.
pub(crate) fn offset_edges(q: usize, offset: usize) -> EdgeSet {
    debug_assert!(offset < q);
    let edges = (0..q).map(|i| Edge::new(i, (i + offset) % q)).collect();
    EdgeSet { edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_has_one_edge_per_point() {
        let set = generate_boundary_edges(12).unwrap();
        assert_eq!(set.len(), 12);
        for (i, e) in set.iter().enumerate() {
            assert_eq!(*e, Edge::new(i, (i + 1) % 12));
        }
    }

    #[test]
    fn boundary_is_a_single_cycle() {
        let q = 9;
        let set = generate_boundary_edges(q as i32).unwrap();
        let mut visited = vec![false; q];
        let mut at = 0;
        for _ in 0..q {
            assert!(!visited[at], "index {at} visited twice");
            visited[at] = true;
            at = set.get(at).unwrap().to;
        }
        assert_eq!(at, 0);
        assert!(visited.iter().all(|&v| v));
    }

    #[test]
    fn single_point_boundary_is_self_loop() {
        let set = generate_boundary_edges(1).unwrap();
        assert_eq!(set.edges(), &[Edge::new(0, 0)]);
        assert!(set.get(0).unwrap().is_self_loop());
    }

    #[test]
    fn two_point_boundary_goes_there_and_back() {
        let set = generate_boundary_edges(2).unwrap();
        assert_eq!(set.edges(), &[Edge::new(0, 1), Edge::new(1, 0)]);
    }

    #[test]
    fn chords_for_the_fixed_build() {
        let set = generate_chord_edges(200, 37).unwrap();
        assert_eq!(set.len(), 200);
        assert_eq!(set.get(0), Some(Edge::new(0, 37)));
        assert_eq!(set.get(163), Some(Edge::new(163, 0)));
        assert_eq!(set.get(199), Some(Edge::new(199, 36)));
    }

    #[test]
    fn zero_stride_degenerates_to_self_loops() {
        let set = generate_chord_edges(5, 0).unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.iter().all(|e| e.is_self_loop()));
    }

    #[test]
    fn stride_equal_to_count_degenerates_too() {
        let set = generate_chord_edges(5, 5).unwrap();
        assert!(set.iter().all(|e| e.is_self_loop()));
    }

    #[test]
    fn negative_stride_matches_its_positive_residue() {
        assert_eq!(generate_chord_edges(10, -3), generate_chord_edges(10, 7));
        assert_eq!(generate_chord_edges(10, -13), generate_chord_edges(10, 7));
    }

    #[test]
    fn chord_indices_stay_in_range() {
        for stride in [-1000, -1, 0, 1, 999, i32::MAX, i32::MIN] {
            let set = generate_chord_edges(13, stride).unwrap();
            assert!(set.iter().all(|e| e.from < 13 && e.to < 13));
        }
    }

    #[test]
    fn invalid_point_count_fails_before_output() {
        assert!(matches!(
            generate_boundary_edges(0),
            Err(CurveError::InvalidParameter { name: "point_count", .. })
        ));
        assert!(generate_chord_edges(-4, 1).is_err());
    }

    #[test]
    fn segments_resolve_endpoints() {
        let sample = CurveSample::from_points(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
        ]);
        let set = generate_boundary_edges(3).unwrap();
        let segs: Vec<_> = set.segments(&sample).collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[2], (Point2D::new(1.0, 1.0), Point2D::new(0.0, 0.0)));
    }
}
