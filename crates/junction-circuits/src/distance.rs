//! Pairwise distance table and the sorted candidate list.
//!
//! Every unordered pair is measured exactly once and stored in a condensed
//! upper-triangular buffer. The candidate list is materialized from it and
//! sorted before any joining starts; it never changes afterwards.
//!
//! # Ordering
//!
//! Candidates ascend by distance. Equal distances order by `(i, j)`, so the
//! sequence is fully determined by the input.

use std::cmp::Ordering;

use tracing::trace;

use crate::point::PointSet;

/// An unordered pair of distinct junction boxes, `i < j`, with their distance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidatePair {
    pub i: usize,
    pub j: usize,
    pub distance: f64,
}

impl CandidatePair {
    pub fn new(i: usize, j: usize, distance: f64) -> Self {
        debug_assert!(i < j, "candidate pair must be ordered: ({}, {})", i, j);
        Self { i, j, distance }
    }

    /// Join order: distance, then `i`, then `j`.
    pub fn join_order(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.i.cmp(&other.i))
            .then(self.j.cmp(&other.j))
    }
}

impl std::fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} @ {:.3}", self.i, self.j, self.distance)
    }
}

/// All pairwise distances of a point set plus the join-ordered candidates.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    point_count: usize,
    /// Row-major upper triangle without the diagonal.
    condensed: Vec<f64>,
    pairs: Vec<CandidatePair>,
}

impl DistanceTable {
    /// Measure every pair and sort the candidates.
    pub fn new(points: &PointSet) -> Self {
        let n = points.len();
        let total = pair_count(n);
        let mut condensed = Vec::with_capacity(total);
        let mut pairs = Vec::with_capacity(total);

        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].distance(&points[j]);
                condensed.push(d);
                pairs.push(CandidatePair::new(i, j, d));
            }
        }

        pairs.sort_unstable_by(CandidatePair::join_order);

        trace!("Distance table built: {} points, {} candidates", n, pairs.len());

        Self {
            point_count: n,
            condensed,
            pairs,
        }
    }

    /// Number of points the table was built from.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Number of candidate pairs: N·(N−1)/2.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Candidates in join order.
    pub fn pairs(&self) -> &[CandidatePair] {
        &self.pairs
    }

    /// Distance between two points, in either argument order.
    ///
    /// `None` if either index is out of range.
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        if a >= self.point_count || b >= self.point_count {
            return None;
        }
        match a.cmp(&b) {
            Ordering::Equal => Some(0.0),
            Ordering::Less => Some(self.condensed[condensed_index(self.point_count, a, b)]),
            Ordering::Greater => Some(self.condensed[condensed_index(self.point_count, b, a)]),
        }
    }
}

/// Number of unordered pairs among `n` points.
#[inline]
pub(crate) const fn pair_count(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// Position of `(i, j)`, `i < j`, in the condensed buffer.
#[inline]
const fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    // Rows 0..i hold (n-1) + (n-2) + ... + (n-i) entries.
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}
