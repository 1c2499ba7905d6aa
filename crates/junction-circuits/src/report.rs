//! Running an analysis and reading its two answers.

use tracing::{debug, info, warn, Level};

use crate::config::AnalysisConfig;
use crate::distance::DistanceTable;
use crate::point::{Point, PointSet};
use crate::scheduler::{JoinScheduler, PhaseOutcome, ResolvedPair};

/// The two headline answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Answers {
    /// Product of the largest circuit sizes after the bounded phase
    pub largest_product: u64,
    /// Product of the x-coordinates of the resolved pair; `None` if no join
    /// was ever accepted
    pub connecting_metric: Option<i128>,
}

/// Final state of a run: both phase outcomes plus the snapshots the answers
/// are computed from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisReport {
    pub config: AnalysisConfig,
    pub point_count: usize,
    pub candidate_count: usize,
    pub bounded: PhaseOutcome,
    pub full: PhaseOutcome,
    /// Circuit sizes at the end of the bounded phase, largest first
    pub bounded_sizes: Vec<usize>,
    /// Circuit sizes at the end of the run, largest first
    pub final_sizes: Vec<usize>,
    pub resolved: Option<ResolvedPair>,
    /// Junction boxes referenced by `resolved`
    pub resolved_points: Option<(Point, Point)>,
}

/// Run both phases over `points`.
///
/// Never fails: exhaustion, cap and degenerate input show up in the phase
/// statuses and in [`AnalysisReport::connecting_pair_metric`].
pub fn analyze(points: &PointSet, config: &AnalysisConfig) -> AnalysisReport {
    if points.len() < 2 {
        warn!("Only {} junction boxes; no joins are possible", points.len());
    }

    let table = DistanceTable::new(points);
    let mut scheduler = JoinScheduler::new(&table).with_budget(config.budget);

    let bounded = scheduler.run_bounded(config.target_count);
    let bounded_sizes = descending(scheduler.tracker().circuit_sizes());
    if tracing::enabled!(Level::DEBUG) {
        debug!("Circuits after bounded phase: {:?}", scheduler.tracker().circuits());
    }

    let full = scheduler.run_to_full(config.hard_cap);
    let final_sizes = descending(scheduler.tracker().circuit_sizes());

    let resolved = scheduler.resolved_pair();
    let resolved_points = resolved.map(|r| (points[r.pair.i], points[r.pair.j]));

    info!(
        "Analysis done: {} boxes, {} joins accepted, {} circuits left",
        points.len(),
        scheduler.accepted(),
        scheduler.tracker().circuit_count()
    );

    AnalysisReport {
        config: config.clone(),
        point_count: points.len(),
        candidate_count: table.len(),
        bounded,
        full,
        bounded_sizes,
        final_sizes,
        resolved,
        resolved_points,
    }
}

fn descending(mut sizes: Vec<usize>) -> Vec<usize> {
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

impl AnalysisReport {
    /// Fewer than two junction boxes: nothing could be joined.
    pub fn is_degenerate(&self) -> bool {
        self.point_count < 2
    }

    /// Product of the `k` largest circuit sizes at the end of the bounded
    /// phase, or of all of them when there are fewer than `k`.
    ///
    /// With no circuits at all this is the empty product, 1.
    pub fn largest_circuits_product(&self, k: usize) -> u64 {
        self.bounded_sizes
            .iter()
            .take(k)
            .fold(1u64, |acc, &size| acc.saturating_mul(size as u64))
    }

    /// Product of the x-coordinates of the pair that completed connectivity,
    /// or of the last accepted pair if the run stopped short.
    ///
    /// `None` when no join was ever accepted.
    pub fn connecting_pair_metric(&self) -> Option<i128> {
        self.resolved_points
            .map(|(a, b)| a.x as i128 * b.x as i128)
    }

    /// Both answers, using the configured number of largest circuits.
    pub fn answers(&self) -> Answers {
        Answers {
            largest_product: self.largest_circuits_product(self.config.largest),
            connecting_metric: self.connecting_pair_metric(),
        }
    }
}
