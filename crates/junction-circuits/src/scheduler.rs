//! Drives the join process over the sorted candidate list.
//!
//! The scheduler owns the [`CircuitTracker`] and a cursor into the
//! [`DistanceTable`] candidates. Both phases of a run advance the same cursor:
//!
//! 1. **Bounded**: apply candidates until the join budget is spent or the
//!    candidates run out.
//! 2. **To full**: resume until one circuit holds every junction box, the
//!    accepted-join cap is hit, or the candidates run out.
//!
//! Running out of candidates or hitting the cap is a status, not an error.

use tracing::{debug, info, warn};

use crate::circuits::CircuitTracker;
use crate::config::BudgetPolicy;
use crate::distance::{CandidatePair, DistanceTable};

/// Outcome of processing one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinEvent {
    /// The pair sat in different circuits, which are now merged.
    Accepted(CandidatePair),
    /// The pair already shared a circuit; only the candidate was consumed.
    Skipped(CandidatePair),
}

impl JoinEvent {
    pub fn pair(&self) -> CandidatePair {
        match self {
            JoinEvent::Accepted(pair) | JoinEvent::Skipped(pair) => *pair,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, JoinEvent::Accepted(_))
    }
}

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PhaseStatus {
    /// The phase reached its goal.
    Completed,
    /// Candidates ran out first.
    Exhausted,
    /// The accepted-join cap was reached before full connectivity.
    CapReached,
}

impl PhaseStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, PhaseStatus::Completed)
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseStatus::Completed => write!(f, "completed"),
            PhaseStatus::Exhausted => write!(f, "candidates exhausted"),
            PhaseStatus::CapReached => write!(f, "join cap reached"),
        }
    }
}

/// Counters for a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseOutcome {
    pub status: PhaseStatus,
    /// Joins accepted during this phase
    pub accepted: usize,
    /// Candidates skipped during this phase
    pub skipped: usize,
}

impl PhaseOutcome {
    /// Candidates consumed during this phase.
    pub fn consumed(&self) -> usize {
        self.accepted + self.skipped
    }
}

/// Where a resolved pair came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PairSource {
    /// The join that first made one circuit of every junction box.
    FullConnectivity,
    /// The most recent accepted join; full connectivity was never reached.
    LastAccepted,
}

/// The pair reported for the second answer, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedPair {
    pub pair: CandidatePair,
    pub source: PairSource,
}

/// Join driver holding the shared cursor.
#[derive(Debug)]
pub struct JoinScheduler<'a> {
    table: &'a DistanceTable,
    tracker: CircuitTracker,
    budget: BudgetPolicy,
    cursor: usize,
    accepted: usize,
    skipped: usize,
    last_accepted: Option<CandidatePair>,
    connecting: Option<CandidatePair>,
}

impl<'a> JoinScheduler<'a> {
    /// Start with every junction box in its own circuit.
    pub fn new(table: &'a DistanceTable) -> Self {
        Self {
            table,
            tracker: CircuitTracker::new(table.point_count()),
            budget: BudgetPolicy::default(),
            cursor: 0,
            accepted: 0,
            skipped: 0,
            last_accepted: None,
            connecting: None,
        }
    }

    /// Set how the bounded-phase budget is counted.
    pub fn with_budget(mut self, budget: BudgetPolicy) -> Self {
        self.budget = budget;
        self
    }

    pub fn tracker(&self) -> &CircuitTracker {
        &self.tracker
    }

    /// Index of the next candidate to process.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Candidates not yet consumed.
    pub fn remaining(&self) -> usize {
        self.table.len() - self.cursor
    }

    /// Accepted joins across all phases.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Skipped candidates across all phases.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn last_accepted(&self) -> Option<CandidatePair> {
        self.last_accepted
    }

    /// The join that first produced full connectivity, if it happened.
    pub fn connecting_pair(&self) -> Option<CandidatePair> {
        self.connecting
    }

    /// The last accepted join, reported only while full connectivity is
    /// still missing.
    pub fn fallback_pair(&self) -> Option<CandidatePair> {
        match self.connecting {
            Some(_) => None,
            None => self.last_accepted,
        }
    }

    /// Connecting pair if there is one, otherwise the last accepted pair.
    pub fn resolved_pair(&self) -> Option<ResolvedPair> {
        self.connecting
            .map(|pair| ResolvedPair {
                pair,
                source: PairSource::FullConnectivity,
            })
            .or_else(|| {
                self.last_accepted.map(|pair| ResolvedPair {
                    pair,
                    source: PairSource::LastAccepted,
                })
            })
    }

    /// Process the next candidate. `None` once every candidate is consumed.
    pub fn step(&mut self) -> Option<JoinEvent> {
        let pair = *self.table.pairs().get(self.cursor)?;
        self.cursor += 1;

        if self.tracker.same_circuit(pair.i, pair.j) {
            self.skipped += 1;
            debug!("Skipped {} (already one circuit)", pair);
            return Some(JoinEvent::Skipped(pair));
        }

        self.tracker.merge(pair.i, pair.j);
        self.accepted += 1;
        self.last_accepted = Some(pair);
        debug!(
            "Accepted {} -> circuit of {} ({} circuits left)",
            pair,
            self.tracker.circuit_size_of(pair.i),
            self.tracker.circuit_count()
        );

        if self.connecting.is_none() && self.tracker.is_fully_connected() {
            self.connecting = Some(pair);
            info!("Full connectivity after {} accepted joins via {}", self.accepted, pair);
        }

        Some(JoinEvent::Accepted(pair))
    }

    /// Spend a budget of `target_count` joins.
    ///
    /// Under [`BudgetPolicy::Accepted`] skipped candidates are consumed but do
    /// not count; under [`BudgetPolicy::Attempted`] they do.
    pub fn run_bounded(&mut self, target_count: usize) -> PhaseOutcome {
        let (accepted_before, skipped_before) = (self.accepted, self.skipped);
        let mut counted = 0;
        let mut status = PhaseStatus::Completed;

        while counted < target_count {
            match self.step() {
                None => {
                    status = PhaseStatus::Exhausted;
                    break;
                }
                Some(JoinEvent::Accepted(_)) => counted += 1,
                Some(JoinEvent::Skipped(_)) => {
                    if self.budget == BudgetPolicy::Attempted {
                        counted += 1;
                    }
                }
            }
        }

        let outcome = PhaseOutcome {
            status,
            accepted: self.accepted - accepted_before,
            skipped: self.skipped - skipped_before,
        };

        if status == PhaseStatus::Exhausted {
            warn!(
                "Candidates exhausted after {} of {} budgeted joins ({} accepted, {} skipped)",
                counted, target_count, outcome.accepted, outcome.skipped
            );
        } else {
            info!(
                "Bounded phase done: {} accepted, {} skipped, {} circuits",
                outcome.accepted,
                outcome.skipped,
                self.tracker.circuit_count()
            );
        }

        outcome
    }

    /// Resume until one circuit holds every junction box.
    ///
    /// Stops early once total accepted joins reach `hard_cap` or the
    /// candidates run out; the last accepted pair then stands in for the
    /// connecting pair.
    pub fn run_to_full(&mut self, hard_cap: usize) -> PhaseOutcome {
        let (accepted_before, skipped_before) = (self.accepted, self.skipped);
        let mut status = PhaseStatus::Completed;

        while !self.tracker.is_fully_connected() {
            if self.accepted >= hard_cap {
                status = PhaseStatus::CapReached;
                break;
            }
            if self.step().is_none() {
                status = PhaseStatus::Exhausted;
                break;
            }
        }

        let outcome = PhaseOutcome {
            status,
            accepted: self.accepted - accepted_before,
            skipped: self.skipped - skipped_before,
        };

        match status {
            PhaseStatus::Completed => info!(
                "Connectivity phase done: {} accepted, {} skipped",
                outcome.accepted, outcome.skipped
            ),
            PhaseStatus::CapReached => warn!(
                "Join cap {} reached with {} circuits left; using last accepted pair",
                hard_cap,
                self.tracker.circuit_count()
            ),
            PhaseStatus::Exhausted => warn!(
                "Candidates exhausted with {} circuits left; using last accepted pair",
                self.tracker.circuit_count()
            ),
        }

        outcome
    }
}
