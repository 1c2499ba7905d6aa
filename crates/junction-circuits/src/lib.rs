//! Junction Circuits
//!
//! Incremental spatial connectivity over a fixed set of 3D junction boxes.
//!
//! # Joining Model
//!
//! Every junction box starts as its own circuit. Candidate pairs are ordered
//! by Euclidean distance (ties broken by index pair) and consumed one at a
//! time:
//! - boxes in different circuits are **accepted**: their circuits merge
//! - boxes already sharing a circuit are **skipped**: the candidate is spent,
//!   nothing changes
//!
//! # Two Phases, One Cursor
//!
//! A run first applies a bounded number of joins and snapshots the circuit
//! sizes, then resumes from the same position in the candidate list until one
//! circuit holds every box. The pair whose join closed that last gap is kept
//! for reporting.
//!
//! ```
//! use junction_circuits::{analyze, parse_points, AnalysisConfig};
//!
//! let points = parse_points("0,0,0\n1,0,0\n10,0,0\n").unwrap();
//! let config = AnalysisConfig::default().with_target_count(1).with_largest(2);
//! let report = analyze(&points, &config);
//!
//! assert_eq!(report.largest_circuits_product(2), 2);
//! assert_eq!(report.connecting_pair_metric(), Some(10));
//! ```

mod circuits;
mod config;
mod distance;
mod error;
mod parse;
mod point;
mod report;
mod scheduler;

pub use circuits::CircuitTracker;
pub use config::{AnalysisConfig, BudgetPolicy};
pub use distance::{CandidatePair, DistanceTable};
pub use error::{Error, Result};
pub use parse::{parse_points, PointParseError};
pub use point::{Point, PointSet};
pub use report::{analyze, AnalysisReport, Answers};
pub use scheduler::{JoinEvent, JoinScheduler, PairSource, PhaseOutcome, PhaseStatus, ResolvedPair};

/// Default bounded-phase join budget.
pub const DEFAULT_TARGET_COUNT: usize = 1000;

/// Default cap on total accepted joins while driving to full connectivity.
pub const DEFAULT_HARD_CAP: usize = 1_000_000;

/// Default number of largest circuits multiplied for the first answer.
pub const DEFAULT_LARGEST: usize = 3;
