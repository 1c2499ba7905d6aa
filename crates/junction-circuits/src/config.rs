//! Analysis parameters.

use crate::error::{Error, Result};
use crate::{DEFAULT_HARD_CAP, DEFAULT_LARGEST, DEFAULT_TARGET_COUNT};

/// Which candidates count toward the bounded-phase join budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BudgetPolicy {
    /// Only joins that merged two circuits.
    #[default]
    Accepted,
    /// Every candidate consumed, skipped ones included.
    Attempted,
}

/// Parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Bounded-phase join budget
    pub target_count: usize,
    /// Maximum total accepted joins while driving to full connectivity
    pub hard_cap: usize,
    /// Number of largest circuits multiplied for the first answer
    pub largest: usize,
    /// How the bounded-phase budget is counted
    pub budget: BudgetPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_count: DEFAULT_TARGET_COUNT,
            hard_cap: DEFAULT_HARD_CAP,
            largest: DEFAULT_LARGEST,
            budget: BudgetPolicy::Accepted,
        }
    }
}

impl AnalysisConfig {
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_hard_cap(mut self, hard_cap: usize) -> Self {
        self.hard_cap = hard_cap;
        self
    }

    pub fn with_largest(mut self, largest: usize) -> Self {
        self.largest = largest;
        self
    }

    pub fn with_budget(mut self, budget: BudgetPolicy) -> Self {
        self.budget = budget;
        self
    }

    /// Reject parameters that cannot produce a meaningful answer.
    pub fn validate(&self) -> Result<()> {
        if self.largest == 0 {
            return Err(Error::InvalidConfig(
                "largest circuit count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
