//! Error types for junction-circuits.

use thiserror::Error;

/// Result type for junction-circuits operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before an analysis run starts.
///
/// Running out of candidates or having too few points are not errors; those
/// are reported through [`crate::PhaseStatus`] and optional answers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An input line is not three comma-separated integers.
    #[error("line {line}: {reason}: {content:?}")]
    MalformedLine {
        /// 1-based line number
        line: usize,
        /// The offending line, trimmed
        content: String,
        reason: String,
    },

    /// Analysis parameters are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
