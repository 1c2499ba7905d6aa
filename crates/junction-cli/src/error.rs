//! Error types for the junction binary.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad flags or flag values
    #[error("usage error: {0}")]
    Usage(String),

    /// Input could not be read
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdin could not be read
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// Parse or configuration error from the engine
    #[error(transparent)]
    Engine(#[from] junction_circuits::Error),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
