//! Error types for trueno-diff
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// trueno-diff error types
#[derive(Error, Debug)]
pub enum Error {
    /// Prefix matched no checkpoint and no experiment
    #[error("Could not find checkpoint or experiment with prefix {prefix:?}")]
    NotFound {
        /// Prefix as typed by the user
        prefix: String,
    },

    /// Prefix matched more than one object across both ID namespaces
    #[error("Prefix {prefix:?} is ambiguous: it matches {matches} checkpoints or experiments\nPlease use a longer prefix.")]
    AmbiguousPrefix {
        /// Prefix as typed by the user
        prefix: String,
        /// Number of objects the prefix matched
        matches: usize,
    },

    /// Resolved experiment has no checkpoints to pick from
    #[error("Could not pick best checkpoint for experiment {experiment:?}: it does not have any checkpoints.")]
    EmptyExperiment {
        /// Short ID of the experiment
        experiment: String,
    },

    /// A checkpoint's owning experiment could not be loaded (consistency fault)
    #[error("Checkpoint {checkpoint:?} references experiment {experiment:?}, which does not exist\nThe storage is inconsistent. Please report this issue.")]
    DanglingReference {
        /// Checkpoint ID
        checkpoint: String,
        /// Missing experiment ID
        experiment: String,
    },

    /// Storage URL scheme that this build cannot read
    #[error("Unsupported storage URL: {0}\nOnly local paths and file:// URLs are supported")]
    UnsupportedStorage(String),

    /// Storage snapshot could not be read or is malformed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
