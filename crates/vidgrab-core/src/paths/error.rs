//! Output directory error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or preparing an output directory.
#[derive(Debug, Error)]
pub enum OutputDirError {
    /// An empty `output_dir` was provided.
    #[error("Output directory cannot be empty")]
    Empty,

    /// The requested directory escapes the configured root.
    #[error("Output directory {path} is outside the allowed root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// A path was expected to be a directory but was not.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },

    /// Failed to make a path absolute or canonical.
    #[error("Cannot resolve path {path}: {reason}")]
    Resolve { path: PathBuf, reason: String },

    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,
}

impl OutputDirError {
    /// Whether the client asked for a directory it may not use.
    pub const fn is_rejected_request(&self) -> bool {
        matches!(self, Self::Empty | Self::OutsideRoot { .. })
    }
}
