//! Error types for Propscope.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Propscope operations.
pub type Result<T> = std::result::Result<T, ScatterError>;

/// Errors that can occur in Propscope.
#[derive(Debug, Error)]
pub enum ScatterError {
    /// Dataset input is not a usable sequence of records.
    ///
    /// Aborts the render cycle; nothing already on screen is touched.
    #[error("Malformed dataset: {reason}")]
    MalformedDataset {
        /// What was wrong with the input.
        reason: String,
    },

    /// Failed to open a dataset file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Dataset file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl ScatterError {
    /// Create a MalformedDataset error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDataset {
            reason: reason.into(),
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Whether this error aborted a render cycle because of bad input.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDataset { .. })
    }
}
