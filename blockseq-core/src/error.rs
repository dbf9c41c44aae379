//! Error types for sequence and cursor operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, reading or traversing a sequence.
///
/// Every error is raised before any state is touched, so a failed call leaves
/// the container or cursor exactly as it was.
#[derive(Debug, Error)]
pub enum Error {
    /// A construction parameter is outside its accepted range.
    #[error("Invalid argument '{name}': {value} (must be at least 1)")]
    InvalidArgument {
        /// Name of the rejected parameter
        name: &'static str,
        /// The rejected value
        value: i64,
    },

    /// Indexed read outside the live elements.
    #[error("Index {index} out of range for sequence of length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of live elements at the time of the read
        len: usize,
    },

    /// A mandatory collection argument was absent.
    #[error("Missing required argument '{argument}'")]
    NullReference {
        /// Name of the absent argument
        argument: &'static str,
    },

    /// The operation is intentionally not provided by this container.
    #[error("Operation '{operation}' is not supported")]
    Unsupported {
        /// Name of the refused operation
        operation: &'static str,
    },

    /// Cursor traversal past either end of the sequence.
    #[error("No element at cursor position")]
    EndOfSequence,

    /// Growth configuration has the wrong shape or value types.
    #[error("Invalid growth configuration: {0}")]
    InvalidConfig(String),

    /// Growth configuration file could not be read.
    #[error("Growth configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// JSON decoding error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::Unsupported`].
    pub fn unsupported(operation: &'static str) -> Self {
        Error::Unsupported { operation }
    }

    /// True for [`Error::EndOfSequence`].
    pub fn is_end_of_sequence(&self) -> bool {
        matches!(self, Error::EndOfSequence)
    }
}
