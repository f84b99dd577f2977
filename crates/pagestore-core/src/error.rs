//! Error types for the pagestore system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for pagestore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the pagestore system
#[derive(Error, Debug)]
pub enum Error {
    /// The ingested source had fewer lines than the configured minimum
    #[error("Input too small: {lines} line(s), at least {min} required")]
    InputTooSmall {
        /// Number of lines read
        lines: usize,
        /// Configured minimum
        min: usize,
    },

    /// A raw line could not be parsed into an entry
    #[error("Invalid record on line {line}: {reason}")]
    InvalidRecord {
        /// 1-based line number within the raw collection
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The same id appeared twice within one parse pass
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// Too few entries survived the threshold filter
    #[error("Insufficient accepted entries: {accepted}, at least {min} required")]
    InsufficientAccepted {
        /// Number of entries above the threshold
        accepted: usize,
        /// Configured minimum
        min: usize,
    },

    /// Positional lookup past the end of the entry collection
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Current number of entries
        len: usize,
    },

    /// Key lookup found no entry
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// I/O errors while reading the source or writing telemetry
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Telemetry sink errors
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid record error
    pub fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Create a duplicate id error
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    /// Create a "not found" error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a telemetry error
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }

    /// Whether the failed operation may have advanced the raw lines while
    /// leaving the parsed entries at their previous value
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord { .. } | Self::DuplicateId(_) | Self::InsufficientAccepted { .. }
        )
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
