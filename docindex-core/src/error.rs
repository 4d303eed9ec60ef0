//! Error types for the indexing core

use thiserror::Error;

/// Errors raised by matrix construction, ranking and configuration loading
#[derive(Debug, Error)]
pub enum IndexError {
    /// Two vectors (or a vector and a weight vector) disagree on length
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A row handed to a matrix constructor has the wrong width
    #[error("ragged matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Axis selectors are 0 (rows) or 1 (columns)
    #[error("invalid axis {0}: must be 0 or 1")]
    InvalidAxis(usize),

    #[error("unknown distance metric: {0}")]
    UnknownMetric(String),

    #[error("invalid build options: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IndexError>;
