//! Loading and Validation Error Types

use thiserror::Error;

/// A rejected sighting record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },

    /// Timestamp could not be parsed with any known layout
    #[error("row {row}: unrecognised timestamp {value:?}")]
    InvalidTimestamp { row: usize, value: String },

    /// Coordinate outside the valid geographic range
    #[error("row {row}: {field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        row: usize,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Risk level is not one of the known categories
    #[error("row {row}: unknown risk level {value:?}")]
    UnknownRiskLevel { row: usize, value: String },
}

impl ValidationError {
    /// Zero-based data row the error refers to
    pub fn row(&self) -> usize {
        match self {
            Self::MissingField { row, .. }
            | Self::InvalidTimestamp { row, .. }
            | Self::OutOfRange { row, .. }
            | Self::UnknownRiskLevel { row, .. } => *row,
        }
    }
}

/// Errors while reading a source table
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV framing or deserialization failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A sighting row failed validation under the `reject` policy
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] ValidationError),

    /// A weather or terrain row is unusable
    #[error("{table} row {row}: {reason}")]
    Malformed {
        table: &'static str,
        row: usize,
        reason: String,
    },
}
