//! Alignment Error Types

use thiserror::Error;

/// Errors raised while building the hourly grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// Observations span more hours than the grid may hold
    #[error("weather observations span {span_hours} hours, limit is {max_hours}")]
    SpanTooLong { span_hours: i64, max_hours: i64 },
}
