//! Validation Error Types

use thiserror::Error;

/// Errors while ingesting detector output
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Coordinate outside the accepted pixel range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite coordinate
    #[error("{field} is not a finite number: {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
