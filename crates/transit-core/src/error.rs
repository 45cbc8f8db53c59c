//! Error types for transit searches
//!
//! Provides a unified error type for all transit-* crates.

use thiserror::Error;

/// Core error type for transit search operations
#[derive(Error, Debug)]
pub enum Error {
    /// Too few valid samples for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The candidate grid contains no (period, duration) pairs
    #[error("Empty candidate grid: nothing to search")]
    EmptyGrid,

    /// The flux has zero variance, so no model can be discriminated
    #[error("Degenerate series: flux has zero variance")]
    DegenerateSeries,

    /// A period that is not strictly positive and finite
    #[error("Invalid period: {0} (must be finite and > 0)")]
    InvalidPeriod(f64),

    /// Non-finite inputs to a period comparison
    #[error("Comparison error: detected {detected} and reference {reference} must both be finite")]
    Comparison { detected: f64, reference: f64 },

    /// The normalization center is zero or non-finite
    #[error("Invalid normalization baseline: center flux {0} cannot be used as a divisor")]
    InvalidBaseline(f64),

    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Target name not present in the catalog
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Failure reported by an external collaborator (data source, sink)
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a length mismatch between parallel columns
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a parameter that must be finite and strictly positive
    pub fn not_positive(name: &str, value: f64) -> Self {
        Self::InvalidParameter(format!("{name} must be finite and > 0, got {value}"))
    }
}
