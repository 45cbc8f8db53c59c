//! Core types for transit searches in photometric time series
//!
//! This crate provides the pieces every other transit-* crate builds on:
//!
//! - [`TimeSeries`]: immutable (time, flux) columns
//! - [`Error`] / [`Result`]: the error type shared across the workspace
//! - [`stats`]: mean, dispersion and median helpers
//! - [`execution`]: sequential and Rayon-backed engines for batch evaluation
//!
//! With the `test-utils` feature, [`synthetic`] generates seeded light curves
//! with injected box transits.
//!
//! # Example
//!
//! ```rust
//! use transit_core::{execution::{sequential, ExecutionEngine}, stats, TimeSeries};
//!
//! let series = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![10.0, 12.0, 11.0]).unwrap();
//! assert_eq!(stats::median(series.flux()), 11.0);
//!
//! let engine = sequential();
//! let doubled = engine.execute_batch(series.len(), |i| series.flux()[i] * 2.0);
//! assert_eq!(doubled, vec![20.0, 24.0, 22.0]);
//! ```

pub mod error;
pub mod execution;
pub mod series;
pub mod stats;
#[cfg(feature = "test-utils")]
pub mod synthetic;

pub use error::{Error, Result};
pub use execution::{
    default_engine, sequential, DefaultEngine, ExecutionEngine, ExecutionStrategy,
    SequentialEngine,
};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};
pub use series::{Sample, TimeSeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
    #[cfg(feature = "parallel")]
    pub use crate::execution::{parallel, ParallelEngine};
    pub use crate::series::{Sample, TimeSeries};
}
