//! Box Least Squares period search
//!
//! Folds a cleaned light curve at every trial period of a [`CandidateGrid`]
//! and finds the box-shaped dip that best explains the folded flux. The
//! search returns the full [`Periodogram`] and the period with the highest
//! power.
//!
//! # Architecture
//!
//! - [`grid`]: candidate (period, duration) grids
//! - [`kernel`]: single-period evaluation over a prepared series
//! - [`search`]: [`BoxSearchEngine`], which drives the kernel over a grid
//!   with any [`ExecutionEngine`](transit_core::ExecutionEngine)
//! - [`types`]: [`BoxFit`], [`Periodogram`] and [`DetectionResult`]
//!
//! # Example
//!
//! ```rust
//! use transit_bls::{BoxSearchEngine, BoxSearchParameters, CandidateGrid, DurationPolicy};
//! use transit_core::TimeSeries;
//!
//! // Dip of 4 units lasting 0.2 every 3.0 time units
//! let time: Vec<f64> = (0..3000).map(|i| i as f64 * 0.01).collect();
//! let flux = time
//!     .iter()
//!     .map(|t| if (t % 3.0) < 0.2 { 96.0 } else { 100.0 })
//!     .collect();
//! let series = TimeSeries::new(time, flux).unwrap();
//!
//! let grid = CandidateGrid::linear(2.0, 4.0, 201, DurationPolicy::Fixed(0.2)).unwrap();
//! let engine = BoxSearchEngine::sequential(BoxSearchParameters::default());
//! let result = engine.search(&series, &grid).unwrap();
//!
//! assert!((result.best_period - 3.0).abs() < 0.02);
//! assert!(result.best_fit.depth > 3.0);
//! ```

pub mod grid;
pub mod kernel;
pub mod search;
pub mod traits;
pub mod types;

pub use grid::{Candidate, CandidateGrid, DurationPolicy, GridParameters};
pub use kernel::{fold_phase, BoxKernel, MAX_PHASE_BINS, MIN_SEARCH_SAMPLES};
pub use search::{search, BoxSearchEngine, BoxSearchParameters};
pub use traits::{PeriodSearch, PeriodSearchProperties};
pub use types::{BoxFit, DetectionResult, Periodogram, POWER_TIE_TOLERANCE};
