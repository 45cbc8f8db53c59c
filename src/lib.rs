//! Transit detection in photometric time series
//!
//! Cleans a raw light curve, searches it for a periodic box-shaped dip with
//! Box Least Squares, predicts transit times from the detected period and
//! compares that period against a built-in catalog.
//!
//! The stages live in their own crates and are re-exported here:
//!
//! - [`transit_core`]: time series, errors, statistics and execution engines
//! - [`transit_clean`]: invalid-sample removal, sigma clipping and normalization
//! - [`transit_bls`]: candidate grids and the box search
//! - [`transit_verify`]: transit epochs, period comparison and the target catalog
//!
//! [`TransitPipeline`] chains them for one target.
//!
//! # Example
//!
//! ```rust
//! use transit_search::{GridParameters, PipelineConfig, Target, TimeSeries, TransitPipeline};
//!
//! // Thirty days of 30-minute cadence with a 100 ppm dip every 4.94 days
//! let time: Vec<f64> = (0..1440).map(|i| i as f64 / 48.0).collect();
//! let flux: Vec<f64> = time
//!     .iter()
//!     .enumerate()
//!     .map(|(i, t)| {
//!         let dip = if (t - 1.0).rem_euclid(4.94) < 0.15 { 100.0 } else { 0.0 };
//!         1.0e6 - dip + ((i * 37) % 101) as f64
//!     })
//!     .collect();
//! let raw = TimeSeries::new(time, flux).unwrap();
//!
//! let config = PipelineConfig::for_target(Target::Kepler15)
//!     .with_grid(GridParameters::default().with_periods(3.0, 8.0, 501));
//! let report = TransitPipeline::new(config).run(&raw).unwrap();
//!
//! assert!(report.matches_catalog(0.1));
//! println!("{}", report.summary());
//! ```

pub mod config;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use transit_bls;
pub use transit_clean;
pub use transit_core;
pub use transit_verify;

pub use config::{EpochAnchor, PipelineConfig};
pub use pipeline::{PipelineReport, SummaryRow, TransitPipeline};
pub use sink::{NullSink, ResultSink};
pub use source::{LightCurveSource, MemorySource};

pub use transit_bls::{
    BoxFit, BoxSearchEngine, BoxSearchParameters, CandidateGrid, DetectionResult,
    DurationPolicy, GridParameters, Periodogram,
};
pub use transit_clean::{Cleaner, CleanerParameters, CleaningReport, Normalization};
pub use transit_core::{Error, Result, TimeSeries};
pub use transit_verify::{CatalogEntry, ComparisonRecord, Target, TransitEpochs};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
