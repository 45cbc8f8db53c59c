//! Light-curve cleaning for transit searches
//!
//! Conditions raw photometry before a period search: removes invalid samples,
//! rejects outliers with a single sigma-clipping pass, and rescales flux onto
//! a fixed baseline (parts per million by default).
//!
//! # Usage
//!
//! ```rust
//! use transit_clean::{Cleaner, CleanerParameters};
//! use transit_core::TimeSeries;
//!
//! let time: Vec<f64> = (0..20).map(|i| i as f64 * 0.02).collect();
//! let mut flux = vec![1200.0; 20];
//! flux[3] = f64::NAN;
//!
//! let raw = TimeSeries::new(time, flux).unwrap();
//! let cleaner = Cleaner::new(CleanerParameters::default().with_sigma(6.0));
//! let cleaned = cleaner.clean(&raw).unwrap();
//!
//! assert_eq!(cleaned.len(), 19);
//! assert!(cleaned.flux().iter().all(|&f| f == 1_000_000.0));
//! ```

pub mod cleaner;
pub mod normalize;
pub mod outliers;

pub use cleaner::{clean, Cleaner, CleanerParameters, CleaningReport};
pub use normalize::{normalize, CenterStatistic, Normalization, NormalizedSeries};
pub use outliers::{reject_outliers, ClipBounds, OutlierRejection};
