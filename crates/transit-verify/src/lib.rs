//! Verification of detected transit periods
//!
//! - [`epochs`]: predicted transit midpoints over the observed span
//! - [`comparison`]: detected period against a catalog period
//! - [`catalog`]: the built-in [`Target`] catalog
//!
//! # Example
//!
//! ```rust
//! use transit_verify::{compare, generate, Target};
//!
//! let epochs = generate(0.0, 10.0, 4.0).unwrap();
//! assert_eq!(epochs.times(), &[0.0, 4.0, 8.0]);
//!
//! let target: Target = "Kepler-15".parse().unwrap();
//! let record = compare(4.89, target.reference_period()).unwrap();
//! assert!(record.is_within(0.1));
//! ```

pub mod catalog;
pub mod comparison;
pub mod epochs;

pub use catalog::{CatalogEntry, Target};
pub use comparison::{compare, ComparisonRecord};
pub use epochs::{generate, generate_aligned, TransitEpochs, MAX_EPOCHS};
