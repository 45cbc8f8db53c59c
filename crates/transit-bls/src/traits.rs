//! Core traits for period searches
//!
//! A period search scores every candidate of a grid against a cleaned series
//! and returns the full periodogram together with its best period.

use crate::grid::CandidateGrid;
use crate::types::DetectionResult;
use transit_core::{Result, TimeSeries};

/// Properties of a period search that don't depend on the data
pub trait PeriodSearchProperties {
    /// Get the name of the search algorithm
    fn algorithm_name(&self) -> &'static str;

    /// Get the minimum sample size required for a search
    fn minimum_sample_size(&self) -> usize;
}

/// Search a series for the period that best explains it
pub trait PeriodSearch: PeriodSearchProperties {
    /// Evaluate every candidate in `grid` against `series`
    ///
    /// Implementations must return one periodogram entry per candidate, in
    /// grid order, and never a partial result.
    fn search(&self, series: &TimeSeries, grid: &CandidateGrid) -> Result<DetectionResult>;
}
