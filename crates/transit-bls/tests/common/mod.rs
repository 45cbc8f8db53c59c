//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use transit_bls::{CandidateGrid, DurationPolicy};

/// Grid bracketing the default synthetic period with a 0.005 step
pub fn bracketing_grid(duration: f64) -> CandidateGrid {
    CandidateGrid::linear(2.5, 6.0, 701, DurationPolicy::Fixed(duration)).unwrap()
}

/// Index of the grid period closest to `period`
pub fn nearest_index(grid: &CandidateGrid, period: f64) -> usize {
    grid.periods()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a - period).abs().total_cmp(&(b - period).abs()))
        .map(|(i, _)| i)
        .unwrap()
}
