//! Shared utilities for integration tests

pub use approx::assert_relative_eq;

/// Generate series lengths that exercise odd/even and tiny inputs
pub fn edge_case_lengths() -> Vec<usize> {
    vec![1, 2, 3, 4, 5, 7, 8, 16, 17, 100, 101]
}

/// Deterministic, unsorted flux values of the given length
pub fn scrambled(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7919) % 101) as f64 * 0.5 - 10.0).collect()
}
