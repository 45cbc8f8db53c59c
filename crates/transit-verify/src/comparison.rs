//! Detected period versus catalog period

use serde::{Deserialize, Serialize};
use std::fmt;
use transit_core::{Error, Result};

/// Outcome of comparing a detected period with a reference period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub detected_period: f64,
    pub reference_period: f64,
    /// `|detected_period - reference_period|`
    pub absolute_difference: f64,
}

impl ComparisonRecord {
    /// Absolute difference as a fraction of the reference period
    pub fn relative_difference(&self) -> f64 {
        self.absolute_difference / self.reference_period.abs()
    }

    /// True when the periods differ by at most `tolerance`
    pub fn is_within(&self, tolerance: f64) -> bool {
        self.absolute_difference <= tolerance
    }
}

impl fmt::Display for ComparisonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "detected {:.6} vs reference {:.6} (difference {:.6})",
            self.detected_period, self.reference_period, self.absolute_difference
        )
    }
}

/// Compare a detected period against a reference
pub fn compare(detected: f64, reference: f64) -> Result<ComparisonRecord> {
    if !detected.is_finite() || !reference.is_finite() {
        return Err(Error::Comparison {
            detected,
            reference,
        });
    }
    Ok(ComparisonRecord {
        detected_period: detected,
        reference_period: reference,
        absolute_difference: (detected - reference).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_kepler_15_example() {
        let record = compare(4.94, 4.89).unwrap();
        assert_abs_diff_eq!(record.absolute_difference, 0.05, epsilon = 1e-12);
        assert!(record.is_within(0.1));
        assert!(!record.is_within(0.01));
    }

    #[test]
    fn test_difference_is_symmetric() {
        let a = compare(3.0, 3.5247).unwrap();
        let b = compare(3.5247, 3.0).unwrap();
        assert_eq!(a.absolute_difference, b.absolute_difference);
    }

    #[test]
    fn test_relative_difference() {
        let record = compare(290.0, 289.9).unwrap();
        assert_abs_diff_eq!(record.relative_difference(), 0.1 / 289.9, epsilon = 1e-9);
    }

    #[test]
    fn test_non_finite_inputs() {
        assert!(matches!(
            compare(f64::NAN, 4.0),
            Err(Error::Comparison { .. })
        ));
        assert!(matches!(
            compare(4.0, f64::INFINITY),
            Err(Error::Comparison { .. })
        ));
    }

    #[test]
    fn test_display() {
        let text = compare(4.94, 4.89).unwrap().to_string();
        assert!(text.contains("4.940000"));
        assert!(text.contains("0.050000"));
    }
}
