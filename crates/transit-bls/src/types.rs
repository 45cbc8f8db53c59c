//! Result types for box least squares searches

use serde::{Deserialize, Serialize};
use std::fmt;

/// Best box placement found at one trial period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxFit {
    /// Trial period
    pub period: f64,
    /// Box duration
    pub duration: f64,
    /// Log-likelihood improvement of the box model over a constant model
    pub power: f64,
    /// Out-of-box mean minus in-box mean (flux units)
    pub depth: f64,
    /// Depth divided by its standard error
    pub depth_snr: f64,
    /// Mid-transit time of the best placement
    pub transit_time: f64,
    /// Samples inside the box
    pub in_transit_count: usize,
}

impl BoxFit {
    /// Fit with zero power, for periods where no dip placement exists
    pub fn empty(period: f64, duration: f64) -> Self {
        Self {
            period,
            duration,
            ..Self::default()
        }
    }

    /// True when a positive-depth placement was found
    pub fn has_dip(&self) -> bool {
        self.in_transit_count > 0 && self.depth > 0.0
    }
}

impl fmt::Display for BoxFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoxFit {{ period: {:.6}, duration: {:.4}, power: {:.4}, depth: {:.4}, snr: {:.2}, t0: {:.5} }}",
            self.period, self.duration, self.power, self.depth, self.depth_snr, self.transit_time
        )
    }
}

/// Relative tolerance under which two powers count as tied
pub const POWER_TIE_TOLERANCE: f64 = 1e-12;

/// One box fit per candidate, in grid order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Periodogram {
    fits: Vec<BoxFit>,
}

impl Periodogram {
    /// Wrap per-candidate fits, which must already be in grid order
    pub fn new(fits: Vec<BoxFit>) -> Self {
        Self { fits }
    }

    /// Number of evaluated periods
    pub fn len(&self) -> usize {
        self.fits.len()
    }

    /// True when no period was evaluated
    pub fn is_empty(&self) -> bool {
        self.fits.is_empty()
    }

    /// All fits in grid order
    pub fn fits(&self) -> &[BoxFit] {
        &self.fits
    }

    /// Fit at `index`
    pub fn get(&self, index: usize) -> Option<&BoxFit> {
        self.fits.get(index)
    }

    /// Period axis
    pub fn periods(&self) -> Vec<f64> {
        self.fits.iter().map(|f| f.period).collect()
    }

    /// Power axis
    pub fn powers(&self) -> Vec<f64> {
        self.fits.iter().map(|f| f.power).collect()
    }

    /// Iterate over (period, power) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.fits.iter().map(|f| (f.period, f.power))
    }

    /// Index of the maximum power
    ///
    /// Powers within [`POWER_TIE_TOLERANCE`] (relative) of the maximum are
    /// tied, and the first tied index in grid order wins.
    pub fn argmax(&self) -> Option<usize> {
        let max = self
            .fits
            .iter()
            .map(|f| f.power)
            .fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return None;
        }
        let threshold = max - POWER_TIE_TOLERANCE * max.abs();
        self.fits.iter().position(|f| f.power >= threshold)
    }
}

/// Outcome of a period search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Period with the highest power
    pub best_period: f64,
    /// Power at `best_period`
    pub best_power: f64,
    /// Grid index of `best_period`
    pub best_index: usize,
    /// Full fit at `best_period`
    pub best_fit: BoxFit,
    /// Every evaluated period
    pub periodogram: Periodogram,
}

impl DetectionResult {
    /// Build from a non-empty periodogram; `None` if it holds no finite power
    pub fn from_periodogram(periodogram: Periodogram) -> Option<Self> {
        let best_index = periodogram.argmax()?;
        let best_fit = *periodogram.get(best_index)?;
        Some(Self {
            best_period: best_fit.period,
            best_power: best_fit.power,
            best_index,
            best_fit,
            periodogram,
        })
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Box Least Squares Result:")?;
        writeln!(f, "  Periods evaluated: {}", self.periodogram.len())?;
        writeln!(f, "  Best period: {:.6}", self.best_period)?;
        writeln!(f, "  Best power: {:.6}", self.best_power)?;
        writeln!(f, "  Best fit: {}", self.best_fit)
    }
}
