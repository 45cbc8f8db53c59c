//! Single-pass sigma clipping
//!
//! The clip bounds are `mean ± sigma * std` of the input flux, computed once.
//! Samples outside the bounds are dropped; statistics are not recomputed on
//! the survivors.

use serde::{Deserialize, Serialize};
use transit_core::{stats, Error, Result, TimeSeries};

/// Flux statistics used to clip a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    /// Mean flux of the pre-rejection sequence
    pub mean: f64,
    /// Population standard deviation of the pre-rejection sequence
    pub std_dev: f64,
    /// Lowest retained flux
    pub lower: f64,
    /// Highest retained flux
    pub upper: f64,
}

impl ClipBounds {
    /// Compute bounds for `flux` at `sigma` standard deviations
    pub fn from_flux(flux: &[f64], sigma: f64) -> Self {
        let mean = stats::mean(flux);
        let std_dev = stats::population_std_dev(flux);
        Self {
            mean,
            std_dev,
            lower: mean - sigma * std_dev,
            upper: mean + sigma * std_dev,
        }
    }

    /// True when `flux` lies within the bounds
    ///
    /// A zero standard deviation retains every sample.
    pub fn contains(&self, flux: f64) -> bool {
        if self.std_dev == 0.0 {
            return true;
        }
        flux >= self.lower && flux <= self.upper
    }
}

/// Result of one clipping pass
#[derive(Debug, Clone)]
pub struct OutlierRejection {
    /// Surviving samples, in input order
    pub series: TimeSeries,
    /// Bounds applied (`None` for empty input)
    pub bounds: Option<ClipBounds>,
    /// Number of samples removed
    pub removed: usize,
}

/// Drop samples whose flux deviates from the mean by more than `sigma`
/// standard deviations
pub fn reject_outliers(series: &TimeSeries, sigma: f64) -> Result<OutlierRejection> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::not_positive("sigma", sigma));
    }
    if series.is_empty() {
        return Ok(OutlierRejection {
            series: series.clone(),
            bounds: None,
            removed: 0,
        });
    }

    let bounds = ClipBounds::from_flux(series.flux(), sigma);
    let kept = series.filter(|s| bounds.contains(s.flux));
    let removed = series.len() - kept.len();

    Ok(OutlierRejection {
        series: kept,
        bounds: Some(bounds),
        removed,
    })
}
