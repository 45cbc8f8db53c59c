//! Light-curve cleaning pipeline
//!
//! Steps, each applied to the output of the previous one:
//!
//! 1. drop samples with a non-finite time or flux
//! 2. single-pass sigma clipping around the mean ([`reject_outliers`])
//! 3. enforce a minimum sample count
//! 4. stable sort by time if needed
//! 5. normalize flux onto the configured baseline ([`normalize`])

use crate::normalize::{normalize, Normalization};
use crate::outliers::{reject_outliers, ClipBounds};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use transit_core::{Error, Result, Sample, TimeSeries};

/// Cleaner parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanerParameters {
    /// Outlier threshold in standard deviations
    pub sigma: f64,
    /// Minimum number of samples that must survive steps 1 and 2
    pub min_samples: usize,
    /// Flux normalization
    pub normalization: Normalization,
}

impl Default for CleanerParameters {
    fn default() -> Self {
        Self {
            sigma: 6.0,
            min_samples: 10,
            normalization: Normalization::ppm(),
        }
    }
}

impl CleanerParameters {
    /// Set the outlier threshold
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the minimum surviving sample count
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Set the normalization
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::not_positive("sigma", self.sigma));
        }
        self.normalization.validate()
    }
}

/// Cleaned series plus what was removed along the way
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// The cleaned, normalized series
    pub series: TimeSeries,
    /// Samples in the raw input
    pub input_len: usize,
    /// Samples dropped for non-finite time or flux
    pub invalid_removed: usize,
    /// Samples dropped by sigma clipping
    pub outliers_removed: usize,
    /// Clip bounds in raw flux units
    pub clip_bounds: Option<ClipBounds>,
    /// Raw flux value mapped onto the baseline
    pub center: f64,
    /// Whether the surviving samples had to be sorted by time
    pub resorted: bool,
}

/// Conditions raw photometry for the period search
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    params: CleanerParameters,
}

impl Cleaner {
    /// Create a cleaner with the given parameters
    pub fn new(params: CleanerParameters) -> Self {
        Self { params }
    }

    /// Parameters in use
    pub fn parameters(&self) -> &CleanerParameters {
        &self.params
    }

    /// Clean `raw`, returning only the resulting series
    pub fn clean(&self, raw: &TimeSeries) -> Result<TimeSeries> {
        self.clean_with_report(raw).map(|report| report.series)
    }

    /// Clean `raw` and report what each step removed
    #[instrument(skip(self, raw), fields(n = raw.len(), sigma = self.params.sigma))]
    pub fn clean_with_report(&self, raw: &TimeSeries) -> Result<CleaningReport> {
        self.params.validate()?;

        let valid = raw.filter(Sample::is_valid);
        let invalid_removed = raw.len() - valid.len();
        debug!("Removed {} invalid samples", invalid_removed);

        let rejection = reject_outliers(&valid, self.params.sigma)?;
        if let Some(bounds) = &rejection.bounds {
            debug!(
                "Clip bounds [{:.6}, {:.6}] (mean {:.6}, std {:.6}), removed {} outliers",
                bounds.lower, bounds.upper, bounds.mean, bounds.std_dev, rejection.removed
            );
        }

        let survivors = rejection.series;
        if survivors.len() < self.params.min_samples {
            return Err(Error::InsufficientData {
                expected: self.params.min_samples,
                actual: survivors.len(),
            });
        }

        let resorted = !survivors.is_time_sorted();
        let ordered = if resorted {
            debug!("Input times out of order, sorting");
            survivors.sorted_by_time()
        } else {
            survivors
        };

        let normalized = normalize(&ordered, &self.params.normalization)?;
        debug!("Normalized around center flux {:.6}", normalized.center);

        Ok(CleaningReport {
            series: normalized.series,
            input_len: raw.len(),
            invalid_removed,
            outliers_removed: rejection.removed,
            clip_bounds: rejection.bounds,
            center: normalized.center,
            resorted,
        })
    }
}

/// Clean `raw` with default parameters and the given outlier threshold
pub fn clean(raw: &TimeSeries, sigma: f64) -> Result<TimeSeries> {
    Cleaner::new(CleanerParameters::default().with_sigma(sigma)).clean(raw)
}
