//! Photometric time series
//!
//! A [`TimeSeries`] stores time and flux as two parallel columns. It has no
//! mutable accessors: every transformation produces a new series.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A single photometric observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Observation time (e.g. BKJD days)
    pub time: f64,
    /// Measured flux
    pub flux: f64,
}

impl Sample {
    /// Create a new sample
    pub fn new(time: f64, flux: f64) -> Self {
        Self { time, flux }
    }

    /// Both fields are finite numbers
    pub fn is_valid(&self) -> bool {
        self.time.is_finite() && self.flux.is_finite()
    }
}

/// Ordered sequence of (time, flux) samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    time: Vec<f64>,
    flux: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from parallel time and flux columns
    ///
    /// Fails if the columns have different lengths. No other validation is
    /// performed: raw series may contain NaNs and unsorted times.
    pub fn new(time: Vec<f64>, flux: Vec<f64>) -> Result<Self> {
        if time.len() != flux.len() {
            return Err(Error::size_mismatch(time.len(), flux.len(), "flux column"));
        }
        Ok(Self { time, flux })
    }

    /// Build a series from an iterator of samples
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = Sample>,
    {
        let (time, flux) = samples.into_iter().map(|s| (s.time, s.flux)).unzip();
        Self { time, flux }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// True when the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time column
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Flux column
    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    /// Iterate over samples in storage order
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.time
            .iter()
            .zip(&self.flux)
            .map(|(&time, &flux)| Sample { time, flux })
    }

    /// Time of the first stored sample
    pub fn first_time(&self) -> Option<f64> {
        self.time.first().copied()
    }

    /// Time of the last stored sample
    pub fn last_time(&self) -> Option<f64> {
        self.time.last().copied()
    }

    /// Observed span `last_time - first_time` (0 for fewer than two samples)
    pub fn span(&self) -> f64 {
        match (self.first_time(), self.last_time()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// True when times are non-decreasing
    pub fn is_time_sorted(&self) -> bool {
        self.time.windows(2).all(|w| w[0] <= w[1])
    }

    /// Keep the samples for which `keep` returns true, preserving order
    pub fn filter<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Sample) -> bool,
    {
        Self::from_samples(self.samples().filter(|s| keep(s)))
    }

    /// Copy of the series with samples stably sorted by time
    pub fn sorted_by_time(&self) -> Self {
        let mut samples: Vec<Sample> = self.samples().collect();
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self::from_samples(samples)
    }

    /// Copy of the series with the flux column replaced by `f(flux)`
    pub fn map_flux<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            time: self.time.clone(),
            flux: self.flux.iter().map(|&x| f(x)).collect(),
        }
    }
}
