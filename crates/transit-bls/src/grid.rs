//! Candidate (period, duration) grids

use serde::{Deserialize, Serialize};
use transit_core::{Error, Result};

/// One trial period and the box duration searched at that period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub period: f64,
    pub duration: f64,
}

impl Candidate {
    /// Create a candidate, checking `0 < duration < period`
    pub fn new(period: f64, duration: f64) -> Result<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(Error::InvalidPeriod(period));
        }
        if !duration.is_finite() || duration <= 0.0 || duration >= period {
            return Err(Error::InvalidParameter(format!(
                "duration {duration} must be in (0, period = {period})"
            )));
        }
        Ok(Self { period, duration })
    }
}

/// How the box duration is chosen for each trial period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DurationPolicy {
    /// Same duration at every period
    Fixed(f64),
    /// Duration is this fraction of the period
    DutyCycle(f64),
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::Fixed(0.1)
    }
}

impl DurationPolicy {
    /// Duration for a given period
    pub fn duration_for(&self, period: f64) -> f64 {
        match *self {
            Self::Fixed(duration) => duration,
            Self::DutyCycle(fraction) => fraction * period,
        }
    }
}

/// Settings for a linearly spaced period grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParameters {
    pub min_period: f64,
    pub max_period: f64,
    /// Number of periods, endpoints included
    pub n_periods: usize,
    pub duration: DurationPolicy,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            min_period: 0.3,
            max_period: 20.0,
            n_periods: 5000,
            duration: DurationPolicy::default(),
        }
    }
}

impl GridParameters {
    /// Set the period interval
    pub fn with_periods(mut self, min_period: f64, max_period: f64, n_periods: usize) -> Self {
        self.min_period = min_period;
        self.max_period = max_period;
        self.n_periods = n_periods;
        self
    }

    /// Set the duration policy
    pub fn with_duration(mut self, duration: DurationPolicy) -> Self {
        self.duration = duration;
        self
    }

    /// Build the grid
    pub fn build(&self) -> Result<CandidateGrid> {
        CandidateGrid::linear(self.min_period, self.max_period, self.n_periods, self.duration)
    }
}

/// Ordered list of candidates evaluated by a period search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateGrid {
    candidates: Vec<Candidate>,
}

impl CandidateGrid {
    /// `n` periods linearly spaced over `[min_period, max_period]`
    ///
    /// `n = 1` yields `[min_period]`; `n = 0` yields an empty grid.
    pub fn linear(
        min_period: f64,
        max_period: f64,
        n: usize,
        duration: DurationPolicy,
    ) -> Result<Self> {
        if !min_period.is_finite() || min_period <= 0.0 {
            return Err(Error::InvalidPeriod(min_period));
        }
        if !max_period.is_finite() || max_period < min_period {
            return Err(Error::InvalidParameter(format!(
                "max_period {max_period} must be finite and >= min_period {min_period}"
            )));
        }

        let step = if n > 1 {
            (max_period - min_period) / (n - 1) as f64
        } else {
            0.0
        };
        let candidates = (0..n)
            .map(|i| {
                // Pin the last point so rounding never overshoots the interval
                let period = if n > 1 && i == n - 1 {
                    max_period
                } else {
                    min_period + i as f64 * step
                };
                Candidate::new(period, duration.duration_for(period))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { candidates })
    }

    /// Grid from explicit (period, duration) pairs, in the given order
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let candidates = pairs
            .into_iter()
            .map(|(period, duration)| Candidate::new(period, duration))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { candidates })
    }

    /// Grid with one candidate
    pub fn single(period: f64, duration: f64) -> Result<Self> {
        Self::from_pairs([(period, duration)])
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True when there is nothing to search
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates in grid order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidate at `index`
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Trial periods in grid order
    pub fn periods(&self) -> impl Iterator<Item = f64> + '_ {
        self.candidates.iter().map(|c| c.period)
    }

    /// Smallest spacing between consecutive periods (`None` below two candidates)
    pub fn resolution(&self) -> Option<f64> {
        self.candidates
            .windows(2)
            .map(|w| (w[1].period - w[0].period).abs())
            .reduce(f64::min)
    }
}
