//! Predicted transit midpoints over an observed span

use serde::{Deserialize, Serialize};
use tracing::debug;
use transit_core::{Error, Result};

/// Upper bound on the number of epochs a single call may produce
pub const MAX_EPOCHS: usize = 1 << 24;

/// Strictly increasing transit midpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitEpochs {
    /// Period the epochs are spaced by
    pub period: f64,
    /// Time from which the epochs are counted
    pub anchor: f64,
    times: Vec<f64>,
}

impl TransitEpochs {
    /// Number of epochs
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when no transit falls inside the span
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Epoch timestamps in increasing order
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Iterate over the timestamps
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.times.iter().copied()
    }

    /// First predicted transit
    pub fn first(&self) -> Option<f64> {
        self.times.first().copied()
    }

    /// Last predicted transit
    pub fn last(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Consume into the timestamp vector
    pub fn into_vec(self) -> Vec<f64> {
        self.times
    }
}

fn validate(first_time: f64, last_time: f64, period: f64) -> Result<()> {
    if !period.is_finite() || period <= 0.0 {
        return Err(Error::InvalidPeriod(period));
    }
    if !first_time.is_finite() || !last_time.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "epoch bounds must be finite, got [{first_time}, {last_time}]"
        )));
    }
    Ok(())
}

fn check_count(count: f64) -> Result<usize> {
    if count > MAX_EPOCHS as f64 {
        return Err(Error::InvalidParameter(format!(
            "span holds {count:.0} periods, more than the limit of {MAX_EPOCHS}"
        )));
    }
    Ok(count as usize)
}

/// Transits at `first_time + k * period` for `k = 0..=floor(span / period)`
///
/// Returns an empty set when `last_time < first_time`. Fails with
/// [`Error::InvalidPeriod`] for a non-positive or non-finite period, and with
/// [`Error::InvalidParameter`] for non-finite bounds or when the span holds
/// more than [`MAX_EPOCHS`] periods.
pub fn generate(first_time: f64, last_time: f64, period: f64) -> Result<TransitEpochs> {
    validate(first_time, last_time, period)?;

    let times = if last_time < first_time {
        Vec::new()
    } else {
        let cycles = check_count(((last_time - first_time) / period).floor())?;
        (0..=cycles)
            .map(|k| first_time + k as f64 * period)
            .collect()
    };
    debug!(
        "Generated {} epochs over [{:.5}, {:.5}] at period {:.6}",
        times.len(),
        first_time,
        last_time,
        period
    );

    Ok(TransitEpochs {
        period,
        anchor: first_time,
        times,
    })
}

/// Transits at `reference_epoch + k * period` inside `[first_time, last_time]`
///
/// `k` ranges over all integers, so the reference epoch may lie before, inside
/// or after the span. Fails like [`generate`], and also for a non-finite
/// reference epoch.
pub fn generate_aligned(
    first_time: f64,
    last_time: f64,
    period: f64,
    reference_epoch: f64,
) -> Result<TransitEpochs> {
    validate(first_time, last_time, period)?;
    if !reference_epoch.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "reference epoch must be finite, got {reference_epoch}"
        )));
    }

    let mut times = Vec::new();
    if last_time >= first_time {
        check_count(((last_time - first_time) / period).floor())?;
        // One extra cycle on each side absorbs rounding in the cycle bounds
        let k_min = ((first_time - reference_epoch) / period).ceil() as i64 - 1;
        let k_max = ((last_time - reference_epoch) / period).floor() as i64 + 1;
        times.extend(
            (k_min..=k_max)
                .map(|k| reference_epoch + k as f64 * period)
                .filter(|t| (first_time..=last_time).contains(t)),
        );
    }

    Ok(TransitEpochs {
        period,
        anchor: reference_epoch,
        times,
    })
}
