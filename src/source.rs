//! Raw light-curve providers

use std::collections::HashMap;
use transit_core::{Error, Result, TimeSeries};
use transit_verify::Target;

/// Supplies raw photometry for a catalog target
///
/// Implementations that talk to an archive report their failures as
/// [`Error::Collaborator`].
pub trait LightCurveSource {
    fn fetch_raw_series(&self, target: Target) -> Result<TimeSeries>;
}

/// Source backed by series already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<Target, TimeSeries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the series for `target`
    pub fn insert(&mut self, target: Target, series: TimeSeries) -> Option<TimeSeries> {
        self.series.insert(target, series)
    }

    /// Builder form of [`MemorySource::insert`]
    pub fn with_series(mut self, target: Target, series: TimeSeries) -> Self {
        self.series.insert(target, series);
        self
    }

    pub fn contains(&self, target: Target) -> bool {
        self.series.contains_key(&target)
    }
}

impl LightCurveSource for MemorySource {
    fn fetch_raw_series(&self, target: Target) -> Result<TimeSeries> {
        self.series.get(&target).cloned().ok_or_else(|| {
            Error::Collaborator(anyhow::anyhow!(
                "no light curve loaded for {} ({})",
                target,
                target.entry().catalog_id
            ))
        })
    }
}

impl<T: LightCurveSource + ?Sized> LightCurveSource for &T {
    fn fetch_raw_series(&self, target: Target) -> Result<TimeSeries> {
        (**self).fetch_raw_series(target)
    }
}
