//! Consumers of intermediate pipeline results
//!
//! A sink receives each stage's output as soon as it is produced, so
//! persistence or plotting can live outside the pipeline. Every hook defaults
//! to a no-op.

use transit_bls::DetectionResult;
use transit_clean::CleaningReport;
use transit_core::{Result, TimeSeries};
use transit_verify::{CatalogEntry, ComparisonRecord, Target, TransitEpochs};

/// Receives pipeline stage outputs in order
///
/// An error from any hook aborts the run.
pub trait ResultSink {
    /// Raw series before cleaning
    fn record_raw(&mut self, _target: Target, _raw: &TimeSeries) -> Result<()> {
        Ok(())
    }

    /// Cleaned series and what was removed
    fn record_cleaned(&mut self, _cleaning: &CleaningReport) -> Result<()> {
        Ok(())
    }

    /// Periodogram and best period
    fn record_detection(&mut self, _detection: &DetectionResult) -> Result<()> {
        Ok(())
    }

    /// Predicted transit midpoints
    fn record_epochs(&mut self, _epochs: &TransitEpochs) -> Result<()> {
        Ok(())
    }

    /// Detected versus catalog period
    fn record_comparison(
        &mut self,
        _entry: &CatalogEntry,
        _comparison: &ComparisonRecord,
    ) -> Result<()> {
        Ok(())
    }

    /// Check if this sink records anything
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Sink that discards everything
#[derive(Default, Clone, Copy, Debug)]
pub struct NullSink;

impl ResultSink for NullSink {
    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn record_raw(&mut self, target: Target, raw: &TimeSeries) -> Result<()> {
        (**self).record_raw(target, raw)
    }

    fn record_cleaned(&mut self, cleaning: &CleaningReport) -> Result<()> {
        (**self).record_cleaned(cleaning)
    }

    fn record_detection(&mut self, detection: &DetectionResult) -> Result<()> {
        (**self).record_detection(detection)
    }

    fn record_epochs(&mut self, epochs: &TransitEpochs) -> Result<()> {
        (**self).record_epochs(epochs)
    }

    fn record_comparison(
        &mut self,
        entry: &CatalogEntry,
        comparison: &ComparisonRecord,
    ) -> Result<()> {
        (**self).record_comparison(entry, comparison)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}
