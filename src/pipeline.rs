//! End-to-end transit search for one catalog target
//!
//! clean → search → epochs → compare, notifying a [`ResultSink`] after each
//! stage. Any stage error ends the run; no partial report is produced.

use crate::config::{EpochAnchor, PipelineConfig};
use crate::sink::{NullSink, ResultSink};
use crate::source::LightCurveSource;
use serde::Serialize;
use std::fmt;
use tracing::{info, instrument, warn};
use transit_bls::{BoxSearchEngine, DetectionResult};
use transit_clean::{Cleaner, CleaningReport};
use transit_core::execution::{default_engine, DefaultEngine, ExecutionEngine};
use transit_core::{Error, Result, TimeSeries};
use transit_verify::{
    compare, generate, generate_aligned, CatalogEntry, ComparisonRecord, Target, TransitEpochs,
};

/// One row of the period comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub planet: &'static str,
    pub detected_period: f64,
    pub reference_period: f64,
    pub difference: f64,
}

impl SummaryRow {
    /// Column names, in display order
    pub const HEADER: [&'static str; 4] = [
        "Planet",
        "Detected period (days)",
        "Reference period (days)",
        "Difference (days)",
    ];
}

impl fmt::Display for SummaryRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>12.6} {:>12.6} {:>12.6}",
            self.planet, self.detected_period, self.reference_period, self.difference
        )
    }
}

/// Everything a pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub target: Target,
    pub entry: CatalogEntry,
    pub cleaning: CleaningReport,
    pub detection: DetectionResult,
    pub epochs: TransitEpochs,
    pub comparison: ComparisonRecord,
}

impl PipelineReport {
    /// Comparison table row for this run
    pub fn summary(&self) -> SummaryRow {
        SummaryRow {
            planet: self.entry.planet_name,
            detected_period: self.comparison.detected_period,
            reference_period: self.comparison.reference_period,
            difference: self.comparison.absolute_difference,
        }
    }

    /// True when the detected period is within `tolerance` days of the catalog
    pub fn matches_catalog(&self, tolerance: f64) -> bool {
        self.comparison.is_within(tolerance)
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transit search: {} ({})", self.target, self.entry.planet_name)?;
        writeln!(
            f,
            "  Samples: {} raw, {} invalid, {} outliers, {} cleaned",
            self.cleaning.input_len,
            self.cleaning.invalid_removed,
            self.cleaning.outliers_removed,
            self.cleaning.series.len()
        )?;
        writeln!(
            f,
            "  Best period: {:.6} d (power {:.3}, depth {:.2}, snr {:.1})",
            self.detection.best_period,
            self.detection.best_power,
            self.detection.best_fit.depth,
            self.detection.best_fit.depth_snr
        )?;
        writeln!(f, "  Predicted transits: {}", self.epochs.len())?;
        writeln!(f, "  {}", SummaryRow::HEADER.join(" | "))?;
        write!(f, "  {}", self.summary())
    }
}

/// Runs clean → search → epochs → compare for the configured target
#[derive(Debug, Clone)]
pub struct TransitPipeline<E: ExecutionEngine = DefaultEngine> {
    config: PipelineConfig,
    engine: E,
}

impl TransitPipeline<DefaultEngine> {
    /// Pipeline on the default execution engine
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_engine(config, default_engine())
    }
}

impl Default for TransitPipeline<DefaultEngine> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<E: ExecutionEngine> TransitPipeline<E> {
    /// Pipeline evaluating candidates on `engine`
    pub fn with_engine(config: PipelineConfig, engine: E) -> Self {
        Self { config, engine }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run on an already loaded raw series
    pub fn run(&self, raw: &TimeSeries) -> Result<PipelineReport> {
        self.run_with_sink(raw, NullSink)
    }

    /// Fetch the target's raw series from `source`, then run
    pub fn run_from_source<L: LightCurveSource>(&self, source: &L) -> Result<PipelineReport> {
        self.run_from_source_with_sink(source, NullSink)
    }

    /// [`run_from_source`](Self::run_from_source) with stage outputs sent to `sink`
    pub fn run_from_source_with_sink<L, S>(&self, source: &L, sink: S) -> Result<PipelineReport>
    where
        L: LightCurveSource,
        S: ResultSink,
    {
        let raw = source.fetch_raw_series(self.config.target)?;
        self.run_with_sink(&raw, sink)
    }

    /// [`run`](Self::run) with stage outputs sent to `sink`
    #[instrument(
        skip(self, raw, sink),
        fields(target = %self.config.target, n = raw.len(), candidates = self.config.grid.n_periods)
    )]
    pub fn run_with_sink<S: ResultSink>(
        &self,
        raw: &TimeSeries,
        mut sink: S,
    ) -> Result<PipelineReport> {
        self.config.validate()?;
        let target = self.config.target;
        let entry = *target.entry();
        sink.record_raw(target, raw)?;

        let cleaning = Cleaner::new(self.config.cleaner.clone()).clean_with_report(raw)?;
        info!(
            kept = cleaning.series.len(),
            invalid = cleaning.invalid_removed,
            outliers = cleaning.outliers_removed,
            "Cleaned light curve"
        );
        sink.record_cleaned(&cleaning)?;

        let grid = self.config.grid.build()?;
        let detection = BoxSearchEngine::new(self.engine.clone(), self.config.search)
            .search(&cleaning.series, &grid)?;
        sink.record_detection(&detection)?;

        let series = &cleaning.series;
        let (first, last) = series
            .first_time()
            .zip(series.last_time())
            .ok_or(Error::InsufficientData {
                expected: 1,
                actual: 0,
            })?;
        let epochs = match self.config.epoch_anchor {
            EpochAnchor::SeriesStart => generate(first, last, detection.best_period)?,
            EpochAnchor::FittedTransit => generate_aligned(
                first,
                last,
                detection.best_period,
                detection.best_fit.transit_time,
            )?,
        };
        info!(count = epochs.len(), anchor = epochs.anchor, "Predicted transits");
        sink.record_epochs(&epochs)?;

        let comparison = compare(detection.best_period, entry.reference_period)?;
        if comparison.is_within(self.config.match_tolerance) {
            info!(
                planet = entry.planet_name,
                difference = comparison.absolute_difference,
                "Detected period matches catalog"
            );
        } else {
            warn!(
                planet = entry.planet_name,
                detected = comparison.detected_period,
                reference = comparison.reference_period,
                tolerance = self.config.match_tolerance,
                "Detected period disagrees with catalog"
            );
        }
        sink.record_comparison(&entry, &comparison)?;

        Ok(PipelineReport {
            target,
            entry,
            cleaning,
            detection,
            epochs,
            comparison,
        })
    }
}
