//! Run the transit pipeline on a simulated Kepler light curve
//!
//! The light curve is synthesized from the catalog period of the chosen
//! target, so the demo runs offline. Pass a star name to pick the target:
//!
//! ```text
//! RUST_LOG=info cargo run --example kepler_pipeline -- "HD 209458"
//! ```

use transit_core::synthetic::SyntheticTransit;
use transit_search::{
    CatalogEntry, CleaningReport, ComparisonRecord, DetectionResult, EpochAnchor,
    MemorySource, PipelineConfig, ResultSink, SummaryRow, Target, TransitPipeline,
};
use tracing_subscriber::EnvFilter;

/// Prints each stage as it completes
struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn record_cleaned(&mut self, cleaning: &CleaningReport) -> transit_search::Result<()> {
        println!(
            "  cleaned: {} of {} samples kept ({} outliers)",
            cleaning.series.len(),
            cleaning.input_len,
            cleaning.outliers_removed
        );
        Ok(())
    }

    fn record_detection(&mut self, detection: &DetectionResult) -> transit_search::Result<()> {
        println!(
            "  search:  best period {:.5} d over {} candidates",
            detection.best_period,
            detection.periodogram.len()
        );
        Ok(())
    }

    fn record_comparison(
        &mut self,
        entry: &CatalogEntry,
        comparison: &ComparisonRecord,
    ) -> transit_search::Result<()> {
        println!("  compare: {} ({})", comparison, entry.info_url);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let target: Target = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => Target::default(),
    };
    let entry = target.entry();
    println!("=== {} / {} ({}) ===\n", target, entry.planet_name, entry.catalog_id);

    // 90 days of Kepler long cadence, flux in electrons per second
    let raw = SyntheticTransit {
        span: 90.0,
        cadence: 0.0204,
        baseline: 12_000.0,
        noise: 3.0,
        period: entry.reference_period,
        duration: 0.1,
        depth: 12.0,
        epoch: 2.3,
        gap_fraction: 0.05,
        ..SyntheticTransit::default()
    }
    .generate()?;
    let source = MemorySource::new().with_series(target, raw);

    let config = PipelineConfig::for_target(target).with_epoch_anchor(EpochAnchor::FittedTransit);
    let report = TransitPipeline::new(config).run_from_source_with_sink(&source, ConsoleSink)?;

    println!("\n{report}\n");
    println!("{}", SummaryRow::HEADER.join(" | "));
    println!("{}", report.summary());

    let shown: Vec<String> = report
        .epochs
        .iter()
        .take(5)
        .map(|t| format!("{t:.4}"))
        .collect();
    println!("\nFirst transits: {}", shown.join(", "));

    Ok(())
}
