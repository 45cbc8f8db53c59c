//! Box least squares period search
//!
//! Every candidate is scored by [`BoxKernel::evaluate`] from the same
//! immutable prepared series. The execution engine decides whether candidates
//! run in order or across a Rayon pool; each result is written to the slot of
//! its grid index, so sequential and parallel runs give bit-identical
//! periodograms.

use crate::grid::CandidateGrid;
use crate::kernel::{BoxKernel, MIN_SEARCH_SAMPLES};
use crate::traits::{PeriodSearch, PeriodSearchProperties};
use crate::types::{BoxFit, DetectionResult, Periodogram};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use transit_core::execution::{default_engine, DefaultEngine, ExecutionEngine, SequentialEngine};
use transit_core::{Error, Result, TimeSeries};

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSearchParameters {
    /// Phase bins per box duration
    pub oversample: usize,
}

impl Default for BoxSearchParameters {
    fn default() -> Self {
        Self { oversample: 10 }
    }
}

impl BoxSearchParameters {
    /// Set the number of phase bins per box duration
    pub fn with_oversample(mut self, oversample: usize) -> Self {
        self.oversample = oversample;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.oversample == 0 {
            return Err(Error::InvalidParameter(
                "oversample must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Box least squares search driven by an execution engine
#[derive(Debug, Clone)]
pub struct BoxSearchEngine<E: ExecutionEngine> {
    engine: E,
    params: BoxSearchParameters,
}

impl BoxSearchEngine<SequentialEngine> {
    /// Engine that evaluates candidates in order on the calling thread
    pub fn sequential(params: BoxSearchParameters) -> Self {
        Self::new(SequentialEngine::new(), params)
    }
}

impl Default for BoxSearchEngine<DefaultEngine> {
    fn default() -> Self {
        Self::new(default_engine(), BoxSearchParameters::default())
    }
}

impl<E: ExecutionEngine> BoxSearchEngine<E> {
    /// Create a search with the given engine and parameters
    pub fn new(engine: E, params: BoxSearchParameters) -> Self {
        Self { engine, params }
    }

    /// Parameters in use
    pub fn parameters(&self) -> &BoxSearchParameters {
        &self.params
    }

    /// Execution engine in use
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Score every candidate in `grid` against `series`
    #[instrument(
        skip(self, series, grid),
        fields(n = series.len(), candidates = grid.len(), strategy = ?self.engine.strategy())
    )]
    pub fn search(&self, series: &TimeSeries, grid: &CandidateGrid) -> Result<DetectionResult> {
        self.params.validate()?;
        if grid.is_empty() {
            return Err(Error::EmptyGrid);
        }

        let kernel = BoxKernel::new(series, self.params.oversample)?;
        debug!(
            "Prepared {} samples, reference epoch {:.6}, variance {:.6e}",
            kernel.len(),
            kernel.reference_epoch(),
            kernel.variance()
        );

        let candidates = grid.candidates();
        for candidate in candidates {
            kernel.check_candidate(candidate)?;
        }
        if let Some(first) = candidates.first() {
            let (bin_width, n_bins) = kernel.bin_geometry(first);
            debug!("First candidate folds into {} bins of width {:.5}", n_bins, bin_width);
        }
        let mut fits = vec![BoxFit::default(); candidates.len()];
        self.engine
            .fill_slots(&mut fits, |i| kernel.evaluate(&candidates[i]));

        let result = DetectionResult::from_periodogram(Periodogram::new(fits)).ok_or_else(|| {
            Error::InvalidInput("periodogram contains no finite power".to_string())
        })?;

        info!(
            best_period = result.best_period,
            best_power = result.best_power,
            depth = result.best_fit.depth,
            "Box search complete"
        );
        Ok(result)
    }
}

impl<E: ExecutionEngine> PeriodSearchProperties for BoxSearchEngine<E> {
    fn algorithm_name(&self) -> &'static str {
        "BLS"
    }

    fn minimum_sample_size(&self) -> usize {
        MIN_SEARCH_SAMPLES
    }
}

impl<E: ExecutionEngine> PeriodSearch for BoxSearchEngine<E> {
    fn search(&self, series: &TimeSeries, grid: &CandidateGrid) -> Result<DetectionResult> {
        BoxSearchEngine::search(self, series, grid)
    }
}

/// Search with the default engine and parameters
pub fn search(series: &TimeSeries, grid: &CandidateGrid) -> Result<DetectionResult> {
    BoxSearchEngine::default().search(series, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{DurationPolicy, GridParameters};
    use transit_core::synthetic::{flat_noise, SyntheticTransit};

    fn small_grid() -> CandidateGrid {
        GridParameters::default()
            .with_periods(1.0, 8.0, 701)
            .with_duration(DurationPolicy::Fixed(0.2))
            .build()
            .unwrap()
    }

    #[test]
    fn test_recovers_injected_period() {
        let series = SyntheticTransit::default()
            .with_period(4.0)
            .with_depth(5.0)
            .generate()
            .unwrap();
        let grid = small_grid();
        let result = BoxSearchEngine::sequential(BoxSearchParameters::default())
            .search(&series, &grid)
            .unwrap();

        let step = grid.resolution().unwrap();
        assert!(
            (result.best_period - 4.0).abs() <= step,
            "best period {} (step {})",
            result.best_period,
            step
        );
        assert_eq!(result.periodogram.len(), grid.len());
        assert!(result.best_fit.depth > 3.0);
    }

    #[test]
    fn test_single_candidate_grid() {
        let series = flat_noise(500, 1000.0, 1.0, 3).unwrap();
        let grid = CandidateGrid::single(2.5, 0.1).unwrap();
        let result = BoxSearchEngine::sequential(BoxSearchParameters::default())
            .search(&series, &grid)
            .unwrap();

        assert_eq!(result.periodogram.len(), 1);
        assert_eq!(result.best_period, 2.5);
        assert_eq!(result.best_index, 0);
    }

    #[test]
    fn test_empty_grid() {
        let series = flat_noise(100, 1000.0, 1.0, 3).unwrap();
        let err = search(&series, &CandidateGrid::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyGrid));
    }

    #[test]
    fn test_empty_grid_is_checked_before_series() {
        let err = search(&TimeSeries::default(), &CandidateGrid::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyGrid));
    }

    #[test]
    fn test_zero_variance_series() {
        let time: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
        let series = TimeSeries::new(time, vec![1e6; 100]).unwrap();
        let err = search(&series, &small_grid()).unwrap_err();
        assert!(matches!(err, Error::DegenerateSeries));
    }

    #[test]
    fn test_invalid_oversample() {
        let series = flat_noise(100, 1000.0, 1.0, 3).unwrap();
        let engine = BoxSearchEngine::sequential(BoxSearchParameters::default().with_oversample(0));
        assert!(matches!(
            engine.search(&series, &small_grid()),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_tiny_duration_grid_is_rejected_before_evaluation() {
        let series = flat_noise(200, 1000.0, 1.0, 5).unwrap();
        // A 1e-9 duty cycle would need billions of phase bins per period
        let grid = CandidateGrid::linear(1.0, 20.0, 50, DurationPolicy::DutyCycle(1e-9)).unwrap();
        let err = search(&series, &grid).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        // One oversized candidate at the end of an otherwise valid grid
        let mixed = CandidateGrid::from_pairs([(2.0, 0.1), (20.0, 1e-9)]).unwrap();
        let err = BoxSearchEngine::sequential(BoxSearchParameters::default())
            .search(&series, &mixed)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(ref msg) if msg.contains("phase bins")));
    }

    #[test]
    fn test_trait_object_properties() {
        let engine = BoxSearchEngine::sequential(BoxSearchParameters::default());
        let search: &dyn PeriodSearch = &engine;
        assert_eq!(search.algorithm_name(), "BLS");
        assert_eq!(search.minimum_sample_size(), 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        use transit_core::execution::ParallelEngine;

        let series = SyntheticTransit::default()
            .with_gaps(0.2)
            .generate()
            .unwrap();
        let grid = small_grid();
        let params = BoxSearchParameters::default();

        let seq = BoxSearchEngine::sequential(params).search(&series, &grid).unwrap();
        let par = BoxSearchEngine::new(ParallelEngine::with_num_threads(4).unwrap(), params)
            .search(&series, &grid)
            .unwrap();

        let seq_bits: Vec<u64> = seq
            .periodogram
            .powers()
            .iter()
            .map(|p| p.to_bits())
            .collect();
        let par_bits: Vec<u64> = par
            .periodogram
            .powers()
            .iter()
            .map(|p| p.to_bits())
            .collect();
        assert_eq!(seq_bits, par_bits);
        assert_eq!(seq.periodogram, par.periodogram);
        assert_eq!(seq.best_index, par.best_index);
    }
}
