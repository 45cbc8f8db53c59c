//! Pipeline configuration

use serde::{Deserialize, Serialize};
use transit_bls::{BoxSearchParameters, GridParameters};
use transit_clean::CleanerParameters;
use transit_core::{Error, Result};
use transit_verify::Target;

/// Where predicted transit epochs are counted from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochAnchor {
    /// First cleaned timestamp
    #[default]
    SeriesStart,
    /// Mid-transit time of the best box fit
    FittedTransit,
}

/// Settings for one end-to-end run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub target: Target,
    pub cleaner: CleanerParameters,
    pub grid: GridParameters,
    pub search: BoxSearchParameters,
    pub epoch_anchor: EpochAnchor,
    /// Largest period difference, in days, still counted as a catalog match
    pub match_tolerance: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target: Target::default(),
            cleaner: CleanerParameters::default(),
            grid: GridParameters::default(),
            search: BoxSearchParameters::default(),
            epoch_anchor: EpochAnchor::default(),
            match_tolerance: 0.1,
        }
    }
}

impl PipelineConfig {
    /// Default configuration for `target`
    pub fn for_target(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_cleaner(mut self, cleaner: CleanerParameters) -> Self {
        self.cleaner = cleaner;
        self
    }

    pub fn with_grid(mut self, grid: GridParameters) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_search(mut self, search: BoxSearchParameters) -> Self {
        self.search = search;
        self
    }

    pub fn with_epoch_anchor(mut self, anchor: EpochAnchor) -> Self {
        self.epoch_anchor = anchor;
        self
    }

    pub fn with_match_tolerance(mut self, tolerance: f64) -> Self {
        self.match_tolerance = tolerance;
        self
    }

    /// Check every nested parameter set
    pub fn validate(&self) -> Result<()> {
        if !self.match_tolerance.is_finite() || self.match_tolerance < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "match_tolerance must be finite and >= 0, got {}",
                self.match_tolerance
            )));
        }
        self.cleaner.validate()?;
        self.search.validate()
    }
}
