//! Flux normalization onto a fixed baseline
//!
//! `flux' = (flux / center - 1) * scale + baseline`
//!
//! With the default parts-per-million convention (`scale = baseline = 1e6`)
//! this is `flux / center * 1e6`: the center flux maps to 1,000,000 and a
//! 1 ppm dimming maps to 999,999.

use serde::{Deserialize, Serialize};
use transit_core::{stats, Error, Result, TimeSeries};

/// Statistic used as the normalization center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CenterStatistic {
    /// Median flux
    #[default]
    Median,
    /// Mean flux
    Mean,
}

impl CenterStatistic {
    /// Evaluate the statistic on `flux`
    pub fn evaluate(&self, flux: &[f64]) -> f64 {
        match self {
            Self::Median => stats::median(flux),
            Self::Mean => stats::mean(flux),
        }
    }
}

/// Affine normalization settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normalization {
    /// Statistic mapped onto `baseline`
    pub center: CenterStatistic,
    /// Units per unit of relative deviation
    pub scale: f64,
    /// Value the center flux maps to
    pub baseline: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self::ppm()
    }
}

impl Normalization {
    /// Parts per million around a baseline of 1,000,000
    pub fn ppm() -> Self {
        Self {
            center: CenterStatistic::Median,
            scale: 1e6,
            baseline: 1e6,
        }
    }

    /// Relative flux around 1.0
    pub fn relative() -> Self {
        Self {
            center: CenterStatistic::Median,
            scale: 1.0,
            baseline: 1.0,
        }
    }

    /// Use a different center statistic
    pub fn with_center(mut self, center: CenterStatistic) -> Self {
        self.center = center;
        self
    }

    /// Use a different scale and baseline
    pub fn with_scale(mut self, scale: f64, baseline: f64) -> Self {
        self.scale = scale;
        self.baseline = baseline;
        self
    }

    /// Check that scale and baseline are usable
    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(Error::InvalidParameter(format!(
                "normalization scale must be finite and non-zero, got {}",
                self.scale
            )));
        }
        if !self.baseline.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "normalization baseline must be finite, got {}",
                self.baseline
            )));
        }
        Ok(())
    }

    /// Map a single flux value given the series center
    pub fn map(&self, flux: f64, center: f64) -> f64 {
        (flux / center - 1.0) * self.scale + self.baseline
    }
}

/// A normalized series together with the center it was divided by
#[derive(Debug, Clone)]
pub struct NormalizedSeries {
    pub series: TimeSeries,
    pub center: f64,
}

/// Rescale the flux of `series` onto the configured baseline
pub fn normalize(series: &TimeSeries, normalization: &Normalization) -> Result<NormalizedSeries> {
    normalization.validate()?;

    let center = normalization.center.evaluate(series.flux());
    if !center.is_finite() || center == 0.0 {
        return Err(Error::InvalidBaseline(center));
    }

    Ok(NormalizedSeries {
        series: series.map_flux(|f| normalization.map(f, center)),
        center,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(flux: Vec<f64>) -> TimeSeries {
        let time = (0..flux.len()).map(|i| i as f64).collect();
        TimeSeries::new(time, flux).unwrap()
    }

    #[test]
    fn test_ppm_normalization() {
        let s = series(vec![990.0, 1000.0, 1010.0, 1000.0, 1000.0]);
        let out = normalize(&s, &Normalization::ppm()).unwrap();

        assert_eq!(out.center, 1000.0);
        assert_relative_eq!(out.series.flux()[0], 990_000.0, epsilon = 1e-6);
        assert_relative_eq!(out.series.flux()[1], 1_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(out.series.flux()[2], 1_010_000.0, epsilon = 1e-6);
        assert_eq!(out.series.time(), s.time());
    }

    #[test]
    fn test_mean_center() {
        let s = series(vec![1.0, 2.0, 6.0]);
        let norm = Normalization::relative().with_center(CenterStatistic::Mean);
        let out = normalize(&s, &norm).unwrap();
        assert_relative_eq!(out.center, 3.0);
        assert_relative_eq!(out.series.flux()[2], 2.0);
    }

    #[test]
    fn test_custom_scale_and_baseline() {
        // ppm deviation around zero
        let s = series(vec![999.0, 1000.0, 1001.0]);
        let norm = Normalization::ppm().with_scale(1e6, 0.0);
        let out = normalize(&s, &norm).unwrap();
        assert_relative_eq!(out.series.flux()[0], -1000.0, epsilon = 1e-6);
        assert_relative_eq!(out.series.flux()[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_center_is_rejected() {
        let s = series(vec![-1.0, 0.0, 1.0]);
        let err = normalize(&s, &Normalization::ppm()).unwrap_err();
        assert!(matches!(err, Error::InvalidBaseline(c) if c == 0.0));
    }

    #[test]
    fn test_invalid_scale() {
        let s = series(vec![1.0, 2.0]);
        let norm = Normalization::ppm().with_scale(0.0, 1.0);
        assert!(matches!(
            normalize(&s, &norm),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_renormalizing_is_idempotent() {
        let s = series(vec![812.5, 801.0, 799.0, 805.0, 790.0, 803.0]);
        let norm = Normalization::ppm();
        let once = normalize(&s, &norm).unwrap();
        let twice = normalize(&once.series, &norm).unwrap();

        assert_relative_eq!(twice.center, norm.baseline, max_relative = 1e-12);
        for (a, b) in once.series.flux().iter().zip(twice.series.flux()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-12);
        }
    }
}
