//! Box least squares kernel for a single trial period
//!
//! The series is prepared once (times relative to the first sample, flux
//! centred on its mean). For each candidate the kernel folds the times,
//! accumulates counts and flux sums into `ceil(period * oversample / duration)`
//! equal phase bins that tile the period exactly, then slides a box of
//! `oversample` bins around the phase circle with running sums.
//!
//! For a placement with `n_in` samples inside the box and `n_out` outside,
//! the two-level step model has `depth = mean_out - mean_in` and reduces the
//! residual sum of squares of a constant model by
//! `n_in * n_out / n * depth^2`. Power is that reduction over `2 * variance`,
//! the log-likelihood gain under Gaussian noise with the series variance.

use crate::grid::Candidate;
use crate::types::BoxFit;
use transit_core::{stats, Error, Result, TimeSeries};

/// Minimum number of samples a series must have to be searched
pub const MIN_SEARCH_SAMPLES: usize = 2;

/// Relative standard deviation below which a series counts as constant
const DEGENERATE_RELATIVE_STD: f64 = 1e-12;

/// Upper bound on the phase bins a single candidate may fold into
pub const MAX_PHASE_BINS: usize = 1 << 22;

/// Fold `time` into `[0, period)`
///
/// Uses a Euclidean remainder, so times before the reference epoch still map
/// to non-negative phases. A remainder that rounds up to `period` wraps to 0.
#[inline]
pub fn fold_phase(time: f64, period: f64) -> f64 {
    let phase = time.rem_euclid(period);
    if phase >= period {
        0.0
    } else {
        phase
    }
}

/// Series prepared for repeated box evaluation
#[derive(Debug, Clone)]
pub struct BoxKernel {
    reference_epoch: f64,
    offsets: Vec<f64>,
    residuals: Vec<f64>,
    residual_total: f64,
    variance: f64,
    oversample: usize,
}

impl BoxKernel {
    /// Prepare `series` for evaluation with `oversample` bins per duration
    pub fn new(series: &TimeSeries, oversample: usize) -> Result<Self> {
        if oversample == 0 {
            return Err(Error::InvalidParameter(
                "oversample must be at least 1".to_string(),
            ));
        }
        if series.len() < MIN_SEARCH_SAMPLES {
            return Err(Error::InsufficientData {
                expected: MIN_SEARCH_SAMPLES,
                actual: series.len(),
            });
        }

        let flux = series.flux();
        let mean = stats::mean(flux);
        let variance = stats::population_variance(flux);
        let floor = (DEGENERATE_RELATIVE_STD * mean.abs()).powi(2);
        if !variance.is_finite() || !mean.is_finite() || variance <= floor {
            return Err(Error::DegenerateSeries);
        }

        let reference_epoch = series
            .time()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let offsets = series.time().iter().map(|t| t - reference_epoch).collect();
        let residuals: Vec<f64> = flux.iter().map(|f| f - mean).collect();
        let residual_total = residuals.iter().sum();

        Ok(Self {
            reference_epoch,
            offsets,
            residuals,
            residual_total,
            variance,
            oversample,
        })
    }

    /// Time all phases are measured from
    pub fn reference_epoch(&self) -> f64 {
        self.reference_epoch
    }

    /// Population variance of the flux
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always false: construction requires samples
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn bin_count(&self, candidate: &Candidate) -> f64 {
        (candidate.period * self.oversample as f64 / candidate.duration).ceil()
    }

    /// Reject candidates whose phase bins would exceed [`MAX_PHASE_BINS`]
    pub fn check_candidate(&self, candidate: &Candidate) -> Result<()> {
        let n_bins = self.bin_count(candidate);
        if !n_bins.is_finite() || n_bins > MAX_PHASE_BINS as f64 {
            return Err(Error::InvalidParameter(format!(
                "period {} with duration {} needs {:.0} phase bins, more than the limit of {}",
                candidate.period, candidate.duration, n_bins, MAX_PHASE_BINS
            )));
        }
        Ok(())
    }

    /// Bin width and bin count used for `candidate`
    ///
    /// The bins tile the period exactly, so the width is at most
    /// `duration / oversample`.
    pub fn bin_geometry(&self, candidate: &Candidate) -> (f64, usize) {
        let n_bins = (self.bin_count(candidate) as usize).max(1);
        (candidate.period / n_bins as f64, n_bins)
    }

    /// Best box placement at one candidate period
    ///
    /// Allocates one slot per phase bin; run [`BoxKernel::check_candidate`]
    /// first on untrusted candidates.
    pub fn evaluate(&self, candidate: &Candidate) -> BoxFit {
        let Candidate { period, duration } = *candidate;
        let (bin_width, n_bins) = self.bin_geometry(candidate);
        let window = self.oversample.min(n_bins);
        let half_box = window as f64 * bin_width / 2.0;

        let mut counts = vec![0usize; n_bins];
        let mut sums = vec![0.0f64; n_bins];
        for (&offset, &y) in self.offsets.iter().zip(&self.residuals) {
            let phase = fold_phase(offset, period);
            let bin = ((phase / bin_width) as usize).min(n_bins - 1);
            counts[bin] += 1;
            sums[bin] += y;
        }

        let n = self.offsets.len();
        let n_f = n as f64;
        let mut n_in: usize = counts[..window].iter().sum();
        let mut s_in: f64 = sums[..window].iter().sum();

        let mut best = BoxFit::empty(period, duration);
        for start in 0..n_bins {
            if n_in > 0 && n_in < n {
                let n_out = n - n_in;
                let mean_in = s_in / n_in as f64;
                let mean_out = (self.residual_total - s_in) / n_out as f64;
                let depth = mean_out - mean_in;
                if depth > 0.0 {
                    let (w_in, w_out) = (n_in as f64, n_out as f64);
                    let power = w_in * w_out / n_f * depth * depth / (2.0 * self.variance);
                    if power > best.power {
                        let std_err = (self.variance * (1.0 / w_in + 1.0 / w_out)).sqrt();
                        let mid_phase = fold_phase(start as f64 * bin_width + half_box, period);
                        best = BoxFit {
                            period,
                            duration,
                            power,
                            depth,
                            depth_snr: depth / std_err,
                            transit_time: self.reference_epoch + mid_phase,
                            in_transit_count: n_in,
                        };
                    }
                }
            }

            // Slide the box one bin, wrapping around phase zero
            let leaving = start;
            let entering = (start + window) % n_bins;
            n_in = n_in + counts[entering] - counts[leaving];
            s_in += sums[entering] - sums[leaving];
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square_wave(period: f64, duration: f64, depth: f64) -> TimeSeries {
        let time: Vec<f64> = (0..2000).map(|i| i as f64 * 0.01).collect();
        let flux = time
            .iter()
            .map(|&t| {
                let phase = fold_phase(t - 0.5, period);
                if phase < duration {
                    100.0 - depth
                } else {
                    100.0
                }
            })
            .collect();
        TimeSeries::new(time, flux).unwrap()
    }

    #[test]
    fn test_fold_phase_is_non_negative() {
        assert_relative_eq!(fold_phase(5.5, 2.0), 1.5);
        assert_relative_eq!(fold_phase(-0.5, 2.0), 1.5);
        assert_relative_eq!(fold_phase(-4.0, 2.0), 0.0);
        let tiny = fold_phase(-1e-18, 3.0);
        assert!((0.0..3.0).contains(&tiny));
    }

    /// Circular distance between two phases
    fn phase_distance(a: f64, b: f64, period: f64) -> f64 {
        let d = fold_phase(a - b, period);
        d.min(period - d)
    }

    #[test]
    fn test_exact_box_is_recovered() {
        let series = square_wave(2.0, 0.2, 3.0);
        let kernel = BoxKernel::new(&series, 10).unwrap();
        let fit = kernel.evaluate(&Candidate::new(2.0, 0.2).unwrap());

        assert!(fit.has_dip());
        // Bin edges may split one cadence off either end of the dip
        assert!(fit.depth > 2.7 && fit.depth < 3.3, "depth {}", fit.depth);
        assert!((190..=210).contains(&fit.in_transit_count));
        // Transits start at 0.5 + k*2, so mid-transit is at 0.6 (mod 2)
        assert!(phase_distance(fit.transit_time, 0.6, 2.0) < 0.03);
        assert!(fit.depth_snr > 10.0);
    }

    #[test]
    fn test_power_matches_closed_form() {
        let series = square_wave(2.0, 0.2, 3.0);
        let kernel = BoxKernel::new(&series, 10).unwrap();
        let fit = kernel.evaluate(&Candidate::new(2.0, 0.2).unwrap());

        let n = series.len() as f64;
        let n_in = fit.in_transit_count as f64;
        let expected =
            n_in * (n - n_in) / n * fit.depth * fit.depth / (2.0 * kernel.variance());
        assert_relative_eq!(fit.power, expected, max_relative = 1e-9);

        let std_err = (kernel.variance() * (1.0 / n_in + 1.0 / (n - n_in))).sqrt();
        assert_relative_eq!(fit.depth_snr, fit.depth / std_err, max_relative = 1e-9);
    }

    #[test]
    fn test_brightening_is_not_scored() {
        // Inverted box: a bump, not a dip
        let series = square_wave(2.0, 0.2, -3.0);
        let kernel = BoxKernel::new(&series, 10).unwrap();
        let fit = kernel.evaluate(&Candidate::new(2.0, 0.2).unwrap());
        // The only positive-depth placements are the complements of the bump
        // which are much wider than one box; any fit found must be weaker
        // than the exact-dip case.
        let dip = BoxKernel::new(&square_wave(2.0, 0.2, 3.0), 10)
            .unwrap()
            .evaluate(&Candidate::new(2.0, 0.2).unwrap());
        assert!(fit.power < dip.power);
        assert!(fit.depth >= 0.0);
    }

    #[test]
    fn test_degenerate_series() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0], vec![0.1; 3]).unwrap();
        assert!(matches!(
            BoxKernel::new(&series, 10),
            Err(Error::DegenerateSeries)
        ));
    }

    #[test]
    fn test_too_few_samples() {
        let series = TimeSeries::new(vec![0.0], vec![1.0]).unwrap();
        assert!(matches!(
            BoxKernel::new(&series, 10),
            Err(Error::InsufficientData { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_bin_geometry() {
        let series = square_wave(2.0, 0.2, 3.0);
        let kernel = BoxKernel::new(&series, 5).unwrap();
        let (width, n_bins) = kernel.bin_geometry(&Candidate::new(1.0, 0.1).unwrap());
        assert_relative_eq!(width, 0.02);
        assert_eq!(n_bins, 50);
    }

    #[test]
    fn test_bins_tile_period_exactly() {
        let series = square_wave(2.0, 0.2, 3.0);
        let kernel = BoxKernel::new(&series, 10).unwrap();
        // 1.005 / 0.01 = 100.5, so the bins are narrowed rather than leaving
        // a short last bin
        let (width, n_bins) = kernel.bin_geometry(&Candidate::new(1.005, 0.1).unwrap());
        assert_eq!(n_bins, 101);
        assert_relative_eq!(width * n_bins as f64, 1.005, max_relative = 1e-12);
        assert!(width <= 0.01);
    }

    #[test]
    fn test_dip_across_phase_zero_matches_interior_dip() {
        // Same dip, once centred on the first sample and once mid-phase
        let straddling = TimeSeries::new(
            (0..2000).map(|i| i as f64 * 0.01).collect(),
            (0..2000)
                .map(|i| {
                    let phase = fold_phase(i as f64 * 0.01 + 0.1, 2.0);
                    if phase < 0.2 { 97.0 } else { 100.0 }
                })
                .collect(),
        )
        .unwrap();
        let interior = square_wave(2.0, 0.2, 3.0);
        let candidate = Candidate::new(2.0, 0.2).unwrap();

        let wrapped = BoxKernel::new(&straddling, 10).unwrap().evaluate(&candidate);
        let inside = BoxKernel::new(&interior, 10).unwrap().evaluate(&candidate);
        assert_relative_eq!(wrapped.power, inside.power, max_relative = 0.15);
        assert!(phase_distance(wrapped.transit_time, 0.0, 2.0) < 0.03);
    }

    #[test]
    fn test_oversized_bin_count_is_rejected() {
        let series = square_wave(2.0, 0.2, 3.0);
        let kernel = BoxKernel::new(&series, 10).unwrap();
        let tiny = Candidate::new(20.0, 1e-9).unwrap();
        assert!(matches!(
            kernel.check_candidate(&tiny),
            Err(Error::InvalidParameter(_))
        ));
        assert!(kernel.check_candidate(&Candidate::new(20.0, 0.1).unwrap()).is_ok());
    }
}
