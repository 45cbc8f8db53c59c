//! Summary statistics shared by the cleaning and search stages
//!
//! Mean and dispersion come from `statrs`; the median is an order statistic
//! computed by selection on a scratch copy. All functions return `NaN` for
//! empty input, matching `statrs`.

use statrs::statistics::Statistics;

/// Arithmetic mean
pub fn mean(data: &[f64]) -> f64 {
    data.iter().mean()
}

/// Population variance (ddof = 0)
pub fn population_variance(data: &[f64]) -> f64 {
    data.iter().population_variance()
}

/// Population standard deviation (ddof = 0)
pub fn population_std_dev(data: &[f64]) -> f64 {
    data.iter().population_std_dev()
}

/// Median, averaging the two central order statistics for even lengths
pub fn median(data: &[f64]) -> f64 {
    let n = data.len();
    if n == 0 {
        return f64::NAN;
    }

    let mut scratch = data.to_vec();
    let mid = n / 2;
    let (lower, upper, _) = scratch.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
    let upper = *upper;
    if n % 2 == 1 {
        upper
    } else {
        // Largest element of the lower partition is the other central value
        let lower_max = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lower_max + upper) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_dispersion() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0);
        assert_relative_eq!(population_variance(&data), 4.0);
        assert_relative_eq!(population_std_dev(&data), 2.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[7.0]), 7.0);
    }

    #[test]
    fn test_median_does_not_reorder_input() {
        let data = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let _ = median(&data);
        assert_eq!(data, vec![5.0, 1.0, 4.0, 2.0, 3.0]);
    }

    #[test]
    fn test_empty_input_is_nan() {
        assert!(mean(&[]).is_nan());
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_constant_data_has_zero_variance() {
        let data = vec![1_000_000.0; 64];
        assert_eq!(population_variance(&data), 0.0);
    }
}
