use contingency_core::{check_alpha, MetricResult};
use statrs::distribution::{ContinuousCDF, Normal};

/// Significance level for 95% intervals.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Standard normal inverse CDF `Φ⁻¹(p)`.
///
/// Returns `NaN` for `p` outside `[0, 1]` instead of panicking.
pub fn standard_normal_quantile(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    match Normal::new(0.0, 1.0) {
        Ok(normal) => normal.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Two-sided critical value `z = Φ⁻¹(1 - alpha/2)`.
pub fn two_sided_z(alpha: f64) -> f64 {
    standard_normal_quantile(1.0 - alpha / 2.0)
}

/// [`two_sided_z`] with `alpha` restricted to `(0, 1)`.
pub fn try_two_sided_z(alpha: f64) -> MetricResult<f64> {
    check_alpha(alpha).map(two_sided_z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use contingency_core::MetricError;

    #[test]
    fn test_common_critical_values() {
        assert_abs_diff_eq!(two_sided_z(0.05), 1.959963984540054, epsilon = 1e-9);
        assert_abs_diff_eq!(two_sided_z(0.01), 2.5758293035489, epsilon = 1e-9);
        assert_abs_diff_eq!(two_sided_z(0.10), 1.6448536269514715, epsilon = 1e-9);
    }

    #[test]
    fn test_median_is_zero() {
        assert_abs_diff_eq!(standard_normal_quantile(0.5), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_is_nan() {
        assert!(standard_normal_quantile(1.5).is_nan());
        assert!(standard_normal_quantile(f64::NAN).is_nan());
        assert!(two_sided_z(-0.5).is_nan());
    }

    #[test]
    fn test_checked_alpha() {
        assert!(try_two_sided_z(0.05).is_ok());
        assert_eq!(try_two_sided_z(0.0), Err(MetricError::InvalidAlpha(0.0)));
        assert_eq!(try_two_sided_z(1.0), Err(MetricError::InvalidAlpha(1.0)));
    }
}
