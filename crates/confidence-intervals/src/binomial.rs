//! Intervals for binomial proportions (accuracy).
//!
//! Both adjust the plain Wald interval for better coverage near 0 and 1.

use contingency_core::{check_alpha, BinomialProportion, DrawCount, MetricResult, PointEstimate};

use crate::interval::Interval;
use crate::quantile::two_sided_z;

/// Agresti-Coull interval.
///
/// Adds `z²` pseudo-draws, half of them successes (about 2 and 2 for
/// `alpha = 0.05`), then applies the Wald interval to the adjusted
/// proportion.
pub fn ci_agresti_coull<E: BinomialProportion + ?Sized>(estimator: &E, alpha: f64) -> Vec<Interval> {
    let z_a = two_sided_z(alpha);
    let z_a2 = z_a * z_a;
    tracing::debug!(alpha, z_a, runs = estimator.len(), "Computing Agresti-Coull intervals");

    estimator
        .num_draws()
        .iter()
        .zip(estimator.num_successes())
        .map(|(&num_draws, &num_successes)| {
            let num_draws_adj = num_draws + z_a2;
            let val_adj = (num_successes + z_a2 / 2.0) / num_draws_adj;
            let stderr_adj = (val_adj * (1.0 - val_adj) / num_draws_adj).sqrt();
            Interval::centered(val_adj, z_a * stderr_adj)
        })
        .collect()
}

/// Wilson score interval in closed form.
///
/// ```text
/// center = (p + z²/2n) / (1 + z²/n)
/// half   = z · sqrt(p - p² + z²/4n) / (sqrt(n) + z²/sqrt(n))
/// ```
pub fn ci_wilson<E: PointEstimate + DrawCount + ?Sized>(estimator: &E, alpha: f64) -> Vec<Interval> {
    let z_a = two_sided_z(alpha);
    let z_a2 = z_a * z_a;
    tracing::debug!(alpha, z_a, runs = estimator.len(), "Computing Wilson intervals");

    estimator
        .value()
        .iter()
        .zip(estimator.num_draws())
        .map(|(&p, &n)| {
            let stderr_adj = (p - p * p + z_a2 / (4.0 * n)).sqrt() / (n.sqrt() + z_a2 / n.sqrt());
            let val_adj = (p + z_a2 / (2.0 * n)) / (1.0 + z_a2 / n);
            Interval::centered(val_adj, z_a * stderr_adj)
        })
        .collect()
}

pub fn try_ci_agresti_coull<E: BinomialProportion + ?Sized>(
    estimator: &E,
    alpha: f64,
) -> MetricResult<Vec<Interval>> {
    check_alpha(alpha)?;
    Ok(ci_agresti_coull(estimator, alpha))
}

pub fn try_ci_wilson<E: PointEstimate + DrawCount + ?Sized>(
    estimator: &E,
    alpha: f64,
) -> MetricResult<Vec<Interval>> {
    check_alpha(alpha)?;
    Ok(ci_wilson(estimator, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use metric_estimators::{AccuracyEstimator, ContingencyBatch};

    use crate::normal::ci_wald;
    use crate::quantile::DEFAULT_ALPHA;

    fn sample_estimator() -> AccuracyEstimator {
        AccuracyEstimator::new(&ContingencyBatch::from_rows([
            [13.0, 0.0, 12.0, 25.0],
            [12.0, 0.0, 10.0, 28.0],
            [10.0, 0.0, 19.0, 21.0],
        ]))
    }

    fn assert_intervals(got: &[Interval], expected: &[(f64, f64)]) {
        assert_eq!(got.len(), expected.len());
        for (ci, &(lower, upper)) in got.iter().zip(expected) {
            assert_abs_diff_eq!(ci.lower, lower, epsilon = 1e-7);
            assert_abs_diff_eq!(ci.upper, upper, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_ci_agresti_coull() {
        let expected = [
            (0.15757100260674056, 0.39667584497727154),
            (0.14159960372603347, 0.37550114782331306),
            (0.11050245456583023, 0.33230610491418494),
        ];
        assert_intervals(&ci_agresti_coull(&sample_estimator(), DEFAULT_ALPHA), &expected);
    }

    #[test]
    fn test_ci_wilson() {
        let expected = [
            (0.1587152749355239, 0.39553157264848843),
            (0.14297391396991732, 0.37412683757942922),
            (0.11243750015776115, 0.33037105932225413),
        ];
        assert_intervals(&ci_wilson(&sample_estimator(), DEFAULT_ALPHA), &expected);
    }

    #[test]
    fn test_intervals_stay_in_unit_range_at_extremes() {
        // Wald collapses to a point at p = 0 or 1; the adjusted intervals do not.
        let estimator = AccuracyEstimator::new(&ContingencyBatch::from_rows([
            [0.0, 0.0, 3.0, 7.0],
            [5.0, 5.0, 0.0, 0.0],
        ]));

        let wald = ci_wald(&estimator, DEFAULT_ALPHA);
        assert_eq!(wald[0].width(), 0.0);

        for intervals in [
            ci_agresti_coull(&estimator, DEFAULT_ALPHA),
            ci_wilson(&estimator, DEFAULT_ALPHA),
        ] {
            for ci in &intervals {
                assert!(ci.lower <= ci.upper);
                assert!(ci.width() > 0.0);
                assert!(ci.lower >= -0.1 && ci.upper <= 1.1);
            }
        }

        let wilson = ci_wilson(&estimator, DEFAULT_ALPHA);
        assert_abs_diff_eq!(wilson[0].lower, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wilson[1].upper, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wilson_contains_point_estimate() {
        let estimator = sample_estimator();
        for (ci, &p) in ci_wilson(&estimator, DEFAULT_ALPHA).iter().zip(estimator.value()) {
            assert!(ci.contains(p));
        }
    }

    #[test]
    fn test_checked_variants() {
        let estimator = sample_estimator();
        assert!(try_ci_agresti_coull(&estimator, 0.0).is_err());
        assert!(try_ci_wilson(&estimator, f64::NAN).is_err());
        assert_eq!(
            try_ci_wilson(&estimator, 0.1).unwrap(),
            ci_wilson(&estimator, 0.1)
        );
    }
}
