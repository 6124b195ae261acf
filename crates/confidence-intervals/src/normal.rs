//! Intervals under a normal approximation of the estimator.

use contingency_core::{check_alpha, MetricResult, PointEstimate};

use crate::interval::Interval;
use crate::quantile::two_sided_z;

/// Wald interval `value ± z·stderr` for every run.
///
/// The critical value is computed once per call, not once per run.
pub fn ci_wald<E: PointEstimate + ?Sized>(estimator: &E, alpha: f64) -> Vec<Interval> {
    let z_a = two_sided_z(alpha);
    tracing::debug!(alpha, z_a, runs = estimator.len(), "Computing Wald intervals");

    estimator
        .value()
        .iter()
        .zip(estimator.stderr())
        .map(|(&p, &stderr)| Interval::centered(p, z_a * stderr))
        .collect()
}

/// [`ci_wald`] with `alpha` restricted to `(0, 1)`.
pub fn try_ci_wald<E: PointEstimate + ?Sized>(
    estimator: &E,
    alpha: f64,
) -> MetricResult<Vec<Interval>> {
    check_alpha(alpha)?;
    Ok(ci_wald(estimator, alpha))
}
