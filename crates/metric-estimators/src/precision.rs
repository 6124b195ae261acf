use contingency_core::{ContingencyBatch, ContingencyTable, DrawCount, MetricResult, PointEstimate};
use serde::Serialize;

use crate::delta::RatioMoments;
use crate::run::{check_effective_draws, evaluate, RunEstimate};

/// Precision `TP / (TP + FP)` per run, with a delta-method standard error.
///
/// The variance is normalized by the predicted-positive count `TP + FP`
/// (`num_eff_draws`) rather than by the total number of draws. That choice
/// has not been derived rigorously; it is kept as-is so results stay
/// comparable with existing analyses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecisionEstimator {
    num_draws: Vec<f64>,
    num_eff_draws: Vec<f64>,
    value: Vec<f64>,
    stderr: Vec<f64>,
}

impl PrecisionEstimator {
    pub fn new(batch: &ContingencyBatch) -> Self {
        let estimates = evaluate("precision", batch, estimate_run);
        Self {
            num_draws: estimates.num_draws,
            num_eff_draws: estimates.effective,
            value: estimates.value,
            stderr: estimates.stderr,
        }
    }

    /// Like [`new`](Self::new), but rejects malformed batches and runs
    /// where the ratio is undefined.
    pub fn try_new(batch: &ContingencyBatch) -> MetricResult<Self> {
        batch.validate()?;
        let estimator = Self::new(batch);
        check_effective_draws("precision", &estimator.num_eff_draws)?;
        Ok(estimator)
    }

    /// TP + FP per run.
    pub fn num_eff_draws(&self) -> &[f64] {
        &self.num_eff_draws
    }
}

fn estimate_run(table: &ContingencyTable) -> RunEstimate {
    let num_draws = table.num_draws();
    let num_eff_draws = table.predicted_positives();

    let m_tp = table.true_positives / num_draws;
    let m_fp = table.false_positives / num_draws;
    let (value, stderr) = RatioMoments::two_cell(m_tp, m_fp).estimate(num_eff_draws);

    RunEstimate {
        num_draws,
        effective: num_eff_draws,
        value,
        stderr,
    }
}

impl PointEstimate for PrecisionEstimator {
    fn value(&self) -> &[f64] {
        &self.value
    }

    fn stderr(&self) -> &[f64] {
        &self.stderr
    }
}

impl DrawCount for PrecisionEstimator {
    fn num_draws(&self) -> &[f64] {
        &self.num_draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_batch;
    use approx::assert_abs_diff_eq;
    use contingency_core::MetricError;

    #[test]
    fn test_num_draws() {
        let estimator = PrecisionEstimator::new(&sample_batch());
        assert_eq!(estimator.num_draws(), &[50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_num_eff_draws() {
        let estimator = PrecisionEstimator::new(&sample_batch());
        assert_eq!(estimator.num_eff_draws(), &[25.0, 22.0, 29.0]);
    }

    #[test]
    fn test_value() {
        let estimator = PrecisionEstimator::new(&sample_batch());
        let expected = [0.52, 0.54545455, 0.34482759];
        for (got, want) in estimator.value().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_stderr() {
        let estimator = PrecisionEstimator::new(&sample_batch());
        let expected = [0.14130817, 0.16004063, 0.11589530];
        for (got, want) in estimator.stderr().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_no_predicted_positives_is_nan() {
        // TP + FP = 0: the ratio is undefined.
        let batch = ContingencyBatch::from_rows([[0.0, 40.0, 0.0, 10.0]]);
        let estimator = PrecisionEstimator::new(&batch);
        assert!(estimator.value()[0].is_nan());
        assert_eq!(estimator.num_eff_draws(), &[0.0]);
    }

    #[test]
    fn test_value_and_stderr_in_range() {
        let batch = ContingencyBatch::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 5.0, 2.0, 3.0],
            [7.5, 2.25, 0.5, 1.0],
            [100.0, 900.0, 40.0, 60.0],
            [1.0, 0.0, 59.0, 0.0],
        ]);
        let estimator = PrecisionEstimator::new(&batch);
        for (&value, &stderr) in estimator.value().iter().zip(estimator.stderr()) {
            assert!((0.0..=1.0).contains(&value));
            assert!(stderr >= 0.0);
        }
    }

    #[test]
    fn test_perfect_precision_has_zero_stderr() {
        // FP = 0: numerator and denominator move together, so the variance cancels.
        let batch = ContingencyBatch::from_rows([
            [20.0, 5.0, 0.0, 5.0],
            [1.0, 0.0, 0.0, 9.0],
            [3.5, 1.0, 0.0, 0.5],
        ]);
        let estimator = PrecisionEstimator::new(&batch);
        for (&value, &stderr) in estimator.value().iter().zip(estimator.stderr()) {
            assert_eq!(value, 1.0);
            assert_abs_diff_eq!(stderr, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_try_new_rejects_empty_denominator() {
        let batch = ContingencyBatch::from_rows([[3.0, 1.0, 2.0, 4.0], [0.0, 40.0, 0.0, 10.0]]);
        assert_eq!(
            PrecisionEstimator::try_new(&batch),
            Err(MetricError::EmptyDenominator {
                run: 1,
                metric: "precision"
            })
        );
        assert!(PrecisionEstimator::try_new(&sample_batch()).is_ok());
    }
}
