use contingency_core::{
    BinomialProportion, ContingencyBatch, ContingencyTable, DrawCount, MetricResult, PointEstimate,
};
use serde::Serialize;

use crate::delta::cell_variance;
use crate::run::{evaluate, RunEstimate};

/// Accuracy per run with its binomial standard error.
///
/// Accuracy is a plain binomial proportion: `num_correct` successes out of
/// `num_draws` trials, so `stderr = sqrt(p·(1 - p) / n)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyEstimator {
    num_correct: Vec<f64>,
    num_draws: Vec<f64>,
    value: Vec<f64>,
    stderr: Vec<f64>,
}

impl AccuracyEstimator {
    pub fn new(batch: &ContingencyBatch) -> Self {
        let estimates = evaluate("accuracy", batch, estimate_run);
        Self {
            num_correct: estimates.effective,
            num_draws: estimates.num_draws,
            value: estimates.value,
            stderr: estimates.stderr,
        }
    }

    /// Validate the batch before estimating.
    pub fn try_new(batch: &ContingencyBatch) -> MetricResult<Self> {
        batch.validate()?;
        Ok(Self::new(batch))
    }

    /// TP + TN per run.
    pub fn num_correct(&self) -> &[f64] {
        &self.num_correct
    }
}

fn estimate_run(table: &ContingencyTable) -> RunEstimate {
    let num_correct = table.num_correct();
    let num_draws = table.num_draws();
    let value = num_correct / num_draws;

    RunEstimate {
        num_draws,
        effective: num_correct,
        value,
        stderr: (cell_variance(value) / num_draws).sqrt(),
    }
}

impl PointEstimate for AccuracyEstimator {
    fn value(&self) -> &[f64] {
        &self.value
    }

    fn stderr(&self) -> &[f64] {
        &self.stderr
    }
}

impl DrawCount for AccuracyEstimator {
    fn num_draws(&self) -> &[f64] {
        &self.num_draws
    }
}

impl BinomialProportion for AccuracyEstimator {
    fn num_successes(&self) -> &[f64] {
        &self.num_correct
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
        let estimator = AccuracyEstimator::new(&sample_batch());
        assert_eq!(estimator.num_draws(), &[50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_num_correct() {
        let estimator = AccuracyEstimator::new(&sample_batch());
        assert_eq!(estimator.num_correct(), &[13.0, 12.0, 10.0]);
        assert_eq!(estimator.num_successes(), estimator.num_correct());
    }

    #[test]
    fn test_value() {
        let estimator = AccuracyEstimator::new(&sample_batch());
        let expected = [0.26, 0.24, 0.2];
        for (got, want) in estimator.value().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_stderr() {
        let estimator = AccuracyEstimator::new(&sample_batch());
        let expected = [0.06203225, 0.06039868, 0.05656854];
        for (got, want) in estimator.stderr().iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_perfect_classifier_has_zero_stderr() {
        let batch = ContingencyBatch::from_rows([[10.0, 30.0, 0.0, 0.0]]);
        let estimator = AccuracyEstimator::new(&batch);
        assert_eq!(estimator.value(), &[1.0]);
        assert_eq!(estimator.stderr(), &[0.0]);
    }

    #[test]
    fn test_zero_draws_degrades_to_nan() {
        let batch = ContingencyBatch::from_rows([[0.0, 0.0, 0.0, 0.0], [1.0, 1.0, 1.0, 1.0]]);
        let estimator = AccuracyEstimator::new(&batch);
        assert!(estimator.value()[0].is_nan());
        assert!(estimator.stderr()[0].is_nan());
        assert_abs_diff_eq!(estimator.value()[1], 0.5);
    }

    #[test]
    fn test_try_new_rejects_zero_draws() {
        let batch = ContingencyBatch::from_rows([[1.0, 1.0, 1.0, 1.0], [0.0, 0.0, 0.0, 0.0]]);
        assert_eq!(
            AccuracyEstimator::try_new(&batch),
            Err(MetricError::ZeroDraws { run: 1 })
        );
    }
}
