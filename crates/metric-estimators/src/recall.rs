use contingency_core::{ContingencyBatch, ContingencyTable, DrawCount, MetricResult, PointEstimate};
use serde::Serialize;

use crate::delta::RatioMoments;
use crate::run::{check_effective_draws, evaluate, RunEstimate};

/// Recall `TP / (TP + FN)` per run, with a delta-method standard error
/// normalized by the actual-positive count `TP + FN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecallEstimator {
    num_draws: Vec<f64>,
    num_eff_draws: Vec<f64>,
    value: Vec<f64>,
    stderr: Vec<f64>,
}

impl RecallEstimator {
    pub fn new(batch: &ContingencyBatch) -> Self {
        let estimates = evaluate("recall", batch, estimate_run);
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
        check_effective_draws("recall", &estimator.num_eff_draws)?;
        Ok(estimator)
    }

    /// TP + FN per run.
    pub fn num_eff_draws(&self) -> &[f64] {
        &self.num_eff_draws
    }
}

fn estimate_run(table: &ContingencyTable) -> RunEstimate {
    let num_draws = table.num_draws();
    let num_eff_draws = table.actual_positives();

    let m_tp = table.true_positives / num_draws;
    let m_fn = table.false_negatives / num_draws;
    let (value, stderr) = RatioMoments::two_cell(m_tp, m_fn).estimate(num_eff_draws);

    RunEstimate {
        num_draws,
        effective: num_eff_draws,
        value,
        stderr,
    }
}

impl PointEstimate for RecallEstimator {
    fn value(&self) -> &[f64] {
        &self.value
    }

    fn stderr(&self) -> &[f64] {
        &self.stderr
    }
}

impl DrawCount for RecallEstimator {
    fn num_draws(&self) -> &[f64] {
        &self.num_draws
    }
}
