use contingency_core::{
    check_weight, ContingencyBatch, ContingencyTable, DrawCount, MetricResult, PointEstimate,
};
use serde::Serialize;

use crate::delta::RatioMoments;
use crate::run::{check_effective_draws, evaluate, RunEstimate};

/// Weight giving the balanced F1 score.
pub const DEFAULT_ETA: f64 = 0.5;

/// Weighted F-measure `TP / (TP + eta·FP + (1 - eta)·FN)` per run.
///
/// `eta` moves the score between recall (`eta = 0`) and precision
/// (`eta = 1`); at both ends the value and standard error coincide with
/// [`RecallEstimator`](crate::RecallEstimator) and
/// [`PrecisionEstimator`](crate::PrecisionEstimator). The standard error is
/// normalized by `TP + eta·FP + (1 - eta)·FN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FMeasureEstimator {
    eta: f64,
    num_draws: Vec<f64>,
    num_eff_draws: Vec<f64>,
    value: Vec<f64>,
    stderr: Vec<f64>,
}

impl FMeasureEstimator {
    /// `eta` is not range-checked; use [`FMeasureEstimator::try_new`] for that.
    pub fn new(batch: &ContingencyBatch, eta: f64) -> Self {
        let estimates = evaluate("f_measure", batch, |table| estimate_run(table, eta));
        Self {
            eta,
            num_draws: estimates.num_draws,
            num_eff_draws: estimates.effective,
            value: estimates.value,
            stderr: estimates.stderr,
        }
    }

    pub fn try_new(batch: &ContingencyBatch, eta: f64) -> MetricResult<Self> {
        check_weight(eta)?;
        batch.validate()?;
        let estimator = Self::new(batch, eta);
        check_effective_draws("f_measure", &estimator.num_eff_draws)?;
        Ok(estimator)
    }

    /// Balanced F1 (`eta = 0.5`).
    pub fn f1(batch: &ContingencyBatch) -> Self {
        Self::new(batch, DEFAULT_ETA)
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// TP + eta·FP + (1 - eta)·FN per run.
    pub fn num_eff_draws(&self) -> &[f64] {
        &self.num_eff_draws
    }
}

fn estimate_run(table: &ContingencyTable, eta: f64) -> RunEstimate {
    let num_draws = table.num_draws();
    let num_eff_draws =
        table.true_positives + eta * table.false_positives + (1.0 - eta) * table.false_negatives;

    let m_tp = table.true_positives / num_draws;
    let m_fp = table.false_positives / num_draws;
    let m_fn = table.false_negatives / num_draws;
    let (value, stderr) = RatioMoments::weighted(m_tp, m_fp, m_fn, eta).estimate(num_eff_draws);

    RunEstimate {
        num_draws,
        effective: num_eff_draws,
        value,
        stderr,
    }
}

impl PointEstimate for FMeasureEstimator {
    fn value(&self) -> &[f64] {
        &self.value
    }

    fn stderr(&self) -> &[f64] {
        &self.stderr
    }
}

impl DrawCount for FMeasureEstimator {
    fn num_draws(&self) -> &[f64] {
        &self.num_draws
    }
}
