use contingency_core::{ContingencyBatch, ContingencyTable, MetricError, MetricResult};
use rayon::prelude::*;

/// Estimate for a single contingency table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunEstimate {
    pub num_draws: f64,
    /// `num_correct` for accuracy, `num_eff_draws` for the ratio metrics.
    pub effective: f64,
    pub value: f64,
    pub stderr: f64,
}

/// Column-wise estimates for a whole batch, in run order.
#[derive(Debug, Default)]
pub(crate) struct BatchEstimates {
    pub num_draws: Vec<f64>,
    pub effective: Vec<f64>,
    pub value: Vec<f64>,
    pub stderr: Vec<f64>,
}

impl BatchEstimates {
    fn with_capacity(n: usize) -> Self {
        Self {
            num_draws: Vec::with_capacity(n),
            effective: Vec::with_capacity(n),
            value: Vec::with_capacity(n),
            stderr: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, run: RunEstimate) {
        self.num_draws.push(run.num_draws);
        self.effective.push(run.effective);
        self.value.push(run.value);
        self.stderr.push(run.stderr);
    }

    fn degenerate_runs(&self) -> usize {
        self.value
            .iter()
            .zip(&self.stderr)
            .filter(|(v, s)| !v.is_finite() || !s.is_finite())
            .count()
    }
}

/// Apply `estimate` to every table of the batch.
///
/// Runs are independent, so they are evaluated with rayon; `collect` keeps
/// the input order.
pub(crate) fn evaluate<F>(metric: &'static str, batch: &ContingencyBatch, estimate: F) -> BatchEstimates
where
    F: Fn(&ContingencyTable) -> RunEstimate + Sync + Send,
{
    let runs: Vec<RunEstimate> = batch.tables().par_iter().map(estimate).collect();

    let mut estimates = BatchEstimates::with_capacity(runs.len());
    for run in runs {
        estimates.push(run);
    }

    let degenerate = estimates.degenerate_runs();
    if degenerate > 0 {
        tracing::warn!(
            metric,
            degenerate,
            runs = batch.len(),
            "Non-finite estimates produced; check for runs with zero draws or an empty denominator"
        );
    }
    tracing::debug!(metric, runs = batch.len(), "Computed estimates");

    estimates
}

/// Reject runs whose ratio denominator is zero.
///
/// A well-formed batch can still have, for example, no predicted positives
/// in some run, which leaves precision undefined.
pub(crate) fn check_effective_draws(
    metric: &'static str,
    effective: &[f64],
) -> MetricResult<()> {
    match effective.iter().position(|&n| n <= 0.0) {
        Some(run) => Err(MetricError::EmptyDenominator { run, metric }),
        None => Ok(()),
    }
}
