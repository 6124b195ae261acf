use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use confidence_intervals::{ci_wald, intervals_for_proportion, Interval, IntervalMethod};
use contingency_core::{check_weight, ContingencyBatch, DrawCount, PointEstimate};
use metric_estimators::{
    AccuracyEstimator, FMeasureEstimator, MetricKind, PrecisionEstimator, RecallEstimator,
};
use serde::Serialize;

use crate::config::ReportConfig;

/// One run of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub run: usize,
    pub value: f64,
    pub stderr: f64,
    pub num_draws: f64,
    /// `num_correct` for accuracy, `num_eff_draws` otherwise.
    pub effective_draws: f64,
    pub intervals: BTreeMap<IntervalMethod, Interval>,
}

/// All runs of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub metric: MetricKind,
    /// Interval method to quote first; the configured one for accuracy,
    /// Wald for the ratio metrics.
    pub primary_method: IntervalMethod,
    pub runs: Vec<RunReport>,
}

impl MetricReport {
    fn from_estimator<E>(
        metric: MetricKind,
        primary_method: IntervalMethod,
        estimator: &E,
        effective_draws: &[f64],
        intervals: &[(IntervalMethod, Vec<Interval>)],
    ) -> Self
    where
        E: PointEstimate + DrawCount,
    {
        let runs = (0..estimator.len())
            .map(|i| RunReport {
                run: i,
                value: estimator.value()[i],
                stderr: estimator.stderr()[i],
                num_draws: estimator.num_draws()[i],
                effective_draws: effective_draws[i],
                intervals: intervals
                    .iter()
                    .map(|(method, bounds)| (*method, bounds[i]))
                    .collect(),
            })
            .collect();

        Self {
            metric,
            primary_method,
            runs,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.runs.iter().map(|r| r.value).collect()
    }

    pub fn interval(&self, run: usize, method: IntervalMethod) -> Option<Interval> {
        self.runs.get(run)?.intervals.get(&method).copied()
    }

    /// Interval for `run` under [`MetricReport::primary_method`].
    pub fn primary_interval(&self, run: usize) -> Option<Interval> {
        self.interval(run, self.primary_method)
    }
}

/// Every metric with its intervals for one batch.
///
/// Accuracy carries all three interval methods, with the configured one as
/// its primary interval; precision, recall and the F-measure carry Wald
/// intervals only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub alpha: f64,
    pub confidence_level: f64,
    pub eta: f64,
    pub num_runs: usize,
    pub metrics: Vec<MetricReport>,
}

impl EvaluationReport {
    pub fn build(batch: &ContingencyBatch, config: &ReportConfig) -> Result<Self> {
        if config.validate {
            batch.validate().context("Contingency batch failed validation")?;
            check_weight(config.eta).context("Invalid F-measure weight")?;
        }

        let alpha = config.interval.alpha;
        let method = config.interval.method;
        tracing::info!(
            runs = batch.len(),
            alpha,
            %method,
            eta = config.eta,
            "Building evaluation report"
        );

        let accuracy = AccuracyEstimator::new(batch);
        let accuracy_intervals: Vec<(IntervalMethod, Vec<Interval>)> = IntervalMethod::ALL
            .iter()
            .map(|&m| (m, intervals_for_proportion(&accuracy, m, alpha)))
            .collect();

        let (precision, recall, f_measure) = if config.validate {
            (
                PrecisionEstimator::try_new(batch).context("Precision is undefined")?,
                RecallEstimator::try_new(batch).context("Recall is undefined")?,
                FMeasureEstimator::try_new(batch, config.eta)
                    .context("F-measure is undefined")?,
            )
        } else {
            (
                PrecisionEstimator::new(batch),
                RecallEstimator::new(batch),
                FMeasureEstimator::new(batch, config.eta),
            )
        };

        let metrics = vec![
            MetricReport::from_estimator(
                MetricKind::Accuracy,
                method,
                &accuracy,
                accuracy.num_correct(),
                &accuracy_intervals,
            ),
            MetricReport::from_estimator(
                MetricKind::Precision,
                IntervalMethod::Wald,
                &precision,
                precision.num_eff_draws(),
                &[(IntervalMethod::Wald, ci_wald(&precision, alpha))],
            ),
            MetricReport::from_estimator(
                MetricKind::Recall,
                IntervalMethod::Wald,
                &recall,
                recall.num_eff_draws(),
                &[(IntervalMethod::Wald, ci_wald(&recall, alpha))],
            ),
            MetricReport::from_estimator(
                MetricKind::FMeasure,
                IntervalMethod::Wald,
                &f_measure,
                f_measure.num_eff_draws(),
                &[(IntervalMethod::Wald, ci_wald(&f_measure, alpha))],
            ),
        ];

        Ok(Self {
            alpha,
            confidence_level: config.interval.confidence_level(),
            eta: config.eta,
            num_runs: batch.len(),
            metrics,
        })
    }

    pub fn metric(&self, kind: MetricKind) -> Option<&MetricReport> {
        self.metrics.iter().find(|m| m.metric == kind)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize evaluation report")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize evaluation report")
    }
}

/// One line per run and metric. Bounds are clamped to `[0, 1]` and the
/// primary interval is marked with `*`.
impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} runs, {:.0}% intervals, eta = {}",
            self.num_runs,
            self.confidence_level * 100.0,
            self.eta
        )?;
        for metric in &self.metrics {
            for run in &metric.runs {
                write!(
                    f,
                    "{:<10} run {:>3}: {:.4} ± {:.4}",
                    metric.metric.as_str(),
                    run.run,
                    run.value,
                    run.stderr
                )?;
                for (method, ci) in &run.intervals {
                    let ci = ci.clamped_to_unit();
                    let marker = if *method == metric.primary_method { "*" } else { "" };
                    write!(f, "  {}{} [{:.4}, {:.4}]", method, marker, ci.lower, ci.upper)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
