use thiserror::Error;

/// Input validation failures for contingency batches and interval parameters.
///
/// The unchecked estimator constructors never return these; degenerate input
/// there degrades to `NaN`/`inf` values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("Empty batch: at least one contingency table is required")]
    EmptyBatch,

    #[error("Negative count in run {run}: {field} = {value}")]
    NegativeCount {
        run: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Non-finite count in run {run}: {field} = {value}")]
    NonFiniteCount {
        run: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Run {run} has no draws (TP+TN+FP+FN = 0)")]
    ZeroDraws { run: usize },

    #[error("Run {run} has an empty {metric} denominator")]
    EmptyDenominator { run: usize, metric: &'static str },

    #[error("Invalid F-measure weight: {0} (expected 0 <= eta <= 1)")]
    InvalidWeight(f64),

    #[error("Invalid significance level: {0} (expected 0 < alpha < 1)")]
    InvalidAlpha(f64),

    #[error("Column length mismatch: {field} has {found} values, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MetricError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        MetricError::InvalidConfig(msg.into())
    }
}

pub type MetricResult<T> = Result<T, MetricError>;

/// Reject F-measure weights outside `[0, 1]`.
pub fn check_weight(eta: f64) -> MetricResult<f64> {
    if (0.0..=1.0).contains(&eta) {
        Ok(eta)
    } else {
        Err(MetricError::InvalidWeight(eta))
    }
}

/// Reject significance levels outside the open interval `(0, 1)`.
pub fn check_alpha(alpha: f64) -> MetricResult<f64> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(MetricError::InvalidAlpha(alpha))
    }
}
