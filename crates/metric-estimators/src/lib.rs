//! Metric Estimators
//!
//! Point estimates and standard errors for accuracy, precision, recall and
//! the weighted F-measure, computed per run from a [`ContingencyBatch`].
//! Accuracy uses the binomial standard error; the ratio metrics use the
//! delta method.

pub mod accuracy;
mod delta;
pub mod f_measure;
pub mod precision;
pub mod recall;
mod run;

use serde::{Deserialize, Serialize};

pub use accuracy::AccuracyEstimator;
pub use contingency_core::{
    BinomialProportion, ContingencyBatch, ContingencyTable, DrawCount, MetricError, MetricResult,
    PointEstimate,
};
pub use f_measure::{FMeasureEstimator, DEFAULT_ETA};
pub use precision::PrecisionEstimator;
pub use recall::RecallEstimator;

/// The metrics this crate can estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Accuracy,
    Precision,
    Recall,
    FMeasure,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Accuracy,
        MetricKind::Precision,
        MetricKind::Recall,
        MetricKind::FMeasure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Accuracy => "accuracy",
            MetricKind::Precision => "precision",
            MetricKind::Recall => "recall",
            MetricKind::FMeasure => "f_measure",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
