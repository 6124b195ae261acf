//! Metric Report
//!
//! One-call evaluation of a contingency batch: every metric estimate with
//! its standard error and confidence intervals, ready to serialize.

pub mod config;
pub mod report;


pub use config::ReportConfig;
pub use report::{EvaluationReport, MetricReport, RunReport};

pub use confidence_intervals::{Interval, IntervalConfig, IntervalMethod};
pub use contingency_core::{ContingencyBatch, ContingencyColumns, ContingencyTable};
pub use metric_estimators::MetricKind;
