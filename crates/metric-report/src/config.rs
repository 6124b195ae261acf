use anyhow::{Context, Result};
use confidence_intervals::IntervalConfig;
use contingency_core::check_weight;
use metric_estimators::DEFAULT_ETA;
use serde::{Deserialize, Serialize};
use std::env;

pub const ETA_ENV: &str = "METRIC_F_ETA";
pub const VALIDATE_ENV: &str = "METRIC_VALIDATE_INPUT";

/// Settings for [`EvaluationReport::build`](crate::EvaluationReport::build).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub interval: IntervalConfig,
    /// F-measure weight between recall (0) and precision (1).
    pub eta: f64,
    /// Reject malformed batches instead of letting `NaN`s through.
    pub validate: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            interval: IntervalConfig::default(),
            eta: DEFAULT_ETA,
            validate: true,
        }
    }
}

impl ReportConfig {
    pub fn new(interval: IntervalConfig, eta: f64) -> Result<Self> {
        check_weight(eta).context("Invalid F-measure weight")?;
        Ok(Self {
            interval,
            eta,
            validate: true,
        })
    }

    /// Load from `METRIC_CI_ALPHA`, `METRIC_CI_METHOD`, `METRIC_F_ETA` and
    /// `METRIC_VALIDATE_INPUT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ReportConfig::from_env`] over any key lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval =
            IntervalConfig::from_lookup(&lookup).context("Failed to load interval settings")?;
        let read = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let eta: f64 = match read(ETA_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number, got '{}'", ETA_ENV, raw))?,
            None => DEFAULT_ETA,
        };

        let validate: bool = match read(VALIDATE_ENV) {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be true or false, got '{}'", VALIDATE_ENV, raw))?,
            None => true,
        };

        let config = Self {
            validate,
            ..Self::new(interval, eta)?
        };
        tracing::debug!(
            alpha = config.interval.alpha,
            method = %config.interval.method,
            eta = config.eta,
            validate = config.validate,
            "Report configuration loaded"
        );
        Ok(config)
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
