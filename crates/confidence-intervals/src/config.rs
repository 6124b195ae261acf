use contingency_core::{check_alpha, MetricError, MetricResult};
use serde::{Deserialize, Serialize};

use crate::method::IntervalMethod;
use crate::quantile::DEFAULT_ALPHA;

pub const ALPHA_ENV: &str = "METRIC_CI_ALPHA";
pub const METHOD_ENV: &str = "METRIC_CI_METHOD";

/// Significance level and method for interval construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Two-sided significance level (0.05 gives 95% intervals).
    pub alpha: f64,
    /// Method used for proportion metrics; ratio metrics always use Wald.
    pub method: IntervalMethod,
}

impl Default for IntervalConfig {
    /// Reads the environment, falling back to 95% Wald intervals on missing
    /// or unparseable values.
    fn default() -> Self {
        Self::from_env().unwrap_or(Self {
            alpha: DEFAULT_ALPHA,
            method: IntervalMethod::default(),
        })
    }
}

impl IntervalConfig {
    pub fn new(alpha: f64, method: IntervalMethod) -> MetricResult<Self> {
        check_alpha(alpha)?;
        Ok(Self { alpha, method })
    }

    /// Load from `METRIC_CI_ALPHA` and `METRIC_CI_METHOD`; unset variables
    /// take their defaults, invalid ones are an error.
    pub fn from_env() -> MetricResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`IntervalConfig::from_env`] over any key lookup. Empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> MetricResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let alpha = match lookup(ALPHA_ENV).filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                MetricError::invalid_config(format!("{} must be a number, got '{}'", ALPHA_ENV, raw))
            })?,
            None => DEFAULT_ALPHA,
        };

        let method = match lookup(METHOD_ENV).filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw.parse::<IntervalMethod>()?,
            None => IntervalMethod::default(),
        };

        Self::new(alpha, method)
    }

    /// Confidence level, e.g. 0.95.
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }
}
