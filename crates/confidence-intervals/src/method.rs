use std::fmt;
use std::str::FromStr;

use contingency_core::{BinomialProportion, MetricError};
use serde::{Deserialize, Serialize};

use crate::binomial::{ci_agresti_coull, ci_wilson};
use crate::interval::Interval;
use crate::normal::ci_wald;

/// Interval construction method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalMethod {
    /// Normal approximation, valid for every estimator.
    #[default]
    Wald,
    /// Pseudo-count adjusted Wald, proportions only.
    AgrestiCoull,
    /// Score interval, proportions only.
    Wilson,
}

impl IntervalMethod {
    pub const ALL: [IntervalMethod; 3] = [
        IntervalMethod::Wald,
        IntervalMethod::AgrestiCoull,
        IntervalMethod::Wilson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalMethod::Wald => "wald",
            IntervalMethod::AgrestiCoull => "agresti-coull",
            IntervalMethod::Wilson => "wilson",
        }
    }

    /// Whether the method needs a binomial proportion (successes over draws).
    pub fn requires_proportion(&self) -> bool {
        !matches!(self, IntervalMethod::Wald)
    }
}

impl fmt::Display for IntervalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalMethod {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "wald" | "normal" => Ok(IntervalMethod::Wald),
            "agresti-coull" | "ac" => Ok(IntervalMethod::AgrestiCoull),
            "wilson" | "score" => Ok(IntervalMethod::Wilson),
            other => Err(MetricError::invalid_config(format!(
                "unknown interval method '{}'",
                other
            ))),
        }
    }
}

/// Intervals for a binomial proportion with any of the three methods.
pub fn intervals_for_proportion<E: BinomialProportion + ?Sized>(
    estimator: &E,
    method: IntervalMethod,
    alpha: f64,
) -> Vec<Interval> {
    match method {
        IntervalMethod::Wald => ci_wald(estimator, alpha),
        IntervalMethod::AgrestiCoull => ci_agresti_coull(estimator, alpha),
        IntervalMethod::Wilson => ci_wilson(estimator, alpha),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metric_estimators::{AccuracyEstimator, ContingencyBatch};

    #[test]
    fn test_parse_method_names() {
        assert_eq!("wald".parse::<IntervalMethod>().unwrap(), IntervalMethod::Wald);
        assert_eq!(
            "Agresti_Coull".parse::<IntervalMethod>().unwrap(),
            IntervalMethod::AgrestiCoull
        );
        assert_eq!(" wilson ".parse::<IntervalMethod>().unwrap(), IntervalMethod::Wilson);
        assert!("clopper-pearson".parse::<IntervalMethod>().is_err());
    }

    #[test]
    fn test_round_trip_names() {
        for method in IntervalMethod::ALL {
            assert_eq!(method.as_str().parse::<IntervalMethod>().unwrap(), method);
        }
        assert_eq!(
            serde_json::to_string(&IntervalMethod::AgrestiCoull).unwrap(),
            "\"agresti-coull\""
        );
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let estimator =
            AccuracyEstimator::new(&ContingencyBatch::from_rows([[13.0, 0.0, 12.0, 25.0]]));

        assert_eq!(
            intervals_for_proportion(&estimator, IntervalMethod::Wald, 0.05),
            ci_wald(&estimator, 0.05)
        );
        assert_eq!(
            intervals_for_proportion(&estimator, IntervalMethod::AgrestiCoull, 0.05),
            ci_agresti_coull(&estimator, 0.05)
        );
        assert_eq!(
            intervals_for_proportion(&estimator, IntervalMethod::Wilson, 0.05),
            ci_wilson(&estimator, 0.05)
        );
        assert!(!IntervalMethod::Wald.requires_proportion());
        assert!(IntervalMethod::Wilson.requires_proportion());
    }
}
