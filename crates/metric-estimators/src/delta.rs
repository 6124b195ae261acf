//! Delta-method variance for a ratio of multinomial cell means.
//!
//! For `value = num / den` with both parts estimated from the same sample,
//! a first-order Taylor expansion gives
//!
//! ```text
//! var(num/den) ≈ (var(num) - 2·value·cov(num, den) + value²·var(den)) / den²
//! ```
//!
//! Precision, recall and the weighted F-measure only differ in how they
//! assemble the moments below.

/// Variance of a single multinomial cell mean: `m·(1 - m)`.
pub(crate) fn cell_variance(mean: f64) -> f64 {
    mean * (1.0 - mean)
}

/// Means, variances and covariance of a ratio's numerator and denominator,
/// all on the cell-probability scale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RatioMoments {
    pub num_val: f64,
    pub den_val: f64,
    pub num_var: f64,
    pub den_var: f64,
    pub cov: f64,
}

impl RatioMoments {
    /// Moments of `m_tp / (m_tp + m_other)`, where `m_other` is the FP cell
    /// for precision or the FN cell for recall.
    pub fn two_cell(m_tp: f64, m_other: f64) -> Self {
        let tp_var = cell_variance(m_tp);
        let other_var = cell_variance(m_other);

        Self {
            num_val: m_tp,
            den_val: m_tp + m_other,
            num_var: tp_var,
            // var(m_tp + m_other)
            den_var: tp_var + other_var - 2.0 * (m_tp * m_other),
            // cov(m_tp, m_tp + m_other)
            cov: tp_var - m_tp * m_other,
        }
    }

    /// Moments of `m_tp / (m_tp + eta·m_fp + (1 - eta)·m_fn)`.
    pub fn weighted(m_tp: f64, m_fp: f64, m_fn: f64, eta: f64) -> Self {
        let tp_var = cell_variance(m_tp);
        let fp_var = cell_variance(m_fp);
        let fn_var = cell_variance(m_fn);
        let rho = 1.0 - eta;

        Self {
            num_val: m_tp,
            den_val: m_tp + eta * m_fp + rho * m_fn,
            num_var: tp_var,
            den_var: tp_var + eta * eta * fp_var + rho * rho * fn_var
                - 2.0 * (eta * m_tp * m_fp + rho * m_tp * m_fn + eta * rho * m_fp * m_fn),
            cov: tp_var - eta * m_tp * m_fp - rho * m_tp * m_fn,
        }
    }

    pub fn value(&self) -> f64 {
        self.num_val / self.den_val
    }

    /// Delta-method sample variance of `num_val / den_val`.
    pub fn sample_variance(&self) -> f64 {
        let value = self.value();
        (self.num_var - 2.0 * value * self.cov + value.powi(2) * self.den_var)
            / self.den_val.powi(2)
    }

    /// `(value, stderr)` where the variance is scaled by `eff_draws` rather
    /// than the total number of draws.
    pub fn estimate(&self, eff_draws: f64) -> (f64, f64) {
        (self.value(), (self.sample_variance() / eff_draws).sqrt())
    }
}
