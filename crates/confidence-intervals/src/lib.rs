//! Confidence Intervals
//!
//! Interval constructors for metric estimates:
//! - [`normal::ci_wald`] for any estimate with a value and standard error
//! - [`binomial::ci_agresti_coull`] and [`binomial::ci_wilson`] for binomial
//!   proportions such as accuracy
//!
//! All constructors are pure functions returning one [`Interval`] per run,
//! in run order.

pub mod binomial;
pub mod config;
pub mod interval;
pub mod method;
pub mod normal;
pub mod quantile;

pub use binomial::{ci_agresti_coull, ci_wilson, try_ci_agresti_coull, try_ci_wilson};
pub use config::IntervalConfig;
pub use interval::Interval;
pub use method::{intervals_for_proportion, IntervalMethod};
pub use normal::{ci_wald, try_ci_wald};
pub use quantile::{standard_normal_quantile, try_two_sided_z, two_sided_z, DEFAULT_ALPHA};
