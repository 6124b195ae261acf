//! Contingency Core
//!
//! Shared data model for binary classification metrics: per-run contingency
//! tables, the batch that groups them, the validation error type, and the
//! capability traits consumed by the interval constructors.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
