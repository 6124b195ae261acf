/// A per-run point estimate with its standard error.
///
/// Both slices are index-aligned with the batch the estimate was built from.
pub trait PointEstimate {
    fn value(&self) -> &[f64];
    fn stderr(&self) -> &[f64];

    /// Number of runs covered by the estimate.
    fn len(&self) -> usize {
        self.value().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Estimates that know the total number of draws (TP+TN+FP+FN) per run.
pub trait DrawCount {
    fn num_draws(&self) -> &[f64];
}

/// A binomial proportion: successes over draws.
///
/// Required by the Agresti-Coull interval, which adds pseudo-counts to the
/// raw success and draw counts.
pub trait BinomialProportion: PointEstimate + DrawCount {
    fn num_successes(&self) -> &[f64];
}
