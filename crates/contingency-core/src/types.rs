use serde::{Deserialize, Serialize};

use crate::error::{MetricError, MetricResult};

/// Binary contingency table for one run (or fold).
///
/// Counts are `f64` so partial and weighted counts are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContingencyTable {
    #[serde(rename = "TP", alias = "tp")]
    pub true_positives: f64,
    #[serde(rename = "TN", alias = "tn")]
    pub true_negatives: f64,
    #[serde(rename = "FP", alias = "fp")]
    pub false_positives: f64,
    #[serde(rename = "FN", alias = "fn")]
    pub false_negatives: f64,
}

impl ContingencyTable {
    pub fn new(tp: f64, tn: f64, fp: f64, fn_: f64) -> Self {
        Self {
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }

    /// Total draws: TP + TN + FP + FN.
    pub fn num_draws(&self) -> f64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Correct decisions: TP + TN.
    pub fn num_correct(&self) -> f64 {
        self.true_positives + self.true_negatives
    }

    /// TP + FP.
    pub fn predicted_positives(&self) -> f64 {
        self.true_positives + self.false_positives
    }

    /// TP + FN.
    pub fn actual_positives(&self) -> f64 {
        self.true_positives + self.false_negatives
    }

    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("TP", self.true_positives),
            ("TN", self.true_negatives),
            ("FP", self.false_positives),
            ("FN", self.false_negatives),
        ]
    }

    /// Check that every count is finite and non-negative and that the table
    /// has at least one draw. `run` is only used for error reporting.
    pub fn validate(&self, run: usize) -> MetricResult<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(MetricError::NonFiniteCount { run, field, value });
            }
            if value < 0.0 {
                return Err(MetricError::NegativeCount { run, field, value });
            }
        }
        if self.num_draws() <= 0.0 {
            return Err(MetricError::ZeroDraws { run });
        }
        Ok(())
    }
}

impl From<[f64; 4]> for ContingencyTable {
    /// Row order is `[TP, TN, FP, FN]`.
    fn from(row: [f64; 4]) -> Self {
        Self::new(row[0], row[1], row[2], row[3])
    }
}

/// Column-oriented counts, one entry per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct ContingencyColumns {
    pub TP: Vec<f64>,
    pub TN: Vec<f64>,
    pub FP: Vec<f64>,
    pub FN: Vec<f64>,
}

/// Accepted serialized shapes for a batch: a list of tables or four columns.
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchRepr {
    Tables(Vec<ContingencyTable>),
    Columns(ContingencyColumns),
}

/// Immutable collection of contingency tables, one per run.
///
/// Run order is preserved by every estimator and interval built from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "BatchRepr", into = "Vec<ContingencyTable>")]
pub struct ContingencyBatch {
    tables: Vec<ContingencyTable>,
}

impl ContingencyBatch {
    /// Build a batch without validating the counts.
    pub fn new(tables: Vec<ContingencyTable>) -> Self {
        Self { tables }
    }

    /// Build a batch and validate it in one step.
    pub fn checked(tables: Vec<ContingencyTable>) -> MetricResult<Self> {
        let batch = Self::new(tables);
        batch.validate()?;
        Ok(batch)
    }

    /// Build from `[TP, TN, FP, FN]` rows.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [f64; 4]>,
    {
        Self::new(rows.into_iter().map(ContingencyTable::from).collect())
    }

    /// Build from four equally long columns.
    pub fn from_columns(columns: ContingencyColumns) -> MetricResult<Self> {
        let expected = columns.TP.len();
        for (field, len) in [
            ("TN", columns.TN.len()),
            ("FP", columns.FP.len()),
            ("FN", columns.FN.len()),
        ] {
            if len != expected {
                return Err(MetricError::LengthMismatch {
                    field,
                    expected,
                    found: len,
                });
            }
        }

        let tables = (0..expected)
            .map(|i| {
                ContingencyTable::new(columns.TP[i], columns.TN[i], columns.FP[i], columns.FN[i])
            })
            .collect();
        Ok(Self::new(tables))
    }

    pub fn tables(&self) -> &[ContingencyTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContingencyTable> {
        self.tables.iter()
    }

    /// Split back into columns.
    pub fn to_columns(&self) -> ContingencyColumns {
        ContingencyColumns {
            TP: self.tables.iter().map(|t| t.true_positives).collect(),
            TN: self.tables.iter().map(|t| t.true_negatives).collect(),
            FP: self.tables.iter().map(|t| t.false_positives).collect(),
            FN: self.tables.iter().map(|t| t.false_negatives).collect(),
        }
    }

    /// Fail fast on an empty batch, negative or non-finite counts, and runs
    /// with zero total draws.
    ///
    /// Ratio metrics can still be undefined for a run that passes (no
    /// predicted positives for precision, say); their `try_new`
    /// constructors check that separately.
    pub fn validate(&self) -> MetricResult<()> {
        if self.tables.is_empty() {
            return Err(MetricError::EmptyBatch);
        }
        self.tables
            .iter()
            .enumerate()
            .try_for_each(|(run, table)| table.validate(run))
    }
}

impl TryFrom<ContingencyColumns> for ContingencyBatch {
    type Error = MetricError;

    fn try_from(columns: ContingencyColumns) -> MetricResult<Self> {
        Self::from_columns(columns)
    }
}

impl TryFrom<BatchRepr> for ContingencyBatch {
    type Error = MetricError;

    fn try_from(repr: BatchRepr) -> MetricResult<Self> {
        match repr {
            BatchRepr::Tables(tables) => Ok(Self::new(tables)),
            BatchRepr::Columns(columns) => Self::from_columns(columns),
        }
    }
}

impl From<ContingencyBatch> for Vec<ContingencyTable> {
    fn from(batch: ContingencyBatch) -> Self {
        batch.tables
    }
}

impl FromIterator<ContingencyTable> for ContingencyBatch {
    fn from_iter<I: IntoIterator<Item = ContingencyTable>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ContingencyBatch {
    type Item = &'a ContingencyTable;
    type IntoIter = std::slice::Iter<'a, ContingencyTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
