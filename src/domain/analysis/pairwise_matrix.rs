//! Pairwise Matrix - Square comparison matrices keyed by item labels.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::AhpError;

/// Wire shape: labels plus nested rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MatrixRepr {
    labels: Vec<String>,
    values: Vec<Vec<f64>>,
}

/// A square matrix of pairwise preferences.
///
/// Entry (i, j) is how strongly item i is preferred over item j. The diagonal
/// is 1 by convention. Reciprocity (a_ji = 1 / a_ij) is expected but not
/// enforced; values are taken as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct PairwiseMatrix {
    labels: Vec<String>,
    /// Row-major, `labels.len()` squared entries.
    values: Vec<f64>,
}

impl PairwiseMatrix {
    /// Creates a matrix with every entry set to 1 (all items equally preferred).
    pub fn ones(labels: Vec<impl Into<String>>) -> Self {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let n = labels.len();
        Self {
            labels,
            values: vec![1.0; n * n],
        }
    }

    /// Creates a matrix from explicit rows.
    ///
    /// # Errors
    /// - `LabelCountMismatch` if the row count differs from the label count
    /// - `NotSquare` if any row has the wrong length
    /// - `DuplicateLabel` if a label repeats
    pub fn from_rows(
        labels: Vec<impl Into<String>>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, AhpError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let n = labels.len();

        if rows.len() != n {
            return Err(AhpError::LabelCountMismatch {
                labels: n,
                rows: rows.len(),
            });
        }
        ensure_unique(&labels)?;

        let mut values = Vec::with_capacity(n * n);
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != n {
                return Err(AhpError::NotSquare {
                    row,
                    expected: n,
                    actual: entries.len(),
                });
            }
            values.extend(entries);
        }

        Ok(Self { labels, values })
    }

    /// Creates a builder starting from an all-ones matrix over `labels`.
    pub fn builder(labels: Vec<impl Into<String>>) -> PairwiseMatrixBuilder {
        PairwiseMatrixBuilder::new(labels)
    }

    /// Ordered item labels (both axes).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of items.
    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the matrix has no items.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entry at (row, column). Panics if out of bounds, like slice indexing.
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.dimension() + column]
    }

    /// Overwrites the entry at (row, column).
    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        let n = self.dimension();
        self.values[row * n + column] = value;
    }

    /// Looks up an entry by labels.
    pub fn value(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let row = self.index_of(row_label)?;
        let column = self.index_of(column_label)?;
        Some(self.get(row, column))
    }

    /// Position of a label on either axis.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// A single row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let n = self.dimension();
        &self.values[row * n..(row + 1) * n]
    }

    /// Sum of the entries in one column.
    pub fn column_sum(&self, column: usize) -> f64 {
        (0..self.dimension()).map(|row| self.get(row, column)).sum()
    }

    /// Nested rows, in label order.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.dimension()).map(|r| self.row(r).to_vec()).collect()
    }

    /// Checks that a_ji equals 1 / a_ij within `tolerance` for every pair.
    pub fn is_reciprocal(&self, tolerance: f64) -> bool {
        let n = self.dimension();
        for i in 0..n {
            for j in i..n {
                let forward = self.get(i, j);
                let backward = self.get(j, i);
                if (forward * backward - 1.0).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<MatrixRepr> for PairwiseMatrix {
    type Error = AhpError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        PairwiseMatrix::from_rows(repr.labels, repr.values)
    }
}

impl From<PairwiseMatrix> for MatrixRepr {
    fn from(matrix: PairwiseMatrix) -> Self {
        MatrixRepr {
            values: matrix.rows(),
            labels: matrix.labels,
        }
    }
}

/// A pairwise matrix whose columns have each been scaled to sum to 1.
///
/// Only produced by [`super::AhpCalculator::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl NormalizedMatrix {
    pub(crate) fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), labels.len() * labels.len());
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.values[row * self.dimension() + column]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let n = self.dimension();
        &self.values[row * n..(row + 1) * n]
    }

    pub fn column_sum(&self, column: usize) -> f64 {
        (0..self.dimension()).map(|row| self.get(row, column)).sum()
    }
}

/// Builder for pairwise matrices that keeps entries reciprocal.
#[derive(Debug)]
pub struct PairwiseMatrixBuilder {
    matrix: PairwiseMatrix,
    error: Option<AhpError>,
}

impl PairwiseMatrixBuilder {
    fn new(labels: Vec<impl Into<String>>) -> Self {
        let matrix = PairwiseMatrix::ones(labels);
        let error = ensure_unique(matrix.labels()).err();
        Self { matrix, error }
    }

    /// Records that `row` is preferred over `column` by `value`.
    ///
    /// Writes `value` at (row, column) and `1 / value` at (column, row).
    /// The first invalid comparison is reported by [`Self::build`].
    pub fn compare(mut self, row: &str, column: &str, value: f64) -> Self {
        if self.error.is_some() {
            return self;
        }

        if !value.is_finite() || value <= 0.0 {
            self.error = Some(AhpError::InvalidComparison {
                row: row.to_string(),
                column: column.to_string(),
                value,
            });
            return self;
        }

        let (i, j) = match (self.matrix.index_of(row), self.matrix.index_of(column)) {
            (Some(i), Some(j)) => (i, j),
            (None, _) => {
                self.error = Some(AhpError::UnknownLabel(row.to_string()));
                return self;
            }
            (_, None) => {
                self.error = Some(AhpError::UnknownLabel(column.to_string()));
                return self;
            }
        };

        self.matrix.set(i, j, value);
        self.matrix.set(j, i, 1.0 / value);
        self
    }

    /// Finishes the matrix.
    pub fn build(self) -> Result<PairwiseMatrix, AhpError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.matrix),
        }
    }
}

fn ensure_unique(labels: &[String]) -> Result<(), AhpError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(AhpError::DuplicateLabel(label.clone()));
        }
    }
    Ok(())
}
