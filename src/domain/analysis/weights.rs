//! Weight vectors and tables produced by the AHP calculator.

use serde::{Deserialize, Serialize};

use super::AhpError;

#[derive(Debug, Deserialize)]
struct WeightVectorRepr {
    labels: Vec<String>,
    values: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct WeightTableRepr {
    alternatives: Vec<String>,
    criteria: Vec<String>,
    cells: Vec<f64>,
}

/// One weight per labelled item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightVectorRepr")]
pub struct WeightVector {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl WeightVector {
    /// Creates a weight vector.
    ///
    /// # Errors
    /// `DimensionMismatch` if the label and value counts differ.
    pub fn new(labels: Vec<impl Into<String>>, values: Vec<f64>) -> Result<Self, AhpError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != values.len() {
            return Err(AhpError::DimensionMismatch {
                expected: labels.len(),
                actual: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    pub(crate) fn from_parts(labels: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Weight for a label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean of the weights; NaN when empty.
    pub fn mean(&self) -> f64 {
        self.sum() / self.values.len() as f64
    }

    /// Iterates `(label, weight)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

/// Alternative weights per criterion: |alternatives| rows by |criteria| columns.
///
/// Cells for a criterion that has not been inserted yet hold NaN, matching how
/// an unfilled column in a labelled table behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightTableRepr")]
pub struct WeightTable {
    alternatives: Vec<String>,
    criteria: Vec<String>,
    /// Row-major: `cells[alt * criteria.len() + crit]`.
    cells: Vec<f64>,
}

impl WeightTable {
    /// Creates an empty table over the given axes.
    pub fn new(alternatives: Vec<impl Into<String>>, criteria: Vec<impl Into<String>>) -> Self {
        let alternatives: Vec<String> = alternatives.into_iter().map(Into::into).collect();
        let criteria: Vec<String> = criteria.into_iter().map(Into::into).collect();
        let cells = vec![f64::NAN; alternatives.len() * criteria.len()];
        Self {
            alternatives,
            criteria,
            cells,
        }
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    /// (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.alternatives.len(), self.criteria.len())
    }

    /// Fills the column for `criterion` from a weight vector over alternatives.
    ///
    /// Values are placed by alternative label. Alternatives the vector does
    /// not mention are left as NaN; labels the table does not know are
    /// ignored. Returns the number of alternatives that were filled.
    ///
    /// # Errors
    /// `UnknownCriterion` if the table has no such column.
    pub fn insert(&mut self, criterion: &str, weights: &WeightVector) -> Result<usize, AhpError> {
        let column = self
            .criteria
            .iter()
            .position(|c| c == criterion)
            .ok_or_else(|| AhpError::UnknownCriterion(criterion.to_string()))?;

        let width = self.criteria.len();
        let mut filled = 0;
        for (row, alternative) in self.alternatives.iter().enumerate() {
            let value = weights.get(alternative).unwrap_or(f64::NAN);
            if !value.is_nan() {
                filled += 1;
            }
            self.cells[row * width + column] = value;
        }
        Ok(filled)
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.cells[row * self.criteria.len() + column]
    }

    /// Cell by labels.
    pub fn value(&self, alternative: &str, criterion: &str) -> Option<f64> {
        let row = self.alternatives.iter().position(|a| a == alternative)?;
        let column = self.criteria.iter().position(|c| c == criterion)?;
        Some(self.get(row, column))
    }

    /// The weight vector stored for one criterion.
    pub fn column(&self, criterion: &str) -> Option<WeightVector> {
        let column = self.criteria.iter().position(|c| c == criterion)?;
        let values = (0..self.alternatives.len())
            .map(|row| self.get(row, column))
            .collect();
        Some(WeightVector::from_parts(self.alternatives.clone(), values))
    }

    pub(crate) fn row(&self, row: usize) -> &[f64] {
        let width = self.criteria.len();
        &self.cells[row * width..(row + 1) * width]
    }
}

impl TryFrom<WeightVectorRepr> for WeightVector {
    type Error = AhpError;

    fn try_from(repr: WeightVectorRepr) -> Result<Self, Self::Error> {
        WeightVector::new(repr.labels, repr.values)
    }
}

impl TryFrom<WeightTableRepr> for WeightTable {
    type Error = AhpError;

    fn try_from(repr: WeightTableRepr) -> Result<Self, Self::Error> {
        let expected = repr.alternatives.len() * repr.criteria.len();
        if repr.cells.len() != expected {
            return Err(AhpError::DimensionMismatch {
                expected,
                actual: repr.cells.len(),
            });
        }
        Ok(Self {
            alternatives: repr.alternatives,
            criteria: repr.criteria,
            cells: repr.cells,
        })
    }
}

/// One alternative's place in the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based position.
    pub rank: usize,
    pub alternative: String,
    pub score: f64,
}

/// Final score per alternative: the weight table multiplied by criterion weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalWeightVector(WeightVector);

impl FinalWeightVector {
    pub(crate) fn new(weights: WeightVector) -> Self {
        Self(weights)
    }

    pub fn weights(&self) -> &WeightVector {
        &self.0
    }

    pub fn get(&self, alternative: &str) -> Option<f64> {
        self.0.get(alternative)
    }

    pub fn values(&self) -> &[f64] {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Alternatives sorted by descending score.
    ///
    /// Ties keep input order. NaN scores sort last.
    pub fn ranking(&self) -> Vec<RankedAlternative> {
        let mut order: Vec<(&str, f64)> = self.0.iter().collect();
        order.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (true, true) => std::cmp::Ordering::Equal,
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => b.1.total_cmp(&a.1),
        });

        order
            .into_iter()
            .enumerate()
            .map(|(i, (alternative, score))| RankedAlternative {
                rank: i + 1,
                alternative: alternative.to_string(),
                score,
            })
            .collect()
    }

    /// Highest-scoring alternative, or None on an empty vector or a tie for first.
    pub fn best(&self) -> Option<String> {
        let ranking = self.ranking();
        let first = ranking.first()?;
        if first.score.is_nan() {
            return None;
        }
        match ranking.get(1) {
            Some(second) if second.score == first.score => None,
            _ => Some(first.alternative.clone()),
        }
    }
}
