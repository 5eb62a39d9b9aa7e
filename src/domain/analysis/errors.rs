//! AHP-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while building matrices or computing weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    #[error("Matrix has no items")]
    EmptyMatrix,

    #[error("Matrix row {row} has {actual} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Matrix has {labels} labels but {rows} rows")]
    LabelCountMismatch { labels: usize, rows: usize },

    #[error("Label '{0}' appears more than once")]
    DuplicateLabel(String),

    #[error("Unknown label '{0}'")]
    UnknownLabel(String),

    #[error("Column '{label}' sums to {sum}; cannot normalize")]
    DegenerateColumn { label: String, sum: f64 },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Labels do not match for {context}: expected [{expected}], got [{actual}]")]
    LabelMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("No random index for a {dimension}x{dimension} matrix (maximum {max})")]
    UnsupportedDimension { dimension: usize, max: usize },

    #[error("Matrix supplied for unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("Comparison of '{row}' over '{column}' must be positive and finite, got {value}")]
    InvalidComparison {
        row: String,
        column: String,
        value: f64,
    },
}

impl AhpError {
    /// Builds a label mismatch from two label lists.
    pub fn label_mismatch(context: impl Into<String>, expected: &[String], actual: &[String]) -> Self {
        AhpError::LabelMismatch {
            context: context.into(),
            expected: expected.join(", "),
            actual: actual.join(", "),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::EmptyMatrix => ErrorCode::EmptyMatrix,
            AhpError::NotSquare { .. } => ErrorCode::NotSquare,
            AhpError::LabelCountMismatch { .. } => ErrorCode::DimensionMismatch,
            AhpError::DuplicateLabel(_) => ErrorCode::DuplicateLabel,
            AhpError::UnknownLabel(_) => ErrorCode::UnknownLabel,
            AhpError::DegenerateColumn { .. } => ErrorCode::DegenerateColumn,
            AhpError::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            AhpError::LabelMismatch { .. } => ErrorCode::LabelMismatch,
            AhpError::UnsupportedDimension { .. } => ErrorCode::UnsupportedDimension,
            AhpError::UnknownCriterion(_) => ErrorCode::UnknownLabel,
            AhpError::InvalidComparison { .. } => ErrorCode::InvalidComparison,
        }
    }
}

impl From<AhpError> for DomainError {
    fn from(err: AhpError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            AhpError::DuplicateLabel(label) | AhpError::UnknownLabel(label) => {
                domain.with_detail("label", label)
            }
            AhpError::DegenerateColumn { label, .. } => domain.with_detail("label", label),
            AhpError::UnknownCriterion(criterion) => domain.with_detail("criterion", criterion),
            AhpError::LabelMismatch { context, .. } => domain.with_detail("context", context),
            AhpError::UnsupportedDimension { dimension, .. } => {
                domain.with_detail("dimension", dimension.to_string())
            }
            AhpError::InvalidComparison { row, column, .. } => {
                domain.with_detail("row", row).with_detail("column", column)
            }
            _ => domain,
        }
    }
}
