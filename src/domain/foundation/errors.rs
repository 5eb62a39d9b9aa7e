//! Error types for the domain layer.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors raised while parsing user-supplied values such as item names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                field
            }
        }
    }
}

/// Stable, machine-readable failure codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input
    EmptyField,
    InvalidFormat,

    // Matrix shape
    EmptyMatrix,
    NotSquare,
    DimensionMismatch,

    // Labels
    DuplicateLabel,
    UnknownLabel,
    LabelMismatch,

    // Numeric
    DegenerateColumn,
    InvalidComparison,
    UnsupportedDimension,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::EmptyMatrix => "EMPTY_MATRIX",
            ErrorCode::NotSquare => "NOT_SQUARE",
            ErrorCode::DimensionMismatch => "DIMENSION_MISMATCH",
            ErrorCode::DuplicateLabel => "DUPLICATE_LABEL",
            ErrorCode::UnknownLabel => "UNKNOWN_LABEL",
            ErrorCode::LabelMismatch => "LABEL_MISMATCH",
            ErrorCode::DegenerateColumn => "DEGENERATE_COLUMN",
            ErrorCode::InvalidComparison => "INVALID_COMPARISON",
            ErrorCode::UnsupportedDimension => "UNSUPPORTED_DIMENSION",
        };
        write!(f, "{}", s)
    }
}

/// A coded failure as reported to users: `[CODE] message`.
///
/// `details` carries the structured context (offending label, matrix name,
/// field) so callers can log it without parsing the message.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: BTreeMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}
