//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, name parsing, and error types
//! that form the vocabulary of the AHP domain.

mod errors;
mod ids;
mod item_names;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AnalysisId;
pub use item_names::parse_item_names;
pub use timestamp::Timestamp;
