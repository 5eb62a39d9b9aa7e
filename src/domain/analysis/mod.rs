//! Analysis Module - Pure domain services for the Analytic Hierarchy Process.
//!
//! This module contains stateless functions that turn pairwise comparison
//! matrices into priority weights.
//!
//! # Components
//!
//! - `PairwiseMatrix` / `NormalizedMatrix` - Square matrices keyed by item labels
//! - `WeightVector` / `WeightTable` / `FinalWeightVector` - Derived weights
//! - `AhpCalculator` - Normalization, weights, consistency ratio, composition
//! - `AhpAnalysisReport` - Serializable result of a full analysis pass
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. Every matrix the
//! caller edits is passed in explicitly; nothing is cached between calls.

mod ahp_calculator;
mod errors;
mod pairwise_matrix;
mod report;
mod weights;

pub use ahp_calculator::{
    random_index, AhpCalculator, AhpSettings, ConsistencyMethod, ValidationMode,
    DEFAULT_CONSISTENCY_THRESHOLD, DEFAULT_WEIGHT_PRECISION, MAX_CONSISTENCY_DIMENSION,
    RANDOM_INDEX,
};
pub use errors::AhpError;
pub use pairwise_matrix::{NormalizedMatrix, PairwiseMatrix, PairwiseMatrixBuilder};
pub use report::{AhpAnalysisReport, ConsistencyCheck, CRITERION_MATRIX_NAME};
pub use weights::{FinalWeightVector, RankedAlternative, WeightTable, WeightVector};
