//! Analysis command handlers.
//!
//! Handlers that run AHP computations over caller-supplied matrices.

mod perform_ahp_analysis;

pub use perform_ahp_analysis::{PerformAhpAnalysisCommand, PerformAhpAnalysisHandler};
