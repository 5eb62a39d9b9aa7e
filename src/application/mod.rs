//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations. Handlers take every input as an
//! explicit command; nothing is kept between runs.

pub mod handlers;

pub use handlers::{PerformAhpAnalysisCommand, PerformAhpAnalysisHandler};
