//! Adapters - Connections between the domain and the outside world.
//!
//! - `problem_file` - JSON/YAML problem documents on disk

pub mod problem_file;

pub use problem_file::{AhpProblem, ProblemError, ProblemFormat};
