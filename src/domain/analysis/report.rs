//! Analysis report - the serializable outcome of one AHP run.

use serde::{Deserialize, Serialize};

use super::{FinalWeightVector, RankedAlternative, WeightTable, WeightVector};
use crate::domain::foundation::{AnalysisId, Timestamp};

/// Name used for the criterion matrix in consistency results.
pub const CRITERION_MATRIX_NAME: &str = "criteria";

/// Consistency result for one pairwise matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    /// Criterion name, or [`CRITERION_MATRIX_NAME`] for the criterion matrix.
    pub matrix: String,
    pub ratio: f64,
    pub acceptable: bool,
}

/// Everything one pass of the analysis produces.
#[derive(Debug, Clone, Serialize)]
pub struct AhpAnalysisReport {
    /// Unique identifier for this run.
    pub analysis_id: AnalysisId,
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    /// Alternative weights per criterion.
    pub weight_table: WeightTable,
    pub criterion_weights: WeightVector,
    pub final_weights: FinalWeightVector,
    /// Alternatives ordered by final score.
    pub ranking: Vec<RankedAlternative>,
    /// Present only when consistency was requested.
    pub consistency: Option<Vec<ConsistencyCheck>>,
    pub computed_at: Timestamp,
}

impl AhpAnalysisReport {
    /// Best alternative by final score; None on a tie for first.
    pub fn best_alternative(&self) -> Option<String> {
        self.final_weights.best()
    }

    /// True when every checked matrix is acceptably consistent.
    ///
    /// Returns None if consistency was not computed.
    pub fn is_consistent(&self) -> Option<bool> {
        self.consistency
            .as_ref()
            .map(|checks| checks.iter().all(|c| c.acceptable))
    }

    /// Matrices whose consistency ratio exceeded the threshold.
    pub fn inconsistent_matrices(&self) -> Vec<&str> {
        self.consistency
            .iter()
            .flatten()
            .filter(|c| !c.acceptable)
            .map(|c| c.matrix.as_str())
            .collect()
    }
}
