//! PerformAhpAnalysisHandler - Runs a complete AHP pass over caller-supplied matrices.
//!
//! For every criterion the alternative matrix is normalized and its weights
//! become one column of the weight table. The criterion matrix yields the
//! criterion weights, and the table multiplied by those weights gives the
//! final score per alternative.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::domain::analysis::{
    AhpAnalysisReport, AhpCalculator, AhpError, AhpSettings, ConsistencyCheck, PairwiseMatrix,
    ValidationMode, WeightTable, CRITERION_MATRIX_NAME,
};
use crate::domain::foundation::{AnalysisId, Timestamp};

/// Entries with `a_ij * a_ji` further than this from 1 are logged.
const RECIPROCITY_TOLERANCE: f64 = 1e-3;

/// Command to run an AHP analysis.
#[derive(Debug, Clone, Default)]
pub struct PerformAhpAnalysisCommand {
    pub alternatives: Vec<String>,
    pub criteria: Vec<String>,
    /// Alternative comparison matrix per criterion. Missing criteria default
    /// to an all-ones matrix.
    pub criterion_matrices: BTreeMap<String, PairwiseMatrix>,
    /// Comparison matrix over criteria. Defaults to all-ones.
    pub criterion_matrix: Option<PairwiseMatrix>,
    pub include_consistency: bool,
}

/// Handler for AHP analyses.
pub struct PerformAhpAnalysisHandler {
    calculator: AhpCalculator,
}

impl PerformAhpAnalysisHandler {
    pub fn new(settings: AhpSettings) -> Self {
        Self {
            calculator: AhpCalculator::new(settings),
        }
    }

    pub fn calculator(&self) -> &AhpCalculator {
        &self.calculator
    }

    pub fn handle(&self, cmd: PerformAhpAnalysisCommand) -> Result<AhpAnalysisReport, AhpError> {
        let analysis_id = AnalysisId::new();
        let strict = self.calculator.settings().validation == ValidationMode::Strict;

        // 1. Validate axes
        ensure_items(&cmd.alternatives)?;
        ensure_items(&cmd.criteria)?;

        for criterion in cmd.criterion_matrices.keys() {
            if cmd.criteria.contains(criterion) {
                continue;
            }
            if strict {
                return Err(AhpError::UnknownCriterion(criterion.clone()));
            }
            warn!(%analysis_id, criterion = %criterion, "Ignoring matrix for unknown criterion");
        }

        // 2. Alternative weights per criterion
        let mut matrices = Vec::with_capacity(cmd.criteria.len());
        let mut weight_table = WeightTable::new(cmd.alternatives.clone(), cmd.criteria.clone());

        for criterion in &cmd.criteria {
            let matrix = cmd
                .criterion_matrices
                .get(criterion)
                .cloned()
                .unwrap_or_else(|| {
                    debug!(%analysis_id, criterion = %criterion, "Using all-ones matrix");
                    PairwiseMatrix::ones(cmd.alternatives.clone())
                });

            if !matrix.is_reciprocal(RECIPROCITY_TOLERANCE) {
                warn!(%analysis_id, criterion = %criterion, "Matrix is not reciprocal");
            }

            if strict && !same_label_set(matrix.labels(), &cmd.alternatives) {
                return Err(AhpError::label_mismatch(
                    format!("matrix '{}'", criterion),
                    &cmd.alternatives,
                    matrix.labels(),
                ));
            }

            let weights = self.calculator.weights_of(&matrix)?;
            let filled = weight_table.insert(criterion, &weights)?;
            if filled < cmd.alternatives.len() {
                warn!(
                    %analysis_id,
                    criterion = %criterion,
                    filled,
                    expected = cmd.alternatives.len(),
                    "Matrix does not cover every alternative"
                );
            }

            debug!(%analysis_id, criterion = %criterion, ?weights, "Computed alternative weights");
            matrices.push((criterion.clone(), matrix));
        }

        // 3. Criterion weights
        let criterion_matrix = cmd
            .criterion_matrix
            .unwrap_or_else(|| PairwiseMatrix::ones(cmd.criteria.clone()));

        if strict && !same_label_set(criterion_matrix.labels(), &cmd.criteria) {
            return Err(AhpError::label_mismatch(
                "criterion matrix",
                &cmd.criteria,
                criterion_matrix.labels(),
            ));
        }

        let criterion_weights = self.calculator.weights_of(&criterion_matrix)?;
        debug!(%analysis_id, ?criterion_weights, "Computed criterion weights");

        // 4. Composition
        let final_weights = self
            .calculator
            .compute_final_weights(&weight_table, &criterion_weights)?;
        let ranking = final_weights.ranking();

        // 5. Consistency
        let consistency = if cmd.include_consistency {
            matrices.push((CRITERION_MATRIX_NAME.to_string(), criterion_matrix));
            Some(self.check_consistency(&matrices)?)
        } else {
            None
        };

        info!(
            %analysis_id,
            alternatives = cmd.alternatives.len(),
            criteria = cmd.criteria.len(),
            best = ?final_weights.best(),
            "AHP analysis completed"
        );

        Ok(AhpAnalysisReport {
            analysis_id,
            alternatives: cmd.alternatives,
            criteria: cmd.criteria,
            weight_table,
            criterion_weights,
            final_weights,
            ranking,
            consistency,
            computed_at: Timestamp::now(),
        })
    }

    fn check_consistency(
        &self,
        matrices: &[(String, PairwiseMatrix)],
    ) -> Result<Vec<ConsistencyCheck>, AhpError> {
        matrices
            .iter()
            .map(|(name, matrix)| -> Result<ConsistencyCheck, AhpError> {
                let ratio = self.calculator.get_consistency_ratio(matrix)?;
                let acceptable = self.calculator.is_acceptable(ratio);
                if !acceptable {
                    warn!(matrix = %name, ratio, "Pairwise judgments are inconsistent");
                }
                Ok(ConsistencyCheck {
                    matrix: name.clone(),
                    ratio,
                    acceptable,
                })
            })
            .collect()
    }
}

fn ensure_items(labels: &[String]) -> Result<(), AhpError> {
    if labels.is_empty() {
        return Err(AhpError::EmptyMatrix);
    }
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(AhpError::DuplicateLabel(label.clone()));
        }
    }
    Ok(())
}

fn same_label_set(actual: &[String], expected: &[String]) -> bool {
    actual.len() == expected.len() && expected.iter().all(|label| actual.contains(label))
}
