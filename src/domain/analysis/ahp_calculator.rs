//! AHP Calculator - Normalization, priority weights, consistency, and composition.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AhpError, FinalWeightVector, NormalizedMatrix, PairwiseMatrix, WeightTable, WeightVector};

/// Saaty's random consistency index for n = 1..=10, indexed by `n - 1`.
pub const RANDOM_INDEX: [f64; 10] = [0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Largest matrix dimension with a tabulated random index.
pub const MAX_CONSISTENCY_DIMENSION: usize = RANDOM_INDEX.len();

/// Decimal places kept by [`AhpCalculator::get_weights`] unless configured otherwise.
pub const DEFAULT_WEIGHT_PRECISION: u32 = 4;

/// Conventional upper bound for an acceptable consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.10;

/// How strictly degenerate or misaligned input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject zero-sum columns and label mismatches.
    #[default]
    Strict,
    /// Let NaN/inf propagate and multiply positionally.
    Lenient,
}

/// Formula used for the consistency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMethod {
    /// CI from the principal eigenvalue estimate: (λmax - n) / (n - 1).
    #[default]
    Eigenvalue,
    /// CI from the mean priority weight: (mean(w) - n) / (n - 1).
    Legacy,
}

/// Knobs for [`AhpCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AhpSettings {
    pub weight_precision: u32,
    pub validation: ValidationMode,
    pub consistency_method: ConsistencyMethod,
    pub consistency_threshold: f64,
}

impl Default for AhpSettings {
    fn default() -> Self {
        Self {
            weight_precision: DEFAULT_WEIGHT_PRECISION,
            validation: ValidationMode::default(),
            consistency_method: ConsistencyMethod::default(),
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
        }
    }
}

/// Stateless AHP arithmetic over caller-supplied matrices.
#[derive(Debug, Clone, Copy, Default)]
pub struct AhpCalculator {
    settings: AhpSettings,
}

impl AhpCalculator {
    pub fn new(settings: AhpSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AhpSettings {
        &self.settings
    }

    /// Scales every column so it sums to 1.
    ///
    /// # Edge Cases
    /// - Empty matrix: Returns an empty normalized matrix
    /// - Zero or non-finite column sum: `DegenerateColumn` in strict mode;
    ///   in lenient mode the division is performed and yields NaN/inf
    pub fn normalize(&self, matrix: &PairwiseMatrix) -> Result<NormalizedMatrix, AhpError> {
        let n = matrix.dimension();
        let sums: Vec<f64> = (0..n).map(|column| matrix.column_sum(column)).collect();

        for (column, &sum) in sums.iter().enumerate() {
            if sum != 0.0 && sum.is_finite() {
                continue;
            }
            let label = matrix.labels()[column].clone();
            match self.settings.validation {
                ValidationMode::Strict => return Err(AhpError::DegenerateColumn { label, sum }),
                ValidationMode::Lenient => {
                    warn!(column = %label, sum, "Normalizing degenerate column")
                }
            }
        }

        let values = matrix
            .values()
            .iter()
            .enumerate()
            .map(|(k, value)| value / sums[k % n])
            .collect();

        debug!(dimension = n, "Normalized pairwise matrix");
        Ok(NormalizedMatrix::new(matrix.labels().to_vec(), values))
    }

    /// Row-wise mean of a normalized matrix, rounded to the configured precision.
    pub fn get_weights(&self, matrix: &NormalizedMatrix) -> WeightVector {
        let values = row_means(matrix)
            .into_iter()
            .map(|mean| round_to(mean, self.settings.weight_precision))
            .collect();
        WeightVector::from_parts(matrix.labels().to_vec(), values)
    }

    /// Normalizes `matrix` and extracts its weights in one step.
    pub fn weights_of(&self, matrix: &PairwiseMatrix) -> Result<WeightVector, AhpError> {
        let normalized = self.normalize(matrix)?;
        Ok(self.get_weights(&normalized))
    }

    /// Consistency ratio CI / RI for a pairwise matrix.
    ///
    /// # Algorithm
    /// - `Eigenvalue`: λmax = mean_i((A·w)_i / w_i) with the unrounded
    ///   priority vector w; CI = (λmax - n) / (n - 1). Matrices with n <= 2
    ///   are always consistent and return 0.
    /// - `Legacy`: CI = (mean(w) - n) / (n - 1) with the rounded weights;
    ///   n <= 2 divides by a zero random index and yields inf/NaN.
    ///
    /// # Errors
    /// - `EmptyMatrix` for n = 0
    /// - `UnsupportedDimension` for n > 10 (no tabulated random index)
    /// - Any error from [`Self::normalize`]
    pub fn get_consistency_ratio(&self, matrix: &PairwiseMatrix) -> Result<f64, AhpError> {
        let n = matrix.dimension();
        let ri = random_index(n)?;
        let normalized = self.normalize(matrix)?;
        let size = n as f64;

        let ratio = match self.settings.consistency_method {
            ConsistencyMethod::Legacy => {
                let weights = self.get_weights(&normalized);
                let ci = (weights.mean() - size) / (size - 1.0);
                ci / ri
            }
            ConsistencyMethod::Eigenvalue => {
                if ri == 0.0 {
                    return Ok(0.0);
                }
                let priorities = row_means(&normalized);
                let lambda_max = (0..n)
                    .map(|i| {
                        let weighted: f64 = matrix
                            .row(i)
                            .iter()
                            .zip(&priorities)
                            .map(|(a, w)| a * w)
                            .sum();
                        weighted / priorities[i]
                    })
                    .sum::<f64>()
                    / size;
                let ci = (lambda_max - size) / (size - 1.0);
                ci / ri
            }
        };

        debug!(dimension = n, ratio, method = ?self.settings.consistency_method, "Computed consistency ratio");
        Ok(ratio)
    }

    /// True if the ratio is finite and within the configured threshold.
    pub fn is_acceptable(&self, ratio: f64) -> bool {
        ratio.is_finite() && ratio <= self.settings.consistency_threshold
    }

    /// Multiplies the alternatives-by-criteria table by the criterion weights.
    ///
    /// In strict mode criterion weights are matched to table columns by label;
    /// in lenient mode they are taken positionally.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the weight count differs from the column count
    /// - `LabelMismatch` (strict only) if a table criterion has no weight
    pub fn compute_final_weights(
        &self,
        weight_table: &WeightTable,
        condition_weights: &WeightVector,
    ) -> Result<FinalWeightVector, AhpError> {
        let (rows, columns) = weight_table.shape();
        if condition_weights.len() != columns {
            return Err(AhpError::DimensionMismatch {
                expected: columns,
                actual: condition_weights.len(),
            });
        }

        let aligned: Vec<f64> = match self.settings.validation {
            ValidationMode::Strict => weight_table
                .criteria()
                .iter()
                .map(|criterion| {
                    condition_weights.get(criterion).ok_or_else(|| {
                        AhpError::label_mismatch(
                            "criterion weights",
                            weight_table.criteria(),
                            condition_weights.labels(),
                        )
                    })
                })
                .collect::<Result<_, _>>()?,
            ValidationMode::Lenient => condition_weights.values().to_vec(),
        };

        let scores = (0..rows)
            .map(|row| {
                weight_table
                    .row(row)
                    .iter()
                    .zip(&aligned)
                    .map(|(w, c)| w * c)
                    .sum()
            })
            .collect();

        Ok(FinalWeightVector::new(WeightVector::from_parts(
            weight_table.alternatives().to_vec(),
            scores,
        )))
    }
}

/// Random index for an n×n matrix.
pub fn random_index(n: usize) -> Result<f64, AhpError> {
    if n == 0 {
        return Err(AhpError::EmptyMatrix);
    }
    RANDOM_INDEX
        .get(n - 1)
        .copied()
        .ok_or(AhpError::UnsupportedDimension {
            dimension: n,
            max: MAX_CONSISTENCY_DIMENSION,
        })
}

fn row_means(matrix: &NormalizedMatrix) -> Vec<f64> {
    let n = matrix.dimension() as f64;
    (0..matrix.dimension())
        .map(|row| matrix.row(row).iter().sum::<f64>() / n)
        .collect()
}

/// Precision beyond `f64::DIGITS` is treated as `f64::DIGITS`.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(f64::DIGITS) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> AhpCalculator {
        AhpCalculator::default()
    }

    fn lenient() -> AhpCalculator {
        AhpCalculator::new(AhpSettings {
            validation: ValidationMode::Lenient,
            ..AhpSettings::default()
        })
    }

    fn legacy() -> AhpCalculator {
        AhpCalculator::new(AhpSettings {
            consistency_method: ConsistencyMethod::Legacy,
            ..AhpSettings::default()
        })
    }

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item-{}", i)).collect()
    }

    /// a_ij = v_i / v_j is perfectly consistent with priorities v / sum(v).
    fn consistent_matrix(v: &[f64]) -> PairwiseMatrix {
        let rows = v
            .iter()
            .map(|vi| v.iter().map(|vj| vi / vj).collect())
            .collect();
        PairwiseMatrix::from_rows(labels(v.len()), rows).unwrap()
    }

    fn saaty_example() -> PairwiseMatrix {
        PairwiseMatrix::builder(vec!["A", "B", "C"])
            .compare("A", "B", 3.0)
            .compare("A", "C", 5.0)
            .compare("B", "C", 2.0)
            .build()
            .unwrap()
    }

    // Normalization

    #[test]
    fn normalize_all_ones_is_uniform() {
        let n = strict()
            .normalize(&PairwiseMatrix::ones(vec!["A", "B", "C", "D"]))
            .unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(n.get(i, j), 0.25);
            }
        }
    }

    #[test]
    fn normalize_divides_by_column_sum() {
        let m = PairwiseMatrix::from_rows(vec!["A", "B"], vec![vec![1.0, 4.0], vec![0.25, 1.0]])
            .unwrap();
        let n = strict().normalize(&m).unwrap();
        assert!((n.get(0, 0) - 0.8).abs() < 1e-12);
        assert!((n.get(1, 0) - 0.2).abs() < 1e-12);
        assert!((n.get(0, 1) - 0.8).abs() < 1e-12);
        assert!((n.column_sum(1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_empty_matrix_is_empty() {
        let n = strict()
            .normalize(&PairwiseMatrix::ones(Vec::<&str>::new()))
            .unwrap();
        assert_eq!(n.dimension(), 0);
    }

    #[test]
    fn strict_normalize_rejects_zero_column() {
        let m = PairwiseMatrix::from_rows(vec!["A", "B"], vec![vec![0.0, 1.0], vec![0.0, 1.0]])
            .unwrap();
        let err = strict().normalize(&m).unwrap_err();
        assert_eq!(
            err,
            AhpError::DegenerateColumn {
                label: "A".to_string(),
                sum: 0.0
            }
        );
    }

    #[test]
    fn lenient_normalize_propagates_nan() {
        let m = PairwiseMatrix::from_rows(vec!["A", "B"], vec![vec![0.0, 1.0], vec![0.0, 1.0]])
            .unwrap();
        let n = lenient().normalize(&m).unwrap();
        assert!(n.get(0, 0).is_nan());
        assert_eq!(n.get(0, 1), 0.5);

        let weights = lenient().get_weights(&n);
        assert!(weights.values().iter().all(|w| !w.is_finite()));
    }

    // Weights

    #[test]
    fn get_weights_rounds_to_four_places() {
        let n = strict()
            .normalize(&PairwiseMatrix::ones(vec!["A", "B", "C"]))
            .unwrap();
        let w = strict().get_weights(&n);
        assert_eq!(w.values(), &[0.3333, 0.3333, 0.3333]);
        assert_eq!(w.labels(), &["A", "B", "C"]);
    }

    #[test]
    fn get_weights_honours_precision_setting() {
        let calc = AhpCalculator::new(AhpSettings {
            weight_precision: 2,
            ..AhpSettings::default()
        });
        let w = calc.weights_of(&PairwiseMatrix::ones(vec!["A", "B", "C"])).unwrap();
        assert_eq!(w.values(), &[0.33, 0.33, 0.33]);
    }

    #[test]
    fn oversized_precision_keeps_weights_finite() {
        let calc = AhpCalculator::new(AhpSettings {
            weight_precision: u32::MAX,
            ..AhpSettings::default()
        });
        let w = calc.weights_of(&PairwiseMatrix::ones(vec!["A", "B", "C"])).unwrap();
        for value in w.values() {
            assert!((value - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn weights_recover_consistent_priorities() {
        let w = strict().weights_of(&consistent_matrix(&[4.0, 2.0, 1.0, 1.0])).unwrap();
        assert_eq!(w.values(), &[0.5, 0.25, 0.125, 0.125]);
    }

    #[test]
    fn saaty_example_weights() {
        let w = strict().weights_of(&saaty_example()).unwrap();
        assert_eq!(w.get("A"), Some(0.6479));
        assert_eq!(w.get("B"), Some(0.2299));
        assert_eq!(w.get("C"), Some(0.1222));
    }

    // Consistency

    #[test]
    fn consistency_of_all_ones_is_zero() {
        for n in 2..=10 {
            let ratio = strict()
                .get_consistency_ratio(&PairwiseMatrix::ones(labels(n)))
                .unwrap();
            assert!(ratio.abs() < 1e-9, "n={} ratio={}", n, ratio);
        }
    }

    #[test]
    fn consistency_of_consistent_matrix_is_zero() {
        let ratio = strict()
            .get_consistency_ratio(&consistent_matrix(&[9.0, 3.0, 1.0, 0.5, 2.0]))
            .unwrap();
        assert!(ratio.abs() < 1e-9);
    }

    #[test]
    fn consistency_of_saaty_example_is_acceptable() {
        let calc = strict();
        let ratio = calc.get_consistency_ratio(&saaty_example()).unwrap();
        assert!(ratio > 0.0);
        assert!((ratio - 0.0032).abs() < 1e-3, "ratio={}", ratio);
        assert!(calc.is_acceptable(ratio));
    }

    #[test]
    fn inconsistent_matrix_is_not_acceptable() {
        // A > B, B > C, yet C strongly > A.
        let m = PairwiseMatrix::builder(vec!["A", "B", "C"])
            .compare("A", "B", 9.0)
            .compare("B", "C", 9.0)
            .compare("C", "A", 9.0)
            .build()
            .unwrap();
        let calc = strict();
        let ratio = calc.get_consistency_ratio(&m).unwrap();
        assert!(ratio > DEFAULT_CONSISTENCY_THRESHOLD);
        assert!(!calc.is_acceptable(ratio));
    }

    #[test]
    fn consistency_of_small_matrices_is_zero() {
        let m = PairwiseMatrix::builder(vec!["A", "B"])
            .compare("A", "B", 7.0)
            .build()
            .unwrap();
        assert_eq!(strict().get_consistency_ratio(&m).unwrap(), 0.0);
        assert_eq!(
            strict()
                .get_consistency_ratio(&PairwiseMatrix::ones(vec!["A"]))
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn consistency_beyond_ten_items_is_unsupported() {
        let err = strict()
            .get_consistency_ratio(&PairwiseMatrix::ones(labels(11)))
            .unwrap_err();
        assert_eq!(
            err,
            AhpError::UnsupportedDimension {
                dimension: 11,
                max: 10
            }
        );
        assert!(legacy()
            .get_consistency_ratio(&PairwiseMatrix::ones(labels(11)))
            .is_err());
    }

    #[test]
    fn consistency_of_empty_matrix_fails() {
        assert_eq!(
            strict()
                .get_consistency_ratio(&PairwiseMatrix::ones(Vec::<&str>::new()))
                .unwrap_err(),
            AhpError::EmptyMatrix
        );
    }

    #[test]
    fn legacy_consistency_uses_mean_weight_formula() {
        let ratio = legacy()
            .get_consistency_ratio(&PairwiseMatrix::ones(vec!["A", "B", "C"]))
            .unwrap();
        let expected = ((0.3333 - 3.0) / 2.0) / 0.58;
        assert!((ratio - expected).abs() < 1e-12);
    }

    #[test]
    fn legacy_consistency_divides_by_zero_index_for_two_items() {
        let ratio = legacy()
            .get_consistency_ratio(&PairwiseMatrix::ones(vec!["A", "B"]))
            .unwrap();
        assert!(ratio.is_infinite() && ratio < 0.0);
    }

    #[test]
    fn random_index_table_lookup() {
        assert_eq!(random_index(1).unwrap(), 0.0);
        assert_eq!(random_index(3).unwrap(), 0.58);
        assert_eq!(random_index(10).unwrap(), 1.49);
        assert!(random_index(11).is_err());
        assert_eq!(random_index(0).unwrap_err(), AhpError::EmptyMatrix);
    }

    #[test]
    fn nan_ratio_is_not_acceptable() {
        assert!(!strict().is_acceptable(f64::NAN));
        assert!(!strict().is_acceptable(f64::NEG_INFINITY));
        assert!(strict().is_acceptable(0.1));
    }

    // Final weights

    fn uniform_table() -> WeightTable {
        let alternatives = vec!["A", "B", "C", "D"];
        let mut table = WeightTable::new(alternatives.clone(), vec!["Price", "Distance"]);
        let uniform = WeightVector::new(alternatives, vec![0.25; 4]).unwrap();
        table.insert("Price", &uniform).unwrap();
        table.insert("Distance", &uniform).unwrap();
        table
    }

    #[test]
    fn final_weights_have_one_score_per_alternative() {
        let criteria = WeightVector::new(vec!["Price", "Distance"], vec![0.5, 0.5]).unwrap();
        let f = strict().compute_final_weights(&uniform_table(), &criteria).unwrap();
        assert_eq!(f.len(), 4);
        assert_eq!(f.values(), &[0.25, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn final_weights_multiply_table_by_criteria() {
        let mut table = WeightTable::new(vec!["A", "B"], vec!["Price", "Distance"]);
        table
            .insert("Price", &WeightVector::new(vec!["A", "B"], vec![0.8, 0.2]).unwrap())
            .unwrap();
        table
            .insert("Distance", &WeightVector::new(vec!["A", "B"], vec![0.4, 0.6]).unwrap())
            .unwrap();
        let criteria = WeightVector::new(vec!["Price", "Distance"], vec![0.75, 0.25]).unwrap();

        let f = strict().compute_final_weights(&table, &criteria).unwrap();

        assert!((f.get("A").unwrap() - 0.7).abs() < 1e-12);
        assert!((f.get("B").unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn final_weights_reject_shape_mismatch() {
        let criteria =
            WeightVector::new(vec!["Price", "Distance", "Noise"], vec![0.4, 0.3, 0.3]).unwrap();
        for calc in [strict(), lenient()] {
            let err = calc.compute_final_weights(&uniform_table(), &criteria).unwrap_err();
            assert_eq!(
                err,
                AhpError::DimensionMismatch {
                    expected: 2,
                    actual: 3
                }
            );
        }
    }

    #[test]
    fn strict_final_weights_align_by_label() {
        let mut table = WeightTable::new(vec!["A", "B"], vec!["Price", "Distance"]);
        table
            .insert("Price", &WeightVector::new(vec!["A", "B"], vec![1.0, 0.0]).unwrap())
            .unwrap();
        table
            .insert("Distance", &WeightVector::new(vec!["A", "B"], vec![0.0, 1.0]).unwrap())
            .unwrap();
        let reversed = WeightVector::new(vec!["Distance", "Price"], vec![0.9, 0.1]).unwrap();

        let aligned = strict().compute_final_weights(&table, &reversed).unwrap();
        assert_eq!(aligned.get("A"), Some(0.1));
        assert_eq!(aligned.get("B"), Some(0.9));

        let positional = lenient().compute_final_weights(&table, &reversed).unwrap();
        assert_eq!(positional.get("A"), Some(0.9));
        assert_eq!(positional.get("B"), Some(0.1));
    }

    #[test]
    fn strict_final_weights_reject_unknown_criterion() {
        let criteria = WeightVector::new(vec!["Price", "Noise"], vec![0.5, 0.5]).unwrap();
        let err = strict()
            .compute_final_weights(&uniform_table(), &criteria)
            .unwrap_err();
        assert!(matches!(err, AhpError::LabelMismatch { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn positive_matrix() -> impl Strategy<Value = PairwiseMatrix> {
            (1usize..=8).prop_flat_map(|n| {
                prop::collection::vec(prop::collection::vec(0.1f64..9.0, n), n)
                    .prop_map(move |rows| PairwiseMatrix::from_rows(labels(n), rows).unwrap())
            })
        }

        proptest! {
            #[test]
            fn normalized_columns_sum_to_one(m in positive_matrix()) {
                let n = strict().normalize(&m).unwrap();
                for column in 0..n.dimension() {
                    prop_assert!((n.column_sum(column) - 1.0).abs() < 1e-9);
                }
            }

            #[test]
            fn weights_sum_to_one(m in positive_matrix()) {
                let calc = strict();
                let w = calc.get_weights(&calc.normalize(&m).unwrap());
                prop_assert_eq!(w.len(), m.dimension());
                prop_assert!((w.sum() - 1.0).abs() < 1e-3);
                prop_assert!(w.values().iter().all(|&v| v >= 0.0));
            }

            #[test]
            fn consistent_matrices_have_zero_ratio(
                v in prop::collection::vec(0.1f64..9.0, 3..=10)
            ) {
                let ratio = strict().get_consistency_ratio(&consistent_matrix(&v)).unwrap();
                prop_assert!(ratio.abs() < 1e-9);
            }

            #[test]
            fn final_weights_of_normalized_inputs_sum_to_one(
                m in positive_matrix(),
                c in positive_matrix(),
            ) {
                let calc = strict();
                let alt_weights = calc.weights_of(&m).unwrap();
                let crit_weights = calc.weights_of(&c).unwrap();

                let mut table = WeightTable::new(m.labels().to_vec(), c.labels().to_vec());
                for criterion in c.labels() {
                    table.insert(criterion, &alt_weights).unwrap();
                }

                let f = calc.compute_final_weights(&table, &crit_weights).unwrap();
                prop_assert_eq!(f.len(), m.dimension());
                prop_assert!((f.weights().sum() - 1.0).abs() < 1e-2);
            }
        }
    }
}
