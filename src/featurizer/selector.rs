//! Chi-squared feature selection.
//!
//! Every vocabulary column of the fit-time term matrix is tested for
//! association with the class labels. Columns whose p-value falls under the
//! threshold are kept; when none does, every column tied at the smallest
//! p-value is kept instead. Stop words only survive when they are strongly
//! significant, i.e. when their p-value is at most half the threshold.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::error::{FeaturizerError, Result};
use crate::featurizer::matrix::SparseMatrix;
use crate::featurizer::stats::chi2_survival;

/// Default significance cutoff.
pub const DEFAULT_PVALUE_THRESHOLD: f64 = 0.4;

/// Chi-squared statistic and p-value of every column.
#[derive(Debug, Clone, PartialEq)]
pub struct Chi2Scores {
    pub scores: Vec<f64>,
    pub pvalues: Vec<f64>,
}

/// Compute the chi-squared statistic of every column against the labels.
///
/// For class `c` and column `j`, the observed count is the sum of column `j`
/// over the rows labelled `c`, and the expected count is that column's total
/// scaled by the share of rows labelled `c`. The p-value uses `k - 1` degrees
/// of freedom for `k` distinct labels, so with a single class every p-value
/// is 1.
pub fn chi2(matrix: &SparseMatrix, labels: &[usize]) -> Result<Chi2Scores> {
    if labels.len() != matrix.n_rows() {
        return Err(FeaturizerError::DimensionMismatch {
            expected: matrix.n_rows(),
            actual: labels.len(),
        });
    }

    let mut class_sizes: BTreeMap<usize, usize> = BTreeMap::new();
    for &label in labels {
        *class_sizes.entry(label).or_insert(0) += 1;
    }
    let class_slots: BTreeMap<usize, usize> = class_sizes
        .keys()
        .enumerate()
        .map(|(slot, &label)| (label, slot))
        .collect();

    let n_cols = matrix.n_cols();
    let mut observed = vec![vec![0.0; n_cols]; class_sizes.len()];
    for (row, label) in labels.iter().enumerate() {
        let slot = class_slots[label];
        for (col, value) in matrix.row(row) {
            observed[slot][col] += value;
        }
    }

    let n_rows = labels.len() as f64;
    let class_probabilities: Vec<f64> = class_sizes
        .values()
        .map(|&size| size as f64 / n_rows)
        .collect();
    let feature_counts = matrix.column_sums();
    // A single class leaves no degrees of freedom: every p-value is 1 rather
    // than undefined, so the minimum-p fallback keeps every column.
    let degrees_of_freedom = class_sizes.len().saturating_sub(1);

    let mut scores = Vec::with_capacity(n_cols);
    let mut pvalues = Vec::with_capacity(n_cols);
    for (col, feature_count) in feature_counts.iter().enumerate() {
        let mut statistic = 0.0;
        for (slot, probability) in class_probabilities.iter().enumerate() {
            let expected = probability * feature_count;
            if expected > 0.0 {
                let delta = observed[slot][col] - expected;
                statistic += delta * delta / expected;
            }
        }
        scores.push(statistic);
        pvalues.push(chi2_survival(statistic, degrees_of_freedom));
    }

    Ok(Chi2Scores { scores, pvalues })
}

/// Indices whose p-value is strictly below `threshold`.
///
/// When none qualifies, every index tied at the minimum p-value is returned.
///
/// # Examples
///
/// ```
/// use intent_featurizer::featurizer::selector::select_significant;
///
/// assert_eq!(select_significant(&[0.1, 0.5, 0.3], 0.4), vec![0, 2]);
/// assert_eq!(select_significant(&[0.7, 0.5, 0.5], 0.4), vec![1, 2]);
/// ```
pub fn select_significant(pvalues: &[f64], threshold: f64) -> Vec<usize> {
    let selected: Vec<usize> = pvalues
        .iter()
        .enumerate()
        .filter(|(_, p)| **p < threshold)
        .map(|(index, _)| index)
        .collect();
    if !selected.is_empty() {
        return selected;
    }

    let min_pvalue = pvalues
        .iter()
        .copied()
        .filter(|p| !p.is_nan())
        .fold(f64::INFINITY, f64::min);
    debug!("No p-value under {threshold}, keeping columns at minimum p-value {min_pvalue}");
    pvalues
        .iter()
        .enumerate()
        .filter(|(_, p)| **p == min_pvalue)
        .map(|(index, _)| index)
        .collect()
}

/// Drop selected stop words whose p-value exceeds `threshold / 2`.
pub fn demote_stop_words(
    selected: Vec<usize>,
    pvalues: &[f64],
    feature_names: &[String],
    stop_words: &HashSet<String>,
    threshold: f64,
) -> Vec<usize> {
    let demoted: HashSet<usize> = selected
        .iter()
        .copied()
        .filter(|&index| {
            stop_words.contains(&feature_names[index]) && pvalues[index] > threshold / 2.0
        })
        .collect();
    if demoted.is_empty() {
        return selected;
    }

    debug!("Demoting {} weakly significant stop words", demoted.len());
    selected
        .into_iter()
        .filter(|index| !demoted.contains(index))
        .collect()
}

/// Selection policy over the fit-time term matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSelector {
    pvalue_threshold: f64,
}

impl Default for FeatureSelector {
    fn default() -> Self {
        FeatureSelector {
            pvalue_threshold: DEFAULT_PVALUE_THRESHOLD,
        }
    }
}

impl FeatureSelector {
    /// Create a selector with a threshold in `(0, 1]`.
    pub fn new(pvalue_threshold: f64) -> Result<Self> {
        validate_threshold(pvalue_threshold)?;
        Ok(FeatureSelector { pvalue_threshold })
    }

    /// The significance cutoff.
    pub fn pvalue_threshold(&self) -> f64 {
        self.pvalue_threshold
    }

    /// Select the retained column indices, in ascending order.
    pub fn select(
        &self,
        matrix: &SparseMatrix,
        labels: &[usize],
        feature_names: &[String],
        stop_words: &HashSet<String>,
    ) -> Result<Vec<usize>> {
        if feature_names.len() != matrix.n_cols() {
            return Err(FeaturizerError::DimensionMismatch {
                expected: matrix.n_cols(),
                actual: feature_names.len(),
            });
        }
        let Chi2Scores { pvalues, .. } = chi2(matrix, labels)?;
        let selected = select_significant(&pvalues, self.pvalue_threshold);
        Ok(demote_stop_words(
            selected,
            &pvalues,
            feature_names,
            stop_words,
            self.pvalue_threshold,
        ))
    }
}

/// Check that a p-value threshold lies in `(0, 1]`.
pub fn validate_threshold(pvalue_threshold: f64) -> Result<()> {
    if pvalue_threshold > 0.0 && pvalue_threshold <= 1.0 {
        Ok(())
    } else {
        Err(FeaturizerError::invalid_argument(format!(
            "pvalue threshold must be in (0, 1], got {pvalue_threshold}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn names(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_chi2_two_classes() {
        let matrix = SparseMatrix::from_rows(
            2,
            vec![
                vec![(0, 1.0), (1, 1.0)],
                vec![(0, 1.0), (1, 1.0)],
                vec![(1, 1.0)],
                vec![(1, 1.0)],
            ],
        )
        .unwrap();
        let result = chi2(&matrix, &[0, 0, 1, 1]).unwrap();

        assert!((result.scores[0] - 2.0).abs() < 1e-12);
        assert!((result.pvalues[0] - 0.157_299_207_050_285_1).abs() < 1e-9);
        assert_eq!(result.scores[1], 0.0);
        assert_eq!(result.pvalues[1], 1.0);
    }

    #[test]
    fn test_chi2_three_classes() {
        let matrix =
            SparseMatrix::from_rows(1, vec![vec![(0, 3.0)], vec![], vec![]]).unwrap();
        let result = chi2(&matrix, &[7, 2, 5]).unwrap();

        assert!((result.scores[0] - 6.0).abs() < 1e-12);
        assert!((result.pvalues[0] - (-3.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_single_class_pvalues_are_one_and_fallback_keeps_all() {
        let matrix = SparseMatrix::from_rows(2, vec![vec![(0, 1.0)], vec![(1, 2.0)]]).unwrap();
        let result = chi2(&matrix, &[3, 3]).unwrap();
        assert_eq!(result.scores, vec![0.0, 0.0]);
        assert_eq!(result.pvalues, vec![1.0, 1.0]);
        assert_eq!(select_significant(&result.pvalues, 0.4), vec![0, 1]);
    }

    #[test]
    fn test_chi2_label_count_mismatch() {
        let matrix = SparseMatrix::from_rows(1, vec![vec![(0, 1.0)]]).unwrap();
        assert!(matches!(
            chi2(&matrix, &[0, 1]),
            Err(FeaturizerError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_fallback_keeps_all_ties() {
        let pvalues = [0.9, 0.6, 0.8, 0.6];
        assert_eq!(select_significant(&pvalues, 0.4), vec![1, 3]);
        assert_eq!(select_significant(&[0.7], 0.4), vec![0]);
    }

    #[test]
    fn test_stop_word_demotion() {
        let feature_names = names(&["book", "the", "to"]);
        let stop_words: HashSet<String> = names(&["the", "to"]).into_iter().collect();
        // "the" sits just above threshold / 2, "to" just below it.
        let pvalues = [0.3, 0.2001, 0.1999];

        let selected = select_significant(&pvalues, 0.4);
        assert_eq!(selected, vec![0, 1, 2]);
        let kept = demote_stop_words(selected, &pvalues, &feature_names, &stop_words, 0.4);
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn test_demotion_may_empty_selection() {
        let feature_names = names(&["the"]);
        let stop_words: HashSet<String> = feature_names.iter().cloned().collect();
        let kept = demote_stop_words(vec![0], &[0.9], &feature_names, &stop_words, 0.4);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_lower_threshold_never_selects_more() {
        let mut rng = StdRng::seed_from_u64(42);
        let pvalues: Vec<f64> = (0..200).map(|_| rng.random_range(0.0..1.0)).collect();

        let mut thresholds: Vec<f64> = (0..20).map(|_| rng.random_range(0.01..1.0)).collect();
        thresholds.sort_by(|a, b| b.total_cmp(a));
        let mut previous: Option<Vec<usize>> = None;
        for threshold in thresholds {
            if !pvalues.iter().any(|p| *p < threshold) {
                continue;
            }
            let selected = select_significant(&pvalues, threshold);
            if let Some(previous) = &previous {
                assert!(selected.len() <= previous.len());
                assert!(selected.iter().all(|index| previous.contains(index)));
            }
            previous = Some(selected);
        }
    }

    #[test]
    fn test_selector_end_to_end() {
        let matrix = SparseMatrix::from_rows(
            3,
            vec![
                vec![(0, 1.0), (2, 1.0)],
                vec![(0, 1.0), (2, 1.0)],
                vec![(1, 1.0), (2, 1.0)],
                vec![(1, 1.0), (2, 1.0)],
            ],
        )
        .unwrap();
        let feature_names = names(&["book", "play", "the"]);
        let stop_words: HashSet<String> = names(&["the"]).into_iter().collect();

        let selector = FeatureSelector::default();
        let selected = selector
            .select(&matrix, &[0, 0, 1, 1], &feature_names, &stop_words)
            .unwrap();
        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(FeatureSelector::new(0.05).is_ok());
        assert!(FeatureSelector::new(1.0).is_ok());
        assert!(FeatureSelector::new(0.0).is_err());
        assert!(FeatureSelector::new(1.5).is_err());
        assert!(FeatureSelector::new(f64::NAN).is_err());
    }
}
