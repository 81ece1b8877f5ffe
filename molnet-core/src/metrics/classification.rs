//! Binary classification metrics over logits and 0/1 labels.
//!
//! Predictions are raw scores (logits); targets are `0.0` or `1.0`, with
//! `NaN` for a missing label. The AUC metrics pool every present position
//! across task columns before ranking.

use super::{check_shapes, masked_sum, observed_pairs};
use crate::error::MetricError;
use ndarray::ArrayView2;
use std::cmp::Ordering;

fn is_positive(label: f64) -> bool {
    label >= 0.5
}

/// Fraction of present labels matched by `prediction >= 0`.
pub fn binary_accuracy(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    check_shapes(&predictions, &targets)?;
    let (correct, count) = masked_sum(&predictions, &targets, |p, t| {
        if (p >= 0.0) == is_positive(t) { 1.0 } else { 0.0 }
    });
    if count == 0 {
        return Err(MetricError::degenerate("every target is missing"));
    }
    Ok(correct / count as f64)
}

/// Present `(score, label)` pairs, failing unless both classes occur.
fn labelled_scores(
    predictions: &ArrayView2<'_, f64>,
    targets: &ArrayView2<'_, f64>,
) -> Result<(Vec<(f64, bool)>, usize, usize), MetricError> {
    check_shapes(predictions, targets)?;
    let pairs: Vec<(f64, bool)> = observed_pairs(predictions, targets)
        .into_iter()
        .map(|(p, t)| (p, is_positive(t)))
        .collect();
    if pairs.is_empty() {
        return Err(MetricError::degenerate("every target is missing"));
    }
    let n_pos = pairs.iter().filter(|(_, label)| *label).count();
    let n_neg = pairs.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(MetricError::degenerate(
            "targets contain a single class; AUC is undefined",
        ));
    }
    Ok((pairs, n_pos, n_neg))
}

/// Area under the ROC curve via the Mann-Whitney U statistic.
///
/// Tied scores share the average of their ranks.
pub fn roc_auc(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    let (mut pairs, n_pos, n_neg) = labelled_scores(&predictions, &targets)?;
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut rank_sum_pos = 0.0;
    let mut i = 0;
    while i < pairs.len() {
        let mut j = i;
        while j + 1 < pairs.len() && pairs[j + 1].0.total_cmp(&pairs[i].0) == Ordering::Equal {
            j += 1;
        }
        // Ranks are 1-based; the tie group i..=j shares their mean.
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        let tied_pos = pairs[i..=j].iter().filter(|(_, label)| *label).count();
        rank_sum_pos += avg_rank * tied_pos as f64;
        i = j + 1;
    }

    let n_pos_f = n_pos as f64;
    let u = rank_sum_pos - n_pos_f * (n_pos_f + 1.0) / 2.0;
    Ok(u / (n_pos_f * n_neg as f64))
}

/// Area under the precision-recall curve by the trapezoidal rule.
///
/// The curve starts at (recall 0, precision 1) and stops at the first
/// threshold reaching full recall.
pub fn prc_auc(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    let (mut pairs, n_pos, _) = labelled_scores(&predictions, &targets)?;
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut area = 0.0;
    let (mut prev_recall, mut prev_precision) = (0.0, 1.0);
    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < pairs.len() {
        let threshold = pairs[i].0;
        while i < pairs.len() && pairs[i].0.total_cmp(&threshold) == Ordering::Equal {
            if pairs[i].1 {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }

        let recall = tp as f64 / n_pos as f64;
        let precision = tp as f64 / (tp + fp) as f64;
        area += (recall - prev_recall) * (precision + prev_precision) / 2.0;
        prev_recall = recall;
        prev_precision = precision;

        if tp == n_pos {
            break;
        }
    }

    Ok(area)
}
