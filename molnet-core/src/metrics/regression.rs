//! Regression metrics: MAE, MSE, RMSE, and R².

use super::{check_shapes, masked_sum};
use crate::error::MetricError;
use ndarray::{ArrayView2, Axis};

/// Mean absolute error over present targets.
///
/// MAE = (1/n) * sum |p_i - t_i|, with n the number of present targets.
/// Targets are pooled across every task column, so a column whose targets
/// are all missing contributes nothing; only a fully missing matrix fails.
pub fn mae(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    check_shapes(&predictions, &targets)?;
    let (sum, count) = masked_sum(&predictions, &targets, |p, t| (p - t).abs());
    if count == 0 {
        return Err(MetricError::degenerate("every target is missing"));
    }
    Ok(sum / count as f64)
}

/// Mean squared error over present targets, pooled across task columns.
pub fn mean_squared_error(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    check_shapes(&predictions, &targets)?;
    let (sum, count) = masked_sum(&predictions, &targets, |p, t| (p - t) * (p - t));
    if count == 0 {
        return Err(MetricError::degenerate("every target is missing"));
    }
    Ok(sum / count as f64)
}

/// Root mean squared error over present targets.
///
/// RMSE = sqrt((1/n) * sum (p_i - t_i)^2). Pooled like [`mae`]: a task
/// column with no present target is skipped rather than rejected, unlike
/// [`r2_score`].
pub fn rmse(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    mean_squared_error(predictions, targets).map(f64::sqrt)
}

/// Coefficient of determination, averaged uniformly over task columns.
///
/// For each column the target mean, SS_res and SS_tot only use the rows whose
/// target is present. A column without variance scores 1 on a perfect fit
/// and 0 otherwise. A column with no present target is an error.
pub fn r2_score(
    predictions: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    check_shapes(&predictions, &targets)?;
    let n_tasks = targets.ncols();
    if n_tasks == 0 {
        return Err(MetricError::degenerate("no task columns"));
    }

    let mut total = 0.0;
    for (task, (p_col, t_col)) in predictions
        .axis_iter(Axis(1))
        .zip(targets.axis_iter(Axis(1)))
        .enumerate()
    {
        let observed: Vec<(f64, f64)> = p_col
            .iter()
            .zip(t_col.iter())
            .filter(|(_, t)| !t.is_nan())
            .map(|(&p, &t)| (p, t))
            .collect();
        if observed.is_empty() {
            return Err(MetricError::degenerate(format!(
                "task column {task} has no present targets"
            )));
        }

        let mean = observed.iter().map(|(_, t)| t).sum::<f64>() / observed.len() as f64;
        let (ss_res, ss_tot) = observed
            .iter()
            .fold((0.0, 0.0), |(res, tot), &(p, t)| {
                (res + (t - p) * (t - p), tot + (t - mean) * (t - mean))
            });

        total += if ss_tot == 0.0 {
            if ss_res == 0.0 { 1.0 } else { 0.0 }
        } else {
            1.0 - ss_res / ss_tot
        };
    }

    Ok(total / n_tasks as f64)
}
