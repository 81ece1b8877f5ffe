//! Evaluation metrics and losses that skip missing targets.
//!
//! Every function here takes `(predictions, targets)` as `rows × tasks`
//! arrays of equal shape. A `NaN` in `targets` marks a missing label: that
//! position contributes to neither the accumulated error nor the count used
//! for averaging. When nothing is left to average over, the function fails
//! with [`MetricError::DegenerateInput`] instead of returning `NaN`.

pub mod classification;
pub mod loss;
pub mod regression;

pub use classification::{binary_accuracy, prc_auc, roc_auc};
pub use loss::{Loss, sigmoid_cross_entropy};
pub use regression::{mae, mean_squared_error, r2_score, rmse};

use crate::error::{MetricError, RegistryError};
use ndarray::{ArrayView2, Zip};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature shared by every metric and loss function.
pub type MetricFn = fn(ArrayView2<'_, f64>, ArrayView2<'_, f64>) -> Result<f64, MetricError>;

/// The closed set of metrics a descriptor may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BinaryAccuracy,
    RocAuc,
    PrcAuc,
    Mae,
    Rmse,
    R2,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::BinaryAccuracy,
        Metric::RocAuc,
        Metric::PrcAuc,
        Metric::Mae,
        Metric::Rmse,
        Metric::R2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BinaryAccuracy => "binary_accuracy",
            Self::RocAuc => "roc_auc",
            Self::PrcAuc => "prc_auc",
            Self::Mae => "mae",
            Self::Rmse => "rmse",
            Self::R2 => "r2",
        }
    }

    /// Function pointer implementing this metric.
    pub fn function(self) -> MetricFn {
        match self {
            Self::BinaryAccuracy => binary_accuracy,
            Self::RocAuc => roc_auc,
            Self::PrcAuc => prc_auc,
            Self::Mae => mae,
            Self::Rmse => rmse,
            Self::R2 => r2_score,
        }
    }

    pub fn evaluate(
        self,
        predictions: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<f64, MetricError> {
        (self.function())(predictions, targets)
    }

    /// Evaluate over a single task column given as plain slices.
    pub fn evaluate_column(self, predictions: &[f64], targets: &[f64]) -> Result<f64, MetricError> {
        let p = ArrayView2::from_shape((predictions.len(), 1), predictions).map_err(|_| {
            MetricError::ShapeMismatch {
                predictions: vec![predictions.len()],
                targets: vec![targets.len()],
            }
        })?;
        let t = ArrayView2::from_shape((targets.len(), 1), targets).map_err(|_| {
            MetricError::ShapeMismatch {
                predictions: vec![predictions.len()],
                targets: vec![targets.len()],
            }
        })?;
        self.evaluate(p, t)
    }

    pub fn higher_is_better(self) -> bool {
        !matches!(self, Self::Mae | Self::Rmse)
    }

    pub fn is_classification(self) -> bool {
        matches!(self, Self::BinaryAccuracy | Self::RocAuc | Self::PrcAuc)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "binary_accuracy" | "accuracy" => Ok(Self::BinaryAccuracy),
            "roc_auc" => Ok(Self::RocAuc),
            "prc_auc" => Ok(Self::PrcAuc),
            "mae" => Ok(Self::Mae),
            "rmse" => Ok(Self::Rmse),
            "r2" | "r2_score" => Ok(Self::R2),
            _ => Err(RegistryError::UnknownVariant {
                kind: "metric",
                value: s.to_string(),
            }),
        }
    }
}

/// A metric registered under a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedMetric {
    pub name: String,
    pub metric: Metric,
}

/// Ordered name → metric mapping attached to a descriptor.
///
/// Names must be unique; [`MetricSet::duplicate_name`] reports the first
/// repeat so the registry can reject the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet {
    entries: Vec<NamedMetric>,
}

impl MetricSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, metric: Metric) -> Self {
        self.entries.push(NamedMetric {
            name: name.to_string(),
            metric,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<Metric> {
        self.entries
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.metric)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Metric)> {
        self.entries.iter().map(|m| (m.name.as_str(), m.metric))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn duplicate_name(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.names().find(|name| !seen.insert(*name))
    }

    /// Evaluate every metric in order, stopping at the first failure.
    pub fn evaluate_all(
        &self,
        predictions: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<Vec<(String, f64)>, MetricError> {
        self.iter()
            .map(|(name, metric)| Ok((name.to_string(), metric.evaluate(predictions, targets)?)))
            .collect()
    }
}

pub(crate) fn check_shapes(
    predictions: &ArrayView2<'_, f64>,
    targets: &ArrayView2<'_, f64>,
) -> Result<(), MetricError> {
    if predictions.shape() != targets.shape() {
        return Err(MetricError::ShapeMismatch {
            predictions: predictions.shape().to_vec(),
            targets: targets.shape().to_vec(),
        });
    }
    Ok(())
}

/// Sum `f(prediction, target)` over positions whose target is present.
///
/// Returns the sum and the number of contributing positions.
pub(crate) fn masked_sum(
    predictions: &ArrayView2<'_, f64>,
    targets: &ArrayView2<'_, f64>,
    f: impl Fn(f64, f64) -> f64,
) -> (f64, usize) {
    let mut sum = 0.0;
    let mut count = 0usize;
    Zip::from(predictions).and(targets).for_each(|&p, &t| {
        if !t.is_nan() {
            sum += f(p, t);
            count += 1;
        }
    });
    (sum, count)
}

/// Collect `(prediction, target)` pairs whose target is present, in row-major order.
pub(crate) fn observed_pairs(
    predictions: &ArrayView2<'_, f64>,
    targets: &ArrayView2<'_, f64>,
) -> Vec<(f64, f64)> {
    predictions
        .iter()
        .zip(targets.iter())
        .filter(|(_, t)| !t.is_nan())
        .map(|(&p, &t)| (p, t))
        .collect()
}
