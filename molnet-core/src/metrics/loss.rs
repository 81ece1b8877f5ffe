//! Loss functions a descriptor may name as an override.

use super::regression::mean_squared_error;
use super::{MetricFn, check_shapes, masked_sum};
use crate::error::{MetricError, RegistryError};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    SigmoidCrossEntropy,
    MeanSquaredError,
}

impl Loss {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SigmoidCrossEntropy => "sigmoid_cross_entropy",
            Self::MeanSquaredError => "mean_squared_error",
        }
    }

    pub fn function(self) -> MetricFn {
        match self {
            Self::SigmoidCrossEntropy => sigmoid_cross_entropy,
            Self::MeanSquaredError => mean_squared_error,
        }
    }

    pub fn evaluate(
        self,
        predictions: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<f64, MetricError> {
        (self.function())(predictions, targets)
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Loss {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sigmoid_cross_entropy" => Ok(Self::SigmoidCrossEntropy),
            "mean_squared_error" | "mse" => Ok(Self::MeanSquaredError),
            _ => Err(RegistryError::UnknownVariant {
                kind: "loss",
                value: s.to_string(),
            }),
        }
    }
}

/// Sigmoid cross-entropy on logits, averaged over present labels.
///
/// Uses max(x, 0) - x * t + ln(1 + e^-|x|) so large logits do not overflow.
pub fn sigmoid_cross_entropy(
    logits: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<f64, MetricError> {
    check_shapes(&logits, &targets)?;
    let (sum, count) = masked_sum(&logits, &targets, |x, t| {
        x.max(0.0) - x * t + (-x.abs()).exp().ln_1p()
    });
    if count == 0 {
        return Err(MetricError::degenerate("every target is missing"));
    }
    Ok(sum / count as f64)
}
