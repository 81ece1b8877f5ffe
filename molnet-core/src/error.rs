//! Error types for the MolNet registry.
//!
//! Uses `thiserror` for public API error types, split by the part of the
//! crate that raises them: registry lookups and construction, metric
//! evaluation, and configuration loading.

use std::path::PathBuf;

/// Top-level error type for the MolNet core library.
#[derive(Debug, thiserror::Error)]
pub enum MolNetError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors from descriptor validation and registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    #[error("Malformed descriptor '{name}': {reason}")]
    MalformedDescriptor { name: String, reason: String },

    #[error("Dataset registered twice: {name}")]
    DuplicateDataset { name: String },

    #[error("Unknown subset '{subset}' (available: {available})")]
    UnknownSubset { subset: String, available: String },

    #[error("A subset is required (available: {available})")]
    SubsetRequired { available: String },

    #[error("Dataset has no subsets, got '{subset}'")]
    SubsetNotSupported { subset: String },

    #[error("Task column '{column}' not found in header")]
    MissingColumn { column: String },

    #[error("Header yields no task columns")]
    NoTaskColumns,

    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl RegistryError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from metric and loss evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    #[error("Shape mismatch: predictions {predictions:?} vs targets {targets:?}")]
    ShapeMismatch {
        predictions: Vec<usize>,
        targets: Vec<usize>,
    },

    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },
}

impl MetricError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }
}

/// Errors from loading configuration and descriptor files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse descriptors in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::UnknownDataset {
            name: "not_a_real_dataset".into(),
        };
        assert_eq!(err.to_string(), "Unknown dataset: not_a_real_dataset");

        let err = RegistryError::malformed("kaggle", "missing test url");
        assert_eq!(
            err.to_string(),
            "Malformed descriptor 'kaggle': missing test url"
        );
    }

    #[test]
    fn test_metric_error_display() {
        let err = MetricError::ShapeMismatch {
            predictions: vec![3, 1],
            targets: vec![2, 1],
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: predictions [3, 1] vs targets [2, 1]"
        );
    }

    #[test]
    fn test_top_level_conversion() {
        let err: MolNetError = MetricError::degenerate("all targets missing").into();
        assert!(matches!(err, MolNetError::Metric(_)));
        assert_eq!(
            err.to_string(),
            "Metric error: Degenerate input: all targets missing"
        );
    }
}
