//! # MolNet Core
//!
//! Registry of MoleculeNet benchmark dataset descriptors together with the
//! missing-value-aware metrics used to score models on them.
//! Provides the descriptor data model, the built-in catalog, the registry,
//! evaluation metrics, configuration, and error types.

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod metrics;
pub mod registry;

// Re-export commonly used types at the crate root.
pub use catalog::{MOLNET_DATASETS, molnet_catalog};
pub use config::{MolNetConfig, RegistryConfig, SourceConfig, load_config};
pub use descriptor::{
    DatasetDescriptor, DatasetType, DatasetUrl, DownloadTarget, Partition, SplitStrategy,
    SubsetUrl, TaskColumns, TaskType,
};
pub use error::{ConfigError, MetricError, MolNetError, RegistryError};
pub use metrics::{Loss, Metric, MetricFn, MetricSet, NamedMetric, mae, r2_score, rmse};
pub use registry::{DatasetRegistry, RegistryBuilder, default_registry, get_descriptor};
