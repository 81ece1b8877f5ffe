//! Dataset registry: the immutable catalog of dataset descriptors.
//!
//! A [`DatasetRegistry`] is assembled once through [`RegistryBuilder`], which
//! validates every descriptor, and is read-only afterwards. The process-wide
//! default built from the stock MolNet mirrors lives behind
//! [`default_registry`].

use crate::catalog::molnet_catalog;
use crate::config::{MolNetConfig, SourceConfig};
use crate::descriptor::{DatasetDescriptor, TaskType};
use crate::error::{ConfigError, MolNetError, RegistryError};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Read-only map from dataset name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    entries: BTreeMap<String, DatasetDescriptor>,
}

impl DatasetRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in MolNet catalog against the given mirrors.
    pub fn molnet(sources: &SourceConfig) -> Result<Self, RegistryError> {
        RegistryBuilder::new().with_molnet(sources).build()
    }

    /// Registry described by a loaded configuration, including any extra descriptor file.
    pub fn from_config(config: &MolNetConfig) -> Result<Self, MolNetError> {
        let mut builder = RegistryBuilder::new();
        if !config.registry.skip_builtin {
            builder = builder.with_molnet(&config.sources);
        }
        if let Some(path) = &config.registry.extra_descriptors {
            builder = builder.extend_from_json(path)?;
        }
        Ok(builder.build()?)
    }

    pub fn get_descriptor(&self, name: &str) -> Result<&DatasetDescriptor, RegistryError> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::UnknownDataset {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Dataset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DatasetDescriptor)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn filter_by_task_type(
        &self,
        task_type: TaskType,
    ) -> impl Iterator<Item = (&str, &DatasetDescriptor)> {
        self.iter().filter(move |(_, d)| d.task_type == task_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects descriptors and validates them into a [`DatasetRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    pending: Vec<(String, DatasetDescriptor)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_molnet(mut self, sources: &SourceConfig) -> Self {
        self.pending.extend(
            molnet_catalog(sources)
                .into_iter()
                .map(|(name, d)| (name.to_string(), d)),
        );
        self
    }

    pub fn insert(mut self, name: impl Into<String>, descriptor: DatasetDescriptor) -> Self {
        self.pending.push((name.into(), descriptor));
        self
    }

    /// Add entries from a JSON object of `name -> descriptor`.
    pub fn extend_from_json(mut self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let extra: BTreeMap<String, DatasetDescriptor> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = extra.len(), "Read extra descriptors");
        self.pending.extend(extra);
        Ok(self)
    }

    /// Validate every pending descriptor and freeze the registry.
    pub fn build(self) -> Result<DatasetRegistry, RegistryError> {
        let mut entries = BTreeMap::new();
        for (name, descriptor) in self.pending {
            if let Err(e) = descriptor.validate(&name) {
                tracing::warn!(dataset = %name, error = %e, "Rejected dataset descriptor");
                return Err(e);
            }
            if entries.contains_key(&name) {
                return Err(RegistryError::DuplicateDataset { name });
            }
            entries.insert(name, descriptor);
        }
        tracing::debug!(datasets = entries.len(), "Built dataset registry");
        Ok(DatasetRegistry { entries })
    }
}

static DEFAULT_REGISTRY: OnceLock<Result<DatasetRegistry, RegistryError>> = OnceLock::new();

/// The built-in catalog on the default mirrors, built on first use.
pub fn default_registry() -> Result<&'static DatasetRegistry, RegistryError> {
    DEFAULT_REGISTRY
        .get_or_init(|| DatasetRegistry::molnet(&SourceConfig::default()))
        .as_ref()
        .map_err(Clone::clone)
}

/// Look up a dataset in the [`default_registry`].
pub fn get_descriptor(name: &str) -> Result<&'static DatasetDescriptor, RegistryError> {
    default_registry()?.get_descriptor(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MOLNET_DATASETS;
    use crate::descriptor::{DatasetType, DatasetUrl, SplitStrategy, TaskColumns};
    use crate::metrics::{Metric, MetricSet};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn custom(url: &str) -> DatasetDescriptor {
        DatasetDescriptor {
            dataset_type: DatasetType::OneFileCsv,
            url: DatasetUrl::Single { url: url.into() },
            subsets: None,
            smiles_column: "smiles".into(),
            metrics: Some(MetricSet::new().with("MAE", Metric::Mae)),
            loss: None,
            split: SplitStrategy::Scaffold,
            task_type: TaskType::Regression,
            tasks: TaskColumns::listed(["logS"]),
        }
    }

    #[test]
    fn test_default_registry_has_every_molnet_dataset() {
        let registry = default_registry().unwrap();
        assert_eq!(registry.len(), MOLNET_DATASETS.len());
        for name in MOLNET_DATASETS {
            assert!(registry.contains(name), "{name}");
        }
    }

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry().unwrap();
        let b = default_registry().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_unknown_dataset() {
        let err = get_descriptor("not_a_real_dataset").unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownDataset {
                name: "not_a_real_dataset".into()
            }
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(get_descriptor("HIV").is_ok());
        assert!(get_descriptor("hiv").is_err());
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = RegistryBuilder::new()
            .insert("solubility", custom("https://example.org/a.csv"))
            .insert("solubility", custom("https://example.org/b.csv"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateDataset {
                name: "solubility".into()
            }
        );

        let err = RegistryBuilder::new()
            .with_molnet(&SourceConfig::default())
            .insert("lipo", custom("https://example.org/lipo.csv"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateDataset { .. }));
    }

    #[test]
    fn test_builder_rejects_malformed() {
        let mut bad = custom("https://example.org/a.csv");
        bad.dataset_type = DatasetType::SeparateCsv;
        let err = RegistryBuilder::new()
            .insert("broken", bad)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MalformedDescriptor { ref name, .. } if name == "broken"
        ));
    }

    #[test]
    fn test_filter_by_task_type() {
        let registry = default_registry().unwrap();
        let mixed: Vec<&str> = registry
            .filter_by_task_type(TaskType::Mix)
            .map(|(name, _)| name)
            .collect();
        assert_eq!(mixed, vec!["chembl"]);

        let classification = registry.filter_by_task_type(TaskType::Classification).count();
        assert_eq!(classification, 9);
    }

    #[test]
    fn test_extend_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let extra = BTreeMap::from([(
            "aqsol".to_string(),
            custom("https://example.org/aqsol.csv"),
        )]);
        write!(file, "{}", serde_json::to_string(&extra).unwrap()).unwrap();

        let registry = RegistryBuilder::new()
            .with_molnet(&SourceConfig::default())
            .extend_from_json(file.path())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(registry.len(), MOLNET_DATASETS.len() + 1);
        assert_eq!(
            registry.get_descriptor("aqsol").unwrap().split,
            SplitStrategy::Scaffold
        );
    }

    #[test]
    fn test_extend_from_json_errors() {
        let missing = Path::new("/definitely/not/here.json");
        assert!(matches!(
            RegistryBuilder::new().extend_from_json(missing),
            Err(ConfigError::Read { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"x\": {{\"dataset_type\": \"hdf5\"}}}}").unwrap();
        assert!(matches!(
            RegistryBuilder::new().extend_from_json(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_config_can_skip_builtin() {
        let mut config = MolNetConfig::default();
        config.registry.skip_builtin = true;
        let registry = DatasetRegistry::from_config(&config).unwrap();
        assert!(registry.is_empty());

        config.registry.skip_builtin = false;
        let registry = DatasetRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), MOLNET_DATASETS.len());
    }
}
