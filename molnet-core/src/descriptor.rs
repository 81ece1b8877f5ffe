//! Dataset descriptor schema.
//!
//! A [`DatasetDescriptor`] records everything a consumer needs to fetch,
//! parse, split, and score one benchmark dataset. The registry never acts on
//! these fields itself; it only validates them once at construction.

use crate::error::RegistryError;
use crate::metrics::{Loss, MetricSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How the dataset files are laid out upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetType {
    /// One CSV (optionally gzipped or tarred) holding every row.
    OneFileCsv,
    /// Three CSVs, one per train/valid/test partition.
    SeparateCsv,
    /// Pre-featurized archive; no SMILES column.
    Joblib,
}

impl DatasetType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneFileCsv => "one_file_csv",
            Self::SeparateCsv => "separate_csv",
            Self::Joblib => "joblib",
        }
    }
}

/// Split strategy a consumer must apply to the parsed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    Random,
    /// Group molecules by Bemis-Murcko scaffold.
    Scaffold,
    Stratified,
    Time,
}

impl SplitStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Scaffold => "scaffold",
            Self::Stratified => "stratified",
            Self::Time => "time",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Classification,
    Regression,
    /// Columns of both kinds; metric choice is left to the consumer.
    Mix,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classification => "classification",
            Self::Regression => "regression",
            Self::Mix => "mix",
        }
    }

    /// Loss a consumer should use absent an explicit override.
    pub fn default_loss(self) -> Option<Loss> {
        match self {
            Self::Classification => Some(Loss::SigmoidCrossEntropy),
            Self::Regression => Some(Loss::MeanSquaredError),
            Self::Mix => None,
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = RegistryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| RegistryError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_str_enum!(
    DatasetType,
    "dataset type",
    [DatasetType::OneFileCsv, DatasetType::SeparateCsv, DatasetType::Joblib]
);
impl_str_enum!(
    SplitStrategy,
    "split strategy",
    [
        SplitStrategy::Random,
        SplitStrategy::Scaffold,
        SplitStrategy::Stratified,
        SplitStrategy::Time,
    ]
);
impl_str_enum!(
    TaskType,
    "task type",
    [TaskType::Classification, TaskType::Regression, TaskType::Mix]
);

/// Partition of a pre-split dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Train,
    Valid,
    Test,
}

impl Partition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Valid => "valid",
            Self::Test => "test",
        }
    }
}

/// URL of one physical subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetUrl {
    pub subset: String,
    pub url: String,
}

/// Where a dataset lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DatasetUrl {
    Single {
        url: String,
    },
    TrainValidTest {
        train: String,
        valid: String,
        test: String,
    },
    BySubset {
        urls: Vec<SubsetUrl>,
    },
}

/// A concrete file to fetch, produced by [`DatasetUrl::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadTarget<'a> {
    pub partition: Option<Partition>,
    pub url: &'a str,
}

impl DatasetUrl {
    /// Every URL, in declaration order.
    pub fn all(&self) -> Vec<&str> {
        match self {
            Self::Single { url } => vec![url.as_str()],
            Self::TrainValidTest { train, valid, test } => {
                vec![train.as_str(), valid.as_str(), test.as_str()]
            }
            Self::BySubset { urls } => urls.iter().map(|s| s.url.as_str()).collect(),
        }
    }

    pub fn subset_names(&self) -> Option<Vec<&str>> {
        match self {
            Self::BySubset { urls } => Some(urls.iter().map(|s| s.subset.as_str()).collect()),
            _ => None,
        }
    }

    /// Resolve to the files a downloader should fetch.
    ///
    /// Subset-keyed URLs need `subset`; the other shapes reject one.
    pub fn resolve(&self, subset: Option<&str>) -> Result<Vec<DownloadTarget<'_>>, RegistryError> {
        match (self, subset) {
            (Self::BySubset { urls }, Some(name)) => urls
                .iter()
                .find(|s| s.subset == name)
                .map(|s| {
                    vec![DownloadTarget {
                        partition: None,
                        url: s.url.as_str(),
                    }]
                })
                .ok_or_else(|| RegistryError::UnknownSubset {
                    subset: name.to_string(),
                    available: join_subsets(urls),
                }),
            (Self::BySubset { urls }, None) => Err(RegistryError::SubsetRequired {
                available: join_subsets(urls),
            }),
            (_, Some(name)) => Err(RegistryError::SubsetNotSupported {
                subset: name.to_string(),
            }),
            (Self::Single { url }, None) => Ok(vec![DownloadTarget {
                partition: None,
                url: url.as_str(),
            }]),
            (Self::TrainValidTest { train, valid, test }, None) => Ok(vec![
                DownloadTarget {
                    partition: Some(Partition::Train),
                    url: train.as_str(),
                },
                DownloadTarget {
                    partition: Some(Partition::Valid),
                    url: valid.as_str(),
                },
                DownloadTarget {
                    partition: Some(Partition::Test),
                    url: test.as_str(),
                },
            ]),
        }
    }
}

fn join_subsets(urls: &[SubsetUrl]) -> String {
    urls.iter()
        .map(|s| s.subset.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Target columns of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskColumns {
    /// Explicit, ordered column names.
    Listed { names: Vec<String> },
    /// Every header column except `exclude`, in header order.
    HeaderDerived { exclude: Vec<String> },
}

impl TaskColumns {
    pub fn listed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Listed {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn header_except(column: &str) -> Self {
        Self::HeaderDerived {
            exclude: vec![column.to_string()],
        }
    }

    /// Known task names, or `None` until a header is available.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Listed { names } => Some(names),
            Self::HeaderDerived { .. } => None,
        }
    }

    pub fn len(&self) -> Option<usize> {
        self.names().map(<[String]>::len)
    }

    /// A header-derived selector always stands for at least one column.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Listed { names } if names.is_empty())
    }

    /// Resolve against a parsed CSV header.
    pub fn resolve<S: AsRef<str>>(&self, header: &[S]) -> Result<Vec<String>, RegistryError> {
        let columns: Vec<&str> = header.iter().map(AsRef::as_ref).collect();
        match self {
            Self::Listed { names } => {
                if let Some(missing) = names.iter().find(|n| !columns.contains(&n.as_str())) {
                    return Err(RegistryError::MissingColumn {
                        column: missing.clone(),
                    });
                }
                Ok(names.clone())
            }
            Self::HeaderDerived { exclude } => {
                let tasks: Vec<String> = columns
                    .into_iter()
                    .filter(|c| !exclude.iter().any(|e| e == c))
                    .map(str::to_string)
                    .collect();
                if tasks.is_empty() {
                    return Err(RegistryError::NoTaskColumns);
                }
                Ok(tasks)
            }
        }
    }
}

/// Static description of one benchmark dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub dataset_type: DatasetType,
    pub url: DatasetUrl,
    #[serde(
        default,
        alias = "subset",
        alias = "pdbbind_subset",
        skip_serializing_if = "Option::is_none"
    )]
    pub subsets: Option<Vec<String>>,
    #[serde(alias = "smiles_columns")]
    pub smiles_column: String,
    /// `None` leaves metric choice to the consumer; distinct from an empty set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<Loss>,
    pub split: SplitStrategy,
    pub task_type: TaskType,
    pub tasks: TaskColumns,
}

impl DatasetDescriptor {
    /// Explicit loss override, else the task type's default.
    pub fn effective_loss(&self) -> Option<Loss> {
        self.loss.or_else(|| self.task_type.default_loss())
    }

    pub fn num_tasks(&self) -> Option<usize> {
        self.tasks.len()
    }

    /// Check the descriptor's internal consistency.
    ///
    /// `name` is only used to label the error.
    pub fn validate(&self, name: &str) -> Result<(), RegistryError> {
        let malformed = |reason: String| RegistryError::malformed(name, reason);

        match &self.tasks {
            TaskColumns::Listed { names } if names.is_empty() => {
                return Err(malformed("tasks must not be empty".into()));
            }
            TaskColumns::Listed { names } if names.iter().any(|n| n.trim().is_empty()) => {
                return Err(malformed("task names must not be blank".into()));
            }
            _ => {}
        }

        let is_split = matches!(self.url, DatasetUrl::TrainValidTest { .. });
        match (self.dataset_type, is_split) {
            (DatasetType::SeparateCsv, false) => {
                return Err(malformed(
                    "separate_csv requires train, valid and test urls".into(),
                ));
            }
            (other, true) if other != DatasetType::SeparateCsv => {
                return Err(malformed(format!(
                    "{other} must not declare train/valid/test urls"
                )));
            }
            _ => {}
        }

        match (&self.subsets, self.url.subset_names()) {
            (Some(declared), Some(keys)) => {
                if declared.is_empty() {
                    return Err(malformed("subset list must not be empty".into()));
                }
                let mut seen = HashSet::new();
                if let Some(dup) = declared.iter().find(|s| !seen.insert(s.as_str())) {
                    return Err(malformed(format!("subset '{dup}' declared twice")));
                }
                if declared.iter().map(String::as_str).ne(keys.iter().copied()) {
                    return Err(malformed(format!(
                        "url keys [{}] do not match subsets [{}]",
                        keys.join(", "),
                        declared.join(", ")
                    )));
                }
            }
            (Some(_), None) => {
                return Err(malformed("subsets declared but url is not subset-keyed".into()));
            }
            (None, Some(_)) => {
                return Err(malformed("subset-keyed url without a subset list".into()));
            }
            (None, None) => {}
        }

        for raw in self.url.all() {
            validate_url(raw).map_err(|reason| malformed(format!("url '{raw}': {reason}")))?;
        }

        if let Some(dup) = self.metrics.as_ref().and_then(MetricSet::duplicate_name) {
            return Err(malformed(format!("metric '{dup}' declared twice")));
        }

        let has_smiles = !self.smiles_column.trim().is_empty();
        match (self.dataset_type, has_smiles) {
            (DatasetType::Joblib, true) => {
                return Err(malformed(
                    "pre-featurized archives have no smiles column".into(),
                ));
            }
            (DatasetType::OneFileCsv | DatasetType::SeparateCsv, false) => {
                return Err(malformed("csv datasets need a smiles column".into()));
            }
            _ => {}
        }

        Ok(())
    }
}

fn validate_url(raw: &str) -> Result<(), String> {
    if raw.trim().is_empty() {
        return Err("empty".into());
    }
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;
    use pretty_assertions::assert_eq;

    fn csv_descriptor() -> DatasetDescriptor {
        DatasetDescriptor {
            dataset_type: DatasetType::OneFileCsv,
            url: DatasetUrl::Single {
                url: "https://example.org/data.csv".into(),
            },
            subsets: None,
            smiles_column: "smiles".into(),
            metrics: Some(MetricSet::new().with("RMSE", Metric::Rmse)),
            loss: None,
            split: SplitStrategy::Random,
            task_type: TaskType::Regression,
            tasks: TaskColumns::listed(["exp"]),
        }
    }

    fn subset_urls(names: &[&str]) -> DatasetUrl {
        DatasetUrl::BySubset {
            urls: names
                .iter()
                .map(|n| SubsetUrl {
                    subset: n.to_string(),
                    url: format!("https://example.org/{n}.csv"),
                })
                .collect(),
        }
    }

    #[test]
    fn test_valid_descriptor_passes() {
        assert_eq!(csv_descriptor().validate("lipo"), Ok(()));
    }

    #[test]
    fn test_empty_tasks_rejected() {
        let mut d = csv_descriptor();
        d.tasks = TaskColumns::Listed { names: vec![] };
        let err = d.validate("lipo").unwrap_err();
        assert_eq!(err, RegistryError::malformed("lipo", "tasks must not be empty"));
    }

    #[test]
    fn test_separate_csv_requires_three_urls() {
        let mut d = csv_descriptor();
        d.dataset_type = DatasetType::SeparateCsv;
        assert!(matches!(
            d.validate("kaggle"),
            Err(RegistryError::MalformedDescriptor { .. })
        ));

        d.url = DatasetUrl::TrainValidTest {
            train: "https://example.org/train.csv".into(),
            valid: "https://example.org/valid.csv".into(),
            test: String::new(),
        };
        let err = d.validate("kaggle").unwrap_err().to_string();
        assert!(err.contains("url ''"), "{err}");

        d.url = DatasetUrl::TrainValidTest {
            train: "https://example.org/train.csv".into(),
            valid: "https://example.org/valid.csv".into(),
            test: "https://example.org/test.csv".into(),
        };
        assert_eq!(d.validate("kaggle"), Ok(()));
    }

    #[test]
    fn test_split_urls_need_separate_csv() {
        let mut d = csv_descriptor();
        d.url = DatasetUrl::TrainValidTest {
            train: "https://example.org/train.csv".into(),
            valid: "https://example.org/valid.csv".into(),
            test: "https://example.org/test.csv".into(),
        };
        assert!(d.validate("x").is_err());
    }

    #[test]
    fn test_subset_keys_must_match() {
        let mut d = csv_descriptor();
        d.subsets = Some(vec!["core".into(), "full".into(), "refined".into()]);
        d.url = subset_urls(&["core", "full", "refined"]);
        assert_eq!(d.validate("pdbbind_smiles"), Ok(()));

        d.url = subset_urls(&["core", "full"]);
        let err = d.validate("pdbbind_smiles").unwrap_err().to_string();
        assert!(err.contains("do not match"), "{err}");

        d.subsets = None;
        d.url = subset_urls(&["core"]);
        assert!(d.validate("pdbbind_smiles").is_err());

        d.subsets = Some(vec!["core".into()]);
        d.url = DatasetUrl::Single {
            url: "https://example.org/core.csv".into(),
        };
        assert!(d.validate("pdbbind_smiles").is_err());
    }

    #[test]
    fn test_duplicate_subset_rejected() {
        let mut d = csv_descriptor();
        d.subsets = Some(vec!["core".into(), "core".into()]);
        d.url = subset_urls(&["core", "core"]);
        let err = d.validate("x").unwrap_err().to_string();
        assert!(err.contains("declared twice"), "{err}");
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut d = csv_descriptor();
        d.url = DatasetUrl::Single {
            url: "ftp://example.org/data.csv".into(),
        };
        let err = d.validate("x").unwrap_err().to_string();
        assert!(err.contains("unsupported scheme 'ftp'"), "{err}");

        d.url = DatasetUrl::Single {
            url: "not a url".into(),
        };
        assert!(d.validate("x").is_err());
    }

    #[test]
    fn test_duplicate_metric_rejected() {
        let mut d = csv_descriptor();
        d.metrics = Some(
            MetricSet::new()
                .with("RMSE", Metric::Rmse)
                .with("RMSE", Metric::Mae),
        );
        let err = d.validate("x").unwrap_err().to_string();
        assert!(err.contains("metric 'RMSE' declared twice"), "{err}");
    }

    #[test]
    fn test_smiles_column_matches_dataset_type() {
        let mut d = csv_descriptor();
        d.smiles_column = String::new();
        assert!(d.validate("x").is_err());

        d.dataset_type = DatasetType::Joblib;
        assert_eq!(d.validate("x"), Ok(()));

        d.smiles_column = "smiles".into();
        assert!(d.validate("x").is_err());
    }

    #[test]
    fn test_resolve_urls() {
        let single = DatasetUrl::Single {
            url: "https://example.org/a.csv".into(),
        };
        assert_eq!(
            single.resolve(None).unwrap(),
            vec![DownloadTarget {
                partition: None,
                url: "https://example.org/a.csv"
            }]
        );
        assert_eq!(
            single.resolve(Some("core")).unwrap_err(),
            RegistryError::SubsetNotSupported {
                subset: "core".into()
            }
        );

        let by_subset = subset_urls(&["core", "full"]);
        assert_eq!(
            by_subset.resolve(Some("full")).unwrap()[0].url,
            "https://example.org/full.csv"
        );
        assert_eq!(
            by_subset.resolve(None).unwrap_err(),
            RegistryError::SubsetRequired {
                available: "core, full".into()
            }
        );
        assert!(matches!(
            by_subset.resolve(Some("refined")),
            Err(RegistryError::UnknownSubset { .. })
        ));

        let split = DatasetUrl::TrainValidTest {
            train: "https://example.org/train.csv".into(),
            valid: "https://example.org/valid.csv".into(),
            test: "https://example.org/test.csv".into(),
        };
        let partitions: Vec<_> = split
            .resolve(None)
            .unwrap()
            .into_iter()
            .map(|t| t.partition)
            .collect();
        assert_eq!(
            partitions,
            vec![
                Some(Partition::Train),
                Some(Partition::Valid),
                Some(Partition::Test)
            ]
        );
    }

    #[test]
    fn test_task_columns_resolve() {
        let listed = TaskColumns::listed(["HOMO", "LUMO"]);
        assert_eq!(
            listed.resolve(&["smiles", "LUMO", "HOMO"]).unwrap(),
            vec!["HOMO".to_string(), "LUMO".to_string()]
        );
        assert_eq!(
            listed.resolve(&["smiles", "HOMO"]).unwrap_err(),
            RegistryError::MissingColumn {
                column: "LUMO".into()
            }
        );

        let derived = TaskColumns::header_except("smiles");
        assert!(!derived.is_empty());
        assert_eq!(derived.len(), None);
        assert_eq!(
            derived.resolve(&["smiles", "CHEMBL1", "CHEMBL2"]).unwrap(),
            vec!["CHEMBL1".to_string(), "CHEMBL2".to_string()]
        );
        assert_eq!(
            derived.resolve(&["smiles"]).unwrap_err(),
            RegistryError::NoTaskColumns
        );
    }

    #[test]
    fn test_effective_loss() {
        let mut d = csv_descriptor();
        assert_eq!(d.effective_loss(), Some(Loss::MeanSquaredError));
        d.task_type = TaskType::Classification;
        assert_eq!(d.effective_loss(), Some(Loss::SigmoidCrossEntropy));
        d.task_type = TaskType::Mix;
        assert_eq!(d.effective_loss(), None);
        d.loss = Some(Loss::SigmoidCrossEntropy);
        assert_eq!(d.effective_loss(), Some(Loss::SigmoidCrossEntropy));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("scaffold".parse::<SplitStrategy>().unwrap(), SplitStrategy::Scaffold);
        assert_eq!("mix".parse::<TaskType>().unwrap(), TaskType::Mix);
        assert_eq!("joblib".parse::<DatasetType>().unwrap(), DatasetType::Joblib);
        assert_eq!(
            "parquet".parse::<DatasetType>().unwrap_err(),
            RegistryError::UnknownVariant {
                kind: "dataset type",
                value: "parquet".into()
            }
        );
    }

    #[test]
    fn test_deserialize_accepts_legacy_key_spellings() {
        let json = r#"{
            "pdbbind_subset": ["core", "full"],
            "dataset_type": "joblib",
            "url": {"type": "by_subset", "urls": [
                {"subset": "core", "url": "https://example.org/core.tar.gz"},
                {"subset": "full", "url": "https://example.org/full.tar.gz"}
            ]},
            "smiles_columns": "",
            "split": "time",
            "task_type": "regression",
            "tasks": {"type": "listed", "names": ["-logKd/Ki"]}
        }"#;
        let d: DatasetDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(d.subsets, Some(vec!["core".into(), "full".into()]));
        assert_eq!(d.metrics, None);
        assert_eq!(d.validate("pdbbind_grid"), Ok(()));
    }

    #[test]
    fn test_unknown_dataset_type_fails_to_load() {
        let json = r#"{
            "dataset_type": "parquet",
            "url": {"type": "single", "url": "https://example.org/a.parquet"},
            "smiles_column": "smiles",
            "split": "random",
            "task_type": "regression",
            "tasks": {"type": "listed", "names": ["y"]}
        }"#;
        assert!(serde_json::from_str::<DatasetDescriptor>(json).is_err());
    }

    #[test]
    fn test_empty_metric_set_is_distinct_from_none() {
        let mut d = csv_descriptor();
        d.metrics = Some(MetricSet::new());
        let json = serde_json::to_string(&d).unwrap();
        let back: DatasetDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics, Some(MetricSet::new()));

        d.metrics = None;
        let json = serde_json::to_string(&d).unwrap();
        assert!(!json.contains("metrics"));
        let back: DatasetDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics, None);
    }
}
