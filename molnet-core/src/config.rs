//! Configuration for the MolNet registry.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> overrides.
//! Configuration is loaded from the user config directory and/or `.molnet/config.toml`
//! in the workspace directory.

use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default mirror for raw MolNet CSVs.
pub const DEFAULT_MOLNET_BASE: &str =
    "http://deepchem.io.s3-website-us-west-1.amazonaws.com/datasets/";

/// Default mirror for pre-featurized archives.
pub const DEFAULT_FEATURIZED_BASE: &str =
    "http://deepchem.io.s3-website-us-west-1.amazonaws.com/featurized_datasets/";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MolNetConfig {
    /// Mirror base URLs used to build the built-in catalog.
    #[serde(default)]
    pub sources: SourceConfig,
    /// Registry construction options.
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Base URLs the catalog joins file names onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_molnet_base")]
    pub molnet_base: String,
    #[serde(default = "default_featurized_base")]
    pub featurized_base: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            molnet_base: default_molnet_base(),
            featurized_base: default_featurized_base(),
        }
    }
}

impl SourceConfig {
    pub fn molnet(&self, file: &str) -> String {
        join_base(&self.molnet_base, file)
    }

    pub fn featurized(&self, file: &str) -> String {
        join_base(&self.featurized_base, file)
    }
}

fn join_base(base: &str, file: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{file}")
    } else {
        format!("{base}/{file}")
    }
}

fn default_molnet_base() -> String {
    DEFAULT_MOLNET_BASE.to_string()
}

fn default_featurized_base() -> String {
    DEFAULT_FEATURIZED_BASE.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// JSON file of additional `name -> descriptor` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_descriptors: Option<PathBuf>,
    /// Leave the built-in MolNet catalog out of the registry.
    #[serde(default)]
    pub skip_builtin: bool,
}

impl RegistryConfig {
    /// Anchor a relative `extra_descriptors` path at `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = self.extra_descriptors.as_mut() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit config file (passed as argument)
/// 2. Environment variables (prefixed with `MOLNET_`)
/// 3. Workspace-local config (`.molnet/config.toml`)
/// 4. User config (`~/.config/molnet/config.toml`)
/// 5. Built-in defaults
///
/// A relative `registry.extra_descriptors` is resolved against `workspace`.
pub fn load_config(
    workspace: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<MolNetConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(MolNetConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".molnet").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // MOLNET_SOURCES__MOLNET_BASE, MOLNET_REGISTRY__EXTRA_DESCRIPTORS, ...
    figment = figment.merge(Env::prefixed("MOLNET_").split("__"));

    if let Some(path) = explicit {
        figment = figment.merge(Toml::file(path));
    }

    let mut config: MolNetConfig = figment.extract().map_err(Box::new)?;
    if let Some(ws) = workspace {
        config.registry.resolve_paths(ws);
    }
    tracing::debug!(
        molnet_base = %config.sources.molnet_base,
        featurized_base = %config.sources.featurized_base,
        "Loaded configuration"
    );
    Ok(config)
}

/// `~/.config/molnet/config.toml` (platform equivalent).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "molnet", "molnet")
        .map(|d| d.config_dir().join("config.toml"))
}
