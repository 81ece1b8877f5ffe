//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use molnet_core::config::{MolNetConfig, load_config};
use molnet_core::descriptor::{DatasetDescriptor, SplitStrategy, TaskType};
use molnet_core::metrics::Metric;
use molnet_core::registry::DatasetRegistry;
use std::fmt::Write as _;
use std::path::Path;

/// Handle a CLI subcommand.
pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config_path),
        Commands::Score {
            metric,
            predictions,
            targets,
        } => {
            let value = score(&metric, &predictions, &targets)?;
            println!("{}", value);
            Ok(())
        }
        Commands::List { task_type, split } => {
            let registry = load_registry(workspace, config_path)?;
            let task_type = task_type.map(|t| t.parse::<TaskType>()).transpose()?;
            let split = split.map(|s| s.parse::<SplitStrategy>()).transpose()?;
            print!("{}", render_list(&registry, task_type, split));
            Ok(())
        }
        Commands::Show { name, json } => {
            let registry = load_registry(workspace, config_path)?;
            let descriptor = registry.get_descriptor(&name)?;
            println!("{}", render_descriptor(descriptor, json)?);
            Ok(())
        }
        Commands::Urls { name, subset } => {
            let registry = load_registry(workspace, config_path)?;
            let descriptor = registry.get_descriptor(&name)?;
            print!("{}", render_urls(descriptor, subset.as_deref())?);
            Ok(())
        }
        Commands::Validate => {
            let registry = load_registry(workspace, config_path)?;
            println!("Registry OK: {} datasets", registry.len());
            for task_type in [TaskType::Classification, TaskType::Regression, TaskType::Mix] {
                println!(
                    "  {:<15} {}",
                    task_type,
                    registry.filter_by_task_type(task_type).count()
                );
            }
            Ok(())
        }
    }
}

fn handle_config(
    action: ConfigAction,
    workspace: &Path,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_dir = workspace.join(".molnet");
            std::fs::create_dir_all(&config_dir)?;

            let path = config_dir.join("config.toml");
            if path.exists() {
                println!("Configuration file already exists at: {}", path.display());
                return Ok(());
            }

            let toml_str = toml::to_string_pretty(&MolNetConfig::default())?;
            std::fs::write(&path, &toml_str)?;
            println!("Created default configuration at: {}", path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(Some(workspace), config_path)
                .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_registry(workspace: &Path, config_path: Option<&Path>) -> anyhow::Result<DatasetRegistry> {
    let config = load_config(Some(workspace), config_path)
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    let registry = DatasetRegistry::from_config(&config)?;
    tracing::debug!(datasets = registry.len(), "Registry ready");
    Ok(registry)
}

/// One line per dataset: name, task type, split, and task count.
fn render_list(
    registry: &DatasetRegistry,
    task_type: Option<TaskType>,
    split: Option<SplitStrategy>,
) -> String {
    let mut out = String::new();
    for (name, d) in registry.iter() {
        if task_type.is_some_and(|t| t != d.task_type) || split.is_some_and(|s| s != d.split) {
            continue;
        }
        let tasks = d
            .num_tasks()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "header".to_string());
        let _ = writeln!(
            out,
            "{:<16} {:<15} {:<11} {}",
            name, d.task_type, d.split, tasks
        );
    }
    out
}

fn render_descriptor(descriptor: &DatasetDescriptor, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(descriptor)?)
    } else {
        Ok(toml::to_string_pretty(descriptor)?)
    }
}

fn render_urls(descriptor: &DatasetDescriptor, subset: Option<&str>) -> anyhow::Result<String> {
    let mut out = String::new();
    for target in descriptor.url.resolve(subset)? {
        match target.partition {
            Some(partition) => writeln!(out, "{:<6} {}", partition.as_str(), target.url)?,
            None => writeln!(out, "{}", target.url)?,
        }
    }
    Ok(out)
}

/// Parse a comma-separated list of numbers; `nan` (any case) is a missing value.
fn parse_values(input: &str) -> anyhow::Result<Vec<f64>> {
    input
        .split(',')
        .map(str::trim)
        .map(|v| {
            if v.eq_ignore_ascii_case("nan") {
                Ok(f64::NAN)
            } else {
                v.parse::<f64>()
                    .map_err(|e| anyhow::anyhow!("Invalid number '{}': {}", v, e))
            }
        })
        .collect()
}

fn score(metric: &str, predictions: &str, targets: &str) -> anyhow::Result<f64> {
    let metric: Metric = metric.parse()?;
    let predictions = parse_values(predictions)?;
    let targets = parse_values(targets)?;
    Ok(metric.evaluate_column(&predictions, &targets)?)
}
