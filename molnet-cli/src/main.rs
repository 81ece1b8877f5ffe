//! MolNet CLI: inspect the dataset registry and score predictions.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// MolNet: MoleculeNet benchmark dataset registry
#[derive(Parser, Debug)]
#[command(name = "molnet", version, about, long_about = None)]
struct Cli {
    /// Workspace directory
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List registered datasets
    List {
        /// Only datasets of this task type (classification, regression, mix)
        #[arg(long)]
        task_type: Option<String>,
        /// Only datasets using this split (random, scaffold, stratified, time)
        #[arg(long)]
        split: Option<String>,
    },
    /// Show the full descriptor of a dataset
    Show {
        /// Dataset name (case-sensitive)
        name: String,
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Print the download URLs of a dataset
    Urls {
        /// Dataset name (case-sensitive)
        name: String,
        /// Subset to resolve (pdbbind datasets)
        #[arg(short, long)]
        subset: Option<String>,
    },
    /// Build the registry, including extra descriptors, and report problems
    Validate,
    /// Evaluate a metric over one task column
    Score {
        /// Metric name (mae, rmse, r2, roc_auc, prc_auc, binary_accuracy)
        metric: String,
        /// Comma-separated predictions
        #[arg(short, long)]
        predictions: String,
        /// Comma-separated targets; `nan` marks a missing label
        #[arg(short, long)]
        targets: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Create a default .molnet/config.toml in the workspace
    Init,
    /// Show the effective configuration
    Show,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "molnet", "molnet")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "molnet.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    commands::handle_command(cli.command, &workspace, cli.config.as_deref())
}
