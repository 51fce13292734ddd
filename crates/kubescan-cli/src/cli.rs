//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// kubescan - Kubernetes workload issue scanner.
#[derive(Parser, Debug, Clone)]
#[command(name = "kubescan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Console output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Directory reports are written to and read from.
    #[arg(short, long, default_value = ".reports")]
    pub outdir: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan cluster workloads for issues.
    Scan(ScanArgs),

    /// List all report snapshots in the reports directory.
    History,

    /// Compare two report snapshots.
    Diff(DiffArgs),

    /// Delete evicted pods and completed jobs.
    Clean(CleanArgs),
}

/// Arguments for the scan command.
#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// Namespace(s) to scan (comma-separated), or all namespaces when empty.
    #[arg(short, long, value_delimiter = ',')]
    pub namespace: Vec<String>,

    /// Namespaces to exclude from the scan (comma-separated).
    #[arg(long = "ignore-ns", value_delimiter = ',')]
    pub ignore_ns: Vec<String>,

    /// Restart count at or above which a workload is flagged.
    #[arg(long, default_value_t = 10)]
    pub restart_threshold: i32,

    /// Path to a kubeconfig file (defaults to the standard discovery chain).
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Report file(s) to export: csv,md,html,json (comma-separated).
    #[arg(short, long)]
    pub export: Option<String>,

    /// Cluster name prefix for report files (auto-detected when omitted).
    #[arg(long)]
    pub cluster_name: Option<String>,

    /// Print only the number of issues found.
    #[arg(long)]
    pub count: bool,

    /// Write Prometheus text-format metrics for this scan to a file.
    #[arg(long)]
    pub metrics_file: Option<PathBuf>,
}

/// Arguments for the diff command.
#[derive(Parser, Debug, Clone)]
pub struct DiffArgs {
    /// Older snapshot: a path, file name, or timestamp like 20260823-153000.
    pub old: String,

    /// Newer snapshot: a path, file name, or timestamp.
    pub new: String,
}

/// Arguments for the clean command.
#[derive(Parser, Debug, Clone)]
pub struct CleanArgs {
    /// Namespace(s) to clean (comma-separated), or all namespaces when empty.
    #[arg(short, long, value_delimiter = ',')]
    pub namespace: Vec<String>,

    /// Namespaces to exclude from cleanup (comma-separated).
    #[arg(long = "ignore-ns", value_delimiter = ',')]
    pub ignore_ns: Vec<String>,

    /// Path to a kubeconfig file.
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Report what would be deleted without deleting anything.
    #[arg(long)]
    pub dry_run: bool,
}
