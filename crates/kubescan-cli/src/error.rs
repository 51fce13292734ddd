//! CLI error types.

use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The scan pipeline failed.
    #[error(transparent)]
    Scan(#[from] kubescan_core::ScanError),

    /// Report persistence or comparison failed.
    #[error(transparent)]
    Report(#[from] kubescan_report::ReportError),

    /// Cluster access failed.
    #[error(transparent)]
    Cluster(#[from] kubescan_cluster::ClusterError),

    /// Writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be formatted.
    #[error("format error: {0}")]
    Format(String),
}

/// Result type for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
