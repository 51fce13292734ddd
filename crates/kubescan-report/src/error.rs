//! Error types for report persistence and export.

use thiserror::Error;

/// Errors that can occur while persisting, loading or exporting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot JSON could not be serialized or parsed.
    #[error("snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// No snapshot matched the given timestamp, file name or path.
    #[error("no snapshot found for '{spec}'")]
    SnapshotNotFound {
        /// The timestamp, file name or path that did not resolve.
        spec: String,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
