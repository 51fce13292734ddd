//! Error types for the scan pipeline.

use thiserror::Error;

/// Errors surfaced by the scan pipeline and its data sources.
///
/// Only workload listing is a hard failure; per-namespace event listing
/// errors are absorbed by the event index build and never reach the caller.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The workload source failed to list workloads. The scan cannot proceed.
    #[error("workload listing failed: {reason}")]
    WorkloadList {
        /// Why the listing failed.
        reason: String,
    },

    /// The event source failed to list events for one namespace.
    #[error("event listing failed in namespace {namespace}: {reason}")]
    EventList {
        /// Namespace whose events could not be listed.
        namespace: String,
        /// Why the listing failed.
        reason: String,
    },
}

/// Result type for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
