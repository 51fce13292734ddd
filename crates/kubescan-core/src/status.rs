//! Normalized status extraction for a single workload.

use crate::types::{ContainerState, Workload};

/// Derives a normalized status string for one workload.
///
/// Priority order: a non-empty phase is returned verbatim; otherwise the
/// first waiting container's reason; otherwise the first terminated
/// container's reason; otherwise `"Unknown"`.
#[must_use]
pub fn workload_status(workload: &Workload) -> String {
    if !workload.phase.is_empty() {
        return workload.phase.clone();
    }

    for container in &workload.containers {
        if let ContainerState::Waiting { reason } = &container.state {
            return reason.clone();
        }
    }

    for container in &workload.containers {
        if let ContainerState::Terminated { reason } = &container.state {
            return reason.clone();
        }
    }

    "Unknown".to_string()
}
