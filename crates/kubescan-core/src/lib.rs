//! # kubescan-core
//!
//! Issue detection pipeline for Kubernetes workloads.
//!
//! The pipeline consumes a workload source and an event source, derives a
//! normalized status per workload, correlates it with the latest cluster
//! event, classifies anomalous conditions into severity-tagged issues,
//! deduplicates to one issue per workload, and aggregates per-namespace
//! severity counts.
//!
//! ## Quick Start
//!
//! ```rust
//! use kubescan_core::{Classifier, EventIndex, ScanConfig, Workload, ContainerState, ContainerStatus};
//! use kubescan_core::{scan_and_deduplicate, summarize_by_namespace};
//!
//! # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
//! let workloads = vec![Workload {
//!     namespace: "default".into(),
//!     name: "web-0".into(),
//!     phase: "Running".into(),
//!     reason: String::new(),
//!     node_name: "node-1".into(),
//!     containers: vec![ContainerStatus {
//!         name: "web".into(),
//!         restart_count: 3,
//!         state: ContainerState::Waiting { reason: "CrashLoopBackOff".into() },
//!     }],
//! }];
//!
//! let classifier = Classifier::default();
//! let issues = scan_and_deduplicate(
//!     workloads,
//!     &ScanConfig::new(10),
//!     &EventIndex::empty(),
//!     &classifier,
//! ).await;
//!
//! assert_eq!(issues.len(), 1);
//! let summary = summarize_by_namespace(&issues);
//! assert_eq!(summary["default"].high, 1);
//! # });
//! ```

pub mod classify;
pub mod error;
pub mod events;
pub mod scanner;
pub mod source;
pub mod status;
pub mod summary;
pub mod types;

// Re-export the pipeline surface for convenience.
pub use classify::{
    Classifier, HIGH_RESTART_REASON, HIGH_RESTART_ROOT_CAUSE, UNKNOWN_ROOT_CAUSE,
};
pub use error::{Result, ScanError};
pub use events::EventIndex;
pub use scanner::{
    DEFAULT_MAX_CONCURRENCY, ScanConfig, WORKLOAD_KIND, deduplicate, scan, scan_and_deduplicate,
};
pub use source::{EventSource, WorkloadSource};
pub use status::workload_status;
pub use summary::summarize_by_namespace;
pub use types::{
    ClusterEvent, ContainerState, ContainerStatus, Issue, Severity, SeveritySummary, Workload,
};
