//! Kubernetes-backed sources for the kubescan pipeline.
//!
//! Connects to a cluster, adapts pods and events into the core's workload
//! and event views, and provides cleanup of evicted and completed pods.

pub mod clean;
pub mod client;
pub mod error;
pub mod source;

pub use clean::{clean_workloads, CleanOutcome, CleanedPod};
pub use client::{connect, current_context, sanitize_cluster_name};
pub use error::{ClusterError, Result};
pub use source::ClusterSource;
