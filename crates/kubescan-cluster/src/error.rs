//! Error types for cluster access.

use thiserror::Error;

/// Errors that can occur while talking to the Kubernetes API.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// A Kubernetes API call failed.
    #[error("kubernetes api error: {0}")]
    Api(#[from] kube::Error),

    /// The kubeconfig could not be read or interpreted.
    #[error("kubeconfig error: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),
}

/// Result type for cluster operations.
pub type Result<T> = std::result::Result<T, ClusterError>;
