// ABOUTME: Network operations trait for container runtimes.
// ABOUTME: Look up, create and remove named networks.

use crate::runtime::context::Interrupted;
use super::shared_types::NetworkConfig;
use crate::types::NetworkId;
use async_trait::async_trait;

/// Network operations: find, create, remove.
#[async_trait]
pub trait NetworkOps: Send + Sync {
    /// Look up a network by name. `None` when it does not exist.
    async fn find_network(&self, name: &str) -> Result<Option<NetworkId>, NetworkError>;

    /// Create a network.
    async fn create_network(&self, config: &NetworkConfig) -> Result<NetworkId, NetworkError>;

    /// Remove a network.
    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError>;
}

/// Errors from network operations.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("network not found: {0}")]
    NotFound(String),

    #[error("network already exists: {0}")]
    AlreadyExists(String),

    #[error("network in use, cannot remove: {0}")]
    InUse(String),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    #[error("runtime error: {0}")]
    Runtime(String),
}
