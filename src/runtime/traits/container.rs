// ABOUTME: Container operations trait for container runtimes.
// ABOUTME: Create, start, inspect, list and remove containers.

use crate::runtime::context::Interrupted;
use super::shared_types::{ContainerDetails, ContainerSpec, ContainerSummary, RemoveOptions};
use crate::types::ContainerId;
use async_trait::async_trait;

/// Container lifecycle operations.
#[async_trait]
pub trait ContainerOps: Send + Sync {
    /// Create a container from a composed spec.
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError>;

    /// Start a created container.
    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError>;

    /// Get detailed information about a container.
    async fn inspect_container(&self, id: &ContainerId)
    -> Result<ContainerDetails, ContainerError>;

    /// List containers matching the given filters, in engine order.
    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError>;

    /// Remove a container.
    async fn remove_container(
        &self,
        id: &ContainerId,
        opts: RemoveOptions,
    ) -> Result<(), ContainerError>;
}

/// Filters for listing containers.
#[derive(Debug, Clone, Default)]
pub struct ContainerFilters {
    /// Include stopped containers.
    pub all: bool,
}

/// Errors from container operations.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("container not found: {0}")]
    NotFound(String),

    #[error("container name conflict: {0}")]
    Conflict(String),

    #[error("image not found: {0}")]
    ImageNotFound(String),

    #[error("container already running: {0}")]
    AlreadyRunning(String),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    #[error("runtime error: {0}")]
    Runtime(String),
}
