// ABOUTME: Error taxonomy for provider operations.
// ABOUTME: One variant per failure point, each wrapping the runtime's own error.

use crate::runtime::{ContainerError, ImageError, NetworkError, SystemError};
use crate::types::ContainerId;

/// Errors returned by [`ContainerProvider`](super::ContainerProvider).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("invalid creation request: {0}")]
    InvalidRequest(String),

    #[error("failed to resolve network {network}: {source}")]
    NetworkResolution {
        network: String,
        source: NetworkError,
    },

    #[error("failed to fetch image {image}: {source}")]
    ImageFetch { image: String, source: ImageError },

    #[error("failed to create container {name}: {source}")]
    Creation {
        name: String,
        source: ContainerError,
    },

    /// The container exists but did not start. Whether it is still there
    /// depends on the provider's start-failure policy.
    #[error("failed to start container {id}: {source}")]
    Start {
        id: ContainerId,
        source: ContainerError,
    },

    #[error("container not found: {id}")]
    NotFound { id: String, source: ContainerError },

    #[error("failed to query containers: {source}")]
    ContainerQuery { source: ContainerError },

    #[error("failed to query host info: {source}")]
    HostQuery { source: SystemError },

    #[error("failed to remove container {id}: {source}")]
    Removal { id: String, source: ContainerError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    NetworkResolution,
    ImageFetch,
    /// A container with the requested name already exists.
    Conflict,
    Creation,
    Start,
    NotFound,
    Query,
    Removal,
}

impl ProviderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ProviderError::NetworkResolution { .. } => ErrorKind::NetworkResolution,
            ProviderError::ImageFetch { .. } => ErrorKind::ImageFetch,
            ProviderError::Creation {
                source: ContainerError::Conflict(_),
                ..
            } => ErrorKind::Conflict,
            ProviderError::Creation { .. } => ErrorKind::Creation,
            ProviderError::Start { .. } => ErrorKind::Start,
            ProviderError::NotFound { .. } => ErrorKind::NotFound,
            ProviderError::ContainerQuery { .. } | ProviderError::HostQuery { .. } => {
                ErrorKind::Query
            }
            ProviderError::Removal { .. } => ErrorKind::Removal,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }

    /// True when the call was cut short by cancellation or the call deadline.
    pub fn is_interrupted(&self) -> bool {
        match self {
            ProviderError::InvalidRequest(_) => false,
            ProviderError::NetworkResolution { source, .. } => {
                matches!(source, NetworkError::Interrupted(_))
            }
            ProviderError::ImageFetch { source, .. } => matches!(source, ImageError::Interrupted(_)),
            ProviderError::HostQuery { source } => matches!(source, SystemError::Interrupted(_)),
            ProviderError::Creation { source, .. }
            | ProviderError::Start { source, .. }
            | ProviderError::NotFound { source, .. }
            | ProviderError::ContainerQuery { source }
            | ProviderError::Removal { source, .. } => {
                matches!(source, ContainerError::Interrupted(_))
            }
        }
    }

    /// Classify an inspect failure for `id`.
    pub(crate) fn inspect(id: &ContainerId, source: ContainerError) -> Self {
        match source {
            ContainerError::NotFound(_) => ProviderError::NotFound {
                id: id.to_string(),
                source,
            },
            source => ProviderError::ContainerQuery { source },
        }
    }

    /// Classify a removal failure for `id`.
    pub(crate) fn removal(id: &ContainerId, source: ContainerError) -> Self {
        match source {
            ContainerError::NotFound(_) => ProviderError::NotFound {
                id: id.to_string(),
                source,
            },
            source => ProviderError::Removal {
                id: id.to_string(),
                source,
            },
        }
    }
}
