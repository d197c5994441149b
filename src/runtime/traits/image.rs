// ABOUTME: Image operations trait for container runtimes.
// ABOUTME: Pull an image and resolve its local image ID.

use crate::runtime::context::Interrupted;
use crate::types::{ImageId, ImageRef};
use async_trait::async_trait;

/// Image operations: pull, inspect.
#[async_trait]
pub trait ImageOps: Send + Sync {
    /// Pull an image, waiting for the transfer to finish.
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError>;

    /// Resolve the local image ID for a reference.
    async fn inspect_image(&self, reference: &ImageRef) -> Result<ImageId, ImageError>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    #[error("runtime error: {0}")]
    Runtime(String),
}
