// ABOUTME: System info trait for container runtimes.
// ABOUTME: Query host configuration and check daemon connectivity.

use crate::runtime::context::Interrupted;
use super::shared_types::HostInfo;
use async_trait::async_trait;

/// Host-level queries against the daemon.
#[async_trait]
pub trait SystemOps: Send + Sync {
    /// Get the daemon's host system information.
    async fn host_info(&self) -> Result<HostInfo, SystemError>;

    /// Ping the daemon to check connectivity.
    async fn ping(&self) -> Result<(), SystemError>;
}

/// Errors from system queries.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error(transparent)]
    Interrupted(#[from] Interrupted),

    #[error("runtime error: {0}")]
    Runtime(String),
}
