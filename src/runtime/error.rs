// ABOUTME: Runtime error types with SNAFU pattern.
// ABOUTME: Unifies endpoint detection and connection errors for programmatic handling.

use snafu::Snafu;

use super::detection::DetectionError;
use super::traits::SystemError;

/// Failure to open the runtime client handle.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RuntimeError {
    #[snafu(display("runtime detection failed: {source}"))]
    Detection { source: DetectionError },

    #[snafu(display("runtime connection failed: {source}"))]
    Connection { source: SystemError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    /// No container runtime found on the system.
    NoRuntimeFound,
    /// Failed to reach the runtime endpoint.
    ConnectionFailed,
    /// The connect attempt was cancelled or timed out.
    Interrupted,
    /// Runtime operation error.
    RuntimeOperation,
}

impl RuntimeError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RuntimeErrorKind {
        match self {
            RuntimeError::Detection {
                source: DetectionError::NoRuntimeFound,
            } => RuntimeErrorKind::NoRuntimeFound,
            RuntimeError::Connection { source } => match source {
                SystemError::ConnectionFailed(_) => RuntimeErrorKind::ConnectionFailed,
                SystemError::Interrupted(_) => RuntimeErrorKind::Interrupted,
                SystemError::Runtime(_) => RuntimeErrorKind::RuntimeOperation,
            },
        }
    }

    /// Returns connection error details if this is a connection failure.
    pub fn connection_details(&self) -> Option<&str> {
        match self {
            RuntimeError::Connection {
                source: SystemError::ConnectionFailed(msg),
            } => Some(msg),
            _ => None,
        }
    }
}
