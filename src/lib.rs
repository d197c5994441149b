// ABOUTME: Library root for dockhand - privileged node containers on Docker-compatible runtimes.
// ABOUTME: The provider is the entry point; runtime exposes the client handle contract.

pub mod config;
pub mod error;
pub mod policy;
pub mod provider;
pub mod runtime;
pub mod types;

pub use provider::{ContainerProvider, CreationRequest, ProviderError};
