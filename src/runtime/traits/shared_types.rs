// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: ContainerSpec, ContainerDetails, MountSpec, HostInfo, NetworkConfig.

use crate::policy::{LaunchPolicy, UsernsMode};
use crate::types::{ContainerId, ImageRef, NetworkId};
use std::collections::HashMap;

/// A fully composed container creation call.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    /// Name for the container.
    pub name: String,
    /// Image to run.
    pub image: ImageRef,
    /// Hostname inside the container.
    pub hostname: String,
    /// Labels to apply.
    pub labels: HashMap<String, String>,
    /// Allocate a TTY.
    pub tty: bool,
    /// Attach stdin.
    pub attach_stdin: bool,
    /// Attach stdout.
    pub attach_stdout: bool,
    /// Attach stderr.
    pub attach_stderr: bool,
    /// Mounts, in the order they are applied.
    pub mounts: Vec<MountSpec>,
    /// Network endpoint to bind at creation.
    pub endpoint: Option<EndpointBinding>,
    /// User namespace mode.
    pub userns_mode: UsernsMode,
    /// Security, cgroup, init and restart settings.
    pub policy: LaunchPolicy,
}

/// Binds a container to a network endpoint at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointBinding {
    /// Network name, used as the endpoint key.
    pub network_name: String,
    /// Resolved network ID.
    pub network_id: NetworkId,
}

/// Kind of mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountKind {
    Bind,
    Volume,
    Tmpfs,
}

/// A mount applied to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub kind: MountKind,
    /// Host path or volume name. `None` for tmpfs and anonymous volumes.
    pub source: Option<String>,
    /// Path inside the container.
    pub destination: String,
    pub read_only: bool,
}

impl MountSpec {
    /// Bind-mount a host path.
    pub fn bind(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            kind: MountKind::Bind,
            source: Some(source.into()),
            destination: destination.into(),
            read_only: false,
        }
    }

    /// Anonymous volume, removed along with the container.
    pub fn anonymous_volume(destination: impl Into<String>) -> Self {
        Self {
            kind: MountKind::Volume,
            source: None,
            destination: destination.into(),
            read_only: false,
        }
    }

    pub fn tmpfs(destination: impl Into<String>) -> Self {
        Self {
            kind: MountKind::Tmpfs,
            source: None,
            destination: destination.into(),
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// Container lifecycle status as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

/// Inspect result for a single container.
#[derive(Debug, Clone)]
pub struct ContainerDetails {
    /// Container ID.
    pub id: ContainerId,
    /// Container name, without the leading slash.
    pub name: String,
    /// Hostname inside the container.
    pub hostname: String,
    /// Labels.
    pub labels: HashMap<String, String>,
    /// Current status.
    pub status: ContainerStatus,
    /// Endpoints by network name.
    pub networks: HashMap<String, EndpointInfo>,
}

/// Listing entry for a container.
#[derive(Debug, Clone)]
pub struct ContainerSummary {
    /// Container ID.
    pub id: ContainerId,
    /// Container name, without the leading slash.
    pub name: String,
    /// Endpoints by network name.
    pub networks: HashMap<String, EndpointInfo>,
}

/// A container's endpoint on one network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointInfo {
    /// Network ID.
    pub network_id: String,
    /// Assigned address; empty while the container is stopped.
    pub ip_address: String,
}

/// Options for container removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// Kill the container first if running.
    pub force: bool,
    /// Also remove anonymous volumes.
    pub volumes: bool,
}

/// Configuration for creating a network.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name.
    pub name: String,
    /// Network driver (bridge, overlay, etc.).
    pub driver: Option<String>,
    /// Labels.
    pub labels: HashMap<String, String>,
}

/// Raw host system information, as the daemon reports it.
#[derive(Debug, Clone, Default)]
pub struct HostInfo {
    pub cgroup_driver: String,
    pub cgroup_version: String,
    pub storage_driver: String,
    pub security_options: Vec<String>,
    pub memory_limit: bool,
    pub pids_limit: bool,
    pub cpu_shares: bool,
    pub cpu_count: i64,
}
