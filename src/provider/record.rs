// ABOUTME: Value snapshots returned by provider queries.
// ABOUTME: ContainerRecord for a single container, HostCapabilities for the daemon.

use crate::runtime::{ContainerDetails, ContainerStatus};
use crate::types::ContainerId;
use serde::Serialize;
use std::collections::HashMap;
use std::net::IpAddr;

/// A container as the runtime reported it at query time.
///
/// Goes stale immediately; query again for fresh state.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerRecord {
    pub id: ContainerId,
    pub name: String,
    /// Address on the queried network. `None` when the container is not
    /// attached there or has no address yet.
    pub ip_address: Option<IpAddr>,
    pub hostname: String,
    pub labels: HashMap<String, String>,
    pub status: ContainerStatus,
}

/// Whether a queried container is attached to the requested network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    Attached(IpAddr),
    Missing,
}

impl ContainerRecord {
    pub(crate) fn from_details(details: ContainerDetails, network: &str) -> Self {
        let ip_address = details
            .networks
            .get(network)
            .and_then(|endpoint| endpoint.ip_address.parse().ok());

        Self {
            id: details.id,
            name: details.name,
            ip_address,
            hostname: details.hostname,
            labels: details.labels,
            status: details.status,
        }
    }

    pub fn attachment(&self) -> Attachment {
        match self.ip_address {
            Some(ip) => Attachment::Attached(ip),
            None => Attachment::Missing,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ContainerStatus::Running
    }
}

/// Host configuration relevant to resource accounting and isolation.
///
/// The resource fields are only populated when the daemon's cgroup driver
/// enforces limits; with the `none` driver they stay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostCapabilities {
    pub cgroup_driver: String,
    pub cgroup_version: String,
    pub storage_driver: String,
    pub security_options: Vec<String>,
    pub memory_limit: bool,
    pub pids_limit: bool,
    pub cpu_shares: bool,
    pub cpu_count: i64,
}
