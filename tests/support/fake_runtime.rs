// ABOUTME: In-memory container engine implementing RuntimeClient.
// ABOUTME: Enforces unique names, allocates addresses and supports failure injection.

use async_trait::async_trait;
use dockhand::runtime::{
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerSpec,
    ContainerStatus, ContainerSummary, EndpointInfo, HostInfo, ImageError, ImageOps,
    NetworkConfig, NetworkError, NetworkOps, RemoveOptions, SystemError, SystemOps,
};
use dockhand::types::{ContainerId, ImageId, ImageRef, NetworkId};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Operations that can be made to fail or hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    HostInfo,
    FindNetwork,
    CreateNetwork,
    Pull,
    Create,
    Start,
    Inspect,
    List,
    Remove,
}

#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub id: ContainerId,
    pub name: String,
    pub hostname: String,
    pub labels: HashMap<String, String>,
    pub status: ContainerStatus,
    pub networks: HashMap<String, EndpointInfo>,
}

#[derive(Default)]
struct State {
    host: HostInfo,
    networks: Vec<(String, NetworkId)>,
    images: HashSet<String>,
    containers: Vec<FakeContainer>,
    specs: Vec<ContainerSpec>,
    removals: Vec<(ContainerId, RemoveOptions)>,
    calls: Vec<Op>,
    failing: HashSet<Op>,
    hanging: HashSet<Op>,
    next_network: u32,
}

#[derive(Default)]
pub struct FakeRuntime {
    state: Mutex<State>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(self, host: HostInfo) -> Self {
        self.state.lock().host = host;
        self
    }

    pub fn with_network(self, name: &str) -> Self {
        {
            let mut state = self.state.lock();
            let id = NetworkId::new(format!("{}-net-id", name));
            state.networks.push((name.to_string(), id));
        }
        self
    }

    /// Seed an image as already present locally, e.g. `base:latest`.
    pub fn with_image(self, image: &str) -> Self {
        self.state.lock().images.insert(image.to_string());
        self
    }

    pub fn failing(self, op: Op) -> Self {
        self.state.lock().failing.insert(op);
        self
    }

    pub fn hanging(self, op: Op) -> Self {
        self.state.lock().hanging.insert(op);
        self
    }

    /// Insert a container directly, bypassing create.
    pub fn add_container(&self, name: &str, status: ContainerStatus, endpoints: &[(&str, &str)]) {
        let networks = endpoints
            .iter()
            .map(|(network, ip)| {
                (
                    network.to_string(),
                    EndpointInfo {
                        network_id: format!("{}-net-id", network),
                        ip_address: ip.to_string(),
                    },
                )
            })
            .collect();
        self.state.lock().containers.push(FakeContainer {
            id: ContainerId::new(format!("{}-id", name)),
            name: name.to_string(),
            hostname: name.to_string(),
            labels: HashMap::new(),
            status,
            networks,
        });
    }

    pub fn calls(&self) -> Vec<Op> {
        self.state.lock().calls.clone()
    }

    pub fn specs(&self) -> Vec<ContainerSpec> {
        self.state.lock().specs.clone()
    }

    pub fn containers(&self) -> Vec<FakeContainer> {
        self.state.lock().containers.clone()
    }

    pub fn removals(&self) -> Vec<(ContainerId, RemoveOptions)> {
        self.state.lock().removals.clone()
    }

    pub fn network_names(&self) -> Vec<String> {
        self.state
            .lock()
            .networks
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn has_image(&self, image: &str) -> bool {
        self.state.lock().images.contains(image)
    }

    /// Record the call; report whether it should fail. Hanging calls never return.
    async fn enter(&self, op: Op) -> bool {
        let (fail, hang) = {
            let mut state = self.state.lock();
            state.calls.push(op);
            (state.failing.contains(&op), state.hanging.contains(&op))
        };
        if hang {
            std::future::pending::<()>().await;
        }
        fail
    }
}

#[async_trait]
impl SystemOps for FakeRuntime {
    async fn host_info(&self) -> Result<HostInfo, SystemError> {
        if self.enter(Op::HostInfo).await {
            return Err(SystemError::ConnectionFailed("info unavailable".to_string()));
        }
        Ok(self.state.lock().host.clone())
    }

    async fn ping(&self) -> Result<(), SystemError> {
        Ok(())
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        if self.enter(Op::Pull).await {
            return Err(ImageError::PullFailed(format!("{}: manifest unknown", reference)));
        }
        self.state.lock().images.insert(reference.to_string());
        Ok(())
    }

    async fn inspect_image(&self, reference: &ImageRef) -> Result<ImageId, ImageError> {
        let name = reference.to_string();
        if self.state.lock().images.contains(&name) {
            Ok(ImageId::new(format!("sha256:{}", name.len())))
        } else {
            Err(ImageError::NotFound(name))
        }
    }
}

#[async_trait]
impl NetworkOps for FakeRuntime {
    async fn find_network(&self, name: &str) -> Result<Option<NetworkId>, NetworkError> {
        if self.enter(Op::FindNetwork).await {
            return Err(NetworkError::Runtime("network lookup failed".to_string()));
        }
        Ok(self
            .state
            .lock()
            .networks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| id.clone()))
    }

    async fn create_network(&self, config: &NetworkConfig) -> Result<NetworkId, NetworkError> {
        if self.enter(Op::CreateNetwork).await {
            return Err(NetworkError::Runtime("network create failed".to_string()));
        }
        let mut state = self.state.lock();
        if state.networks.iter().any(|(n, _)| *n == config.name) {
            return Err(NetworkError::AlreadyExists(config.name.clone()));
        }
        state.next_network += 1;
        let id = NetworkId::new(format!("created-net-{}", state.next_network));
        state.networks.push((config.name.clone(), id.clone()));
        Ok(id)
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        let mut state = self.state.lock();
        let before = state.networks.len();
        state.networks.retain(|(_, existing)| existing != id);
        if state.networks.len() == before {
            return Err(NetworkError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        if self.enter(Op::Create).await {
            return Err(ContainerError::Runtime("create failed".to_string()));
        }
        let mut state = self.state.lock();
        state.specs.push(spec.clone());

        if state.containers.iter().any(|c| c.name == spec.name) {
            return Err(ContainerError::Conflict(format!(
                "the container name \"/{}\" is already in use",
                spec.name
            )));
        }
        if !state.images.contains(&spec.image.to_string()) {
            return Err(ContainerError::ImageNotFound(spec.image.to_string()));
        }

        let mut networks = HashMap::new();
        if let Some(endpoint) = &spec.endpoint {
            let attached = state
                .containers
                .iter()
                .filter(|c| c.networks.contains_key(&endpoint.network_name))
                .count();
            networks.insert(
                endpoint.network_name.clone(),
                EndpointInfo {
                    network_id: endpoint.network_id.to_string(),
                    ip_address: format!("172.18.0.{}", attached + 2),
                },
            );
        }

        let id = ContainerId::new(format!("{}-id", spec.name));
        state.containers.push(FakeContainer {
            id: id.clone(),
            name: spec.name.clone(),
            hostname: spec.hostname.clone(),
            labels: spec.labels.clone(),
            status: ContainerStatus::Created,
            networks,
        });
        Ok(id)
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        if self.enter(Op::Start).await {
            return Err(ContainerError::Runtime("OCI runtime create failed".to_string()));
        }
        let mut state = self.state.lock();
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))?;
        container.status = ContainerStatus::Running;
        Ok(())
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        if self.enter(Op::Inspect).await {
            return Err(ContainerError::Runtime("inspect failed".to_string()));
        }
        let state = self.state.lock();
        let c = state
            .containers
            .iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| ContainerError::NotFound(id.to_string()))?;
        Ok(ContainerDetails {
            id: c.id.clone(),
            name: c.name.clone(),
            hostname: c.hostname.clone(),
            labels: c.labels.clone(),
            status: c.status,
            networks: c.networks.clone(),
        })
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        if self.enter(Op::List).await {
            return Err(ContainerError::Runtime("list failed".to_string()));
        }
        Ok(self
            .state
            .lock()
            .containers
            .iter()
            .filter(|c| filters.all || c.status == ContainerStatus::Running)
            .map(|c| ContainerSummary {
                id: c.id.clone(),
                name: c.name.clone(),
                networks: c.networks.clone(),
            })
            .collect())
    }

    async fn remove_container(
        &self,
        id: &ContainerId,
        opts: RemoveOptions,
    ) -> Result<(), ContainerError> {
        if self.enter(Op::Remove).await {
            return Err(ContainerError::Runtime("remove failed".to_string()));
        }
        let mut state = self.state.lock();
        let before = state.containers.len();
        state.containers.retain(|c| c.id != *id);
        if state.containers.len() == before {
            return Err(ContainerError::NotFound(format!("no such container: {}", id)));
        }
        state.removals.push((id.clone(), opts));
        Ok(())
    }
}
