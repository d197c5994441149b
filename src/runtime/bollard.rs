// ABOUTME: Bollard-based runtime client handle.
// ABOUTME: Speaks the Docker-compatible API to Docker or Podman daemons.

use crate::policy::{CgroupnsMode, RestartPolicy as PolicyRestart};
use crate::runtime::detection::resolve_endpoint;
use crate::runtime::error::{ConnectionSnafu, DetectionSnafu, RuntimeError};
use crate::runtime::traits::{
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerSpec,
    ContainerStatus, ContainerSummary, EndpointInfo, HostInfo, ImageError, ImageOps, MountKind,
    MountSpec, NetworkConfig, NetworkError, NetworkOps, RemoveOptions, SystemError, SystemOps,
};
use crate::runtime::types::{Endpoint, RuntimeConfig};
use crate::types::{ContainerId, ImageId, ImageRef, NetworkId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::models::{
    ContainerCreateBody, ContainerStateStatusEnum, EndpointSettings, HostConfig,
    HostConfigCgroupnsModeEnum, Mount, MountTypeEnum, NetworkingConfig, RestartPolicy,
    RestartPolicyNameEnum,
};
use bollard::query_parameters::{
    CreateContainerOptions, CreateImageOptions, InspectContainerOptions, InspectNetworkOptions,
    ListContainersOptions, RemoveContainerOptions, StartContainerOptions,
};
use futures::StreamExt;
use snafu::ResultExt;
use std::collections::HashMap;
use std::time::Duration;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_system_error(e: bollard::errors::Error) -> SystemError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } => SystemError::Runtime(format!("daemon returned {}: {}", status_code, message)),
        _ => SystemError::ConnectionFailed(e.to_string()),
    }
}

fn map_image_pull_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    ImageError::PullFailed(format!("{}: {}", image_name, e))
}

fn map_image_inspect_error(e: bollard::errors::Error, image_name: &str) -> ImageError {
    match &e {
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            ImageError::NotFound(image_name.to_string())
        }
        _ => ImageError::Runtime(format!("failed to inspect {}: {}", image_name, e)),
    }
}

fn map_container_create_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::ImageNotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ContainerError::Conflict(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_start_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 304 => ContainerError::AlreadyRunning(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_network_create_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => NetworkError::AlreadyExists(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

fn map_network_remove_error(e: bollard::errors::Error) -> NetworkError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => NetworkError::NotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 403 => NetworkError::InUse(message.clone()),
        _ => NetworkError::Runtime(e.to_string()),
    }
}

// =============================================================================
// Model Conversions
// =============================================================================

fn to_bollard_mount(spec: &MountSpec) -> Mount {
    Mount {
        typ: Some(match spec.kind {
            MountKind::Bind => MountTypeEnum::BIND,
            MountKind::Volume => MountTypeEnum::VOLUME,
            MountKind::Tmpfs => MountTypeEnum::TMPFS,
        }),
        source: spec.source.clone(),
        target: Some(spec.destination.clone()),
        read_only: Some(spec.read_only),
        ..Default::default()
    }
}

fn to_bollard_restart(policy: &PolicyRestart) -> RestartPolicy {
    RestartPolicy {
        name: Some(match policy {
            PolicyRestart::No => RestartPolicyNameEnum::NO,
            PolicyRestart::Always => RestartPolicyNameEnum::ALWAYS,
            PolicyRestart::UnlessStopped => RestartPolicyNameEnum::UNLESS_STOPPED,
            PolicyRestart::OnFailure { .. } => RestartPolicyNameEnum::ON_FAILURE,
        }),
        maximum_retry_count: policy.maximum_retry_count(),
    }
}

fn to_status(status: Option<ContainerStateStatusEnum>) -> ContainerStatus {
    match status {
        Some(ContainerStateStatusEnum::CREATED) => ContainerStatus::Created,
        Some(ContainerStateStatusEnum::RUNNING) => ContainerStatus::Running,
        Some(ContainerStateStatusEnum::PAUSED) => ContainerStatus::Paused,
        Some(ContainerStateStatusEnum::RESTARTING) => ContainerStatus::Restarting,
        Some(ContainerStateStatusEnum::REMOVING) => ContainerStatus::Removing,
        Some(ContainerStateStatusEnum::EXITED) => ContainerStatus::Exited,
        Some(ContainerStateStatusEnum::DEAD) => ContainerStatus::Dead,
        _ => ContainerStatus::Unknown,
    }
}

fn to_endpoints(networks: Option<HashMap<String, EndpointSettings>>) -> HashMap<String, EndpointInfo> {
    networks
        .unwrap_or_default()
        .into_iter()
        .map(|(name, endpoint)| {
            (
                name,
                EndpointInfo {
                    network_id: endpoint.network_id.unwrap_or_default(),
                    ip_address: endpoint.ip_address.unwrap_or_default(),
                },
            )
        })
        .collect()
}

fn trim_name(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

// =============================================================================
// BollardClient
// =============================================================================

/// Runtime client handle backed by bollard.
///
/// Cheap to share: bollard's `Docker` is a pooled client safe for concurrent
/// requests.
pub struct BollardClient {
    client: Docker,
    endpoint: Endpoint,
}

impl BollardClient {
    /// Wrap an already configured bollard client.
    pub fn new(client: Docker, endpoint: Endpoint) -> Self {
        Self { client, endpoint }
    }

    /// Open a client for an endpoint without contacting the daemon.
    pub fn open(endpoint: Endpoint, timeout: Duration) -> Result<Self, SystemError> {
        let client = match &endpoint {
            Endpoint::Socket(info) => Docker::connect_with_unix(
                &info.socket_path,
                timeout.as_secs(),
                bollard::API_DEFAULT_VERSION,
            ),
            Endpoint::Environment => {
                Docker::connect_with_defaults().map(|client| client.with_timeout(timeout))
            }
        }
        .map_err(|e| SystemError::ConnectionFailed(e.to_string()))?;

        Ok(Self::new(client, endpoint))
    }

    /// Downgrade the client's API version to what the daemon supports.
    pub async fn negotiate_version(self) -> Result<Self, SystemError> {
        let Self { client, endpoint } = self;
        let client = client
            .negotiate_version()
            .await
            .map_err(|e| SystemError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

/// Resolve the endpoint, open a client and negotiate the API version.
pub async fn connect(
    config: &RuntimeConfig,
    timeout: Duration,
) -> Result<BollardClient, RuntimeError> {
    let endpoint = resolve_endpoint(config).context(DetectionSnafu)?;
    tracing::debug!(?endpoint, "connecting to container runtime");

    let client = BollardClient::open(endpoint, timeout).context(ConnectionSnafu)?;
    client.negotiate_version().await.context(ConnectionSnafu)
}

#[async_trait]
impl SystemOps for BollardClient {
    async fn host_info(&self) -> Result<HostInfo, SystemError> {
        let info = self
            .client
            .info()
            .await
            .map_err(map_system_error)?;

        Ok(HostInfo {
            cgroup_driver: info
                .cgroup_driver
                .map(|d| d.to_string())
                .unwrap_or_default(),
            cgroup_version: info
                .cgroup_version
                .map(|v| v.to_string())
                .unwrap_or_default(),
            storage_driver: info.driver.unwrap_or_default(),
            security_options: info.security_options.unwrap_or_default(),
            memory_limit: info.memory_limit.unwrap_or(false),
            pids_limit: info.pids_limit.unwrap_or(false),
            cpu_shares: info.cpu_shares.unwrap_or(false),
            cpu_count: info.ncpu.unwrap_or(0),
        })
    }

    async fn ping(&self) -> Result<(), SystemError> {
        self.client
            .ping()
            .await
            .map_err(|e| SystemError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ImageOps for BollardClient {
    async fn pull_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        let image_name = reference.to_string();

        let opts = CreateImageOptions {
            from_image: Some(image_name.clone()),
            ..Default::default()
        };

        // Pull returns a stream of progress updates - consume it
        let mut stream = self.client.create_image(Some(opts), None, None);
        while let Some(result) = stream.next().await {
            result.map_err(|e| map_image_pull_error(e, &image_name))?;
        }

        Ok(())
    }

    async fn inspect_image(&self, reference: &ImageRef) -> Result<ImageId, ImageError> {
        let image_name = reference.to_string();

        let details = self
            .client
            .inspect_image(&image_name)
            .await
            .map_err(|e| map_image_inspect_error(e, &image_name))?;

        details
            .id
            .filter(|id| !id.is_empty())
            .map(ImageId::new)
            .ok_or_else(|| ImageError::Runtime(format!("{} has no image id", image_name)))
    }
}

#[async_trait]
impl NetworkOps for BollardClient {
    async fn find_network(&self, name: &str) -> Result<Option<NetworkId>, NetworkError> {
        match self
            .client
            .inspect_network(name, None::<InspectNetworkOptions>)
            .await
        {
            Ok(network) => network
                .id
                .filter(|id| !id.is_empty())
                .map(|id| Some(NetworkId::new(id)))
                .ok_or_else(|| NetworkError::Runtime(format!("network {} has no id", name))),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => Ok(None),
            Err(e) => Err(NetworkError::Runtime(e.to_string())),
        }
    }

    async fn create_network(&self, config: &NetworkConfig) -> Result<NetworkId, NetworkError> {
        let opts = bollard::models::NetworkCreateRequest {
            name: config.name.clone(),
            driver: config.driver.clone(),
            labels: if config.labels.is_empty() {
                None
            } else {
                Some(config.labels.clone())
            },
            ..Default::default()
        };

        let response = self
            .client
            .create_network(opts)
            .await
            .map_err(map_network_create_error)?;

        Ok(NetworkId::new(response.id))
    }

    async fn remove_network(&self, id: &NetworkId) -> Result<(), NetworkError> {
        self.client
            .remove_network(id.as_str())
            .await
            .map_err(map_network_remove_error)
    }
}

#[async_trait]
impl ContainerOps for BollardClient {
    async fn create_container(&self, spec: &ContainerSpec) -> Result<ContainerId, ContainerError> {
        let userns_mode = spec.userns_mode.as_engine_value();

        let mut host_config = HostConfig {
            userns_mode: if userns_mode.is_empty() {
                None
            } else {
                Some(userns_mode.to_string())
            },
            security_opt: Some(spec.policy.security_opt.clone()),
            restart_policy: Some(to_bollard_restart(&spec.policy.restart_policy)),
            init: Some(spec.policy.init),
            cgroupns_mode: Some(match spec.policy.cgroupns_mode {
                CgroupnsMode::Host => HostConfigCgroupnsModeEnum::HOST,
                CgroupnsMode::Private => HostConfigCgroupnsModeEnum::PRIVATE,
            }),
            privileged: Some(spec.policy.privileged),
            mounts: Some(spec.mounts.iter().map(to_bollard_mount).collect()),
            ..Default::default()
        };

        let networking_config = spec.endpoint.as_ref().map(|endpoint| {
            host_config.network_mode = Some(endpoint.network_name.clone());

            let mut endpoints = HashMap::new();
            endpoints.insert(
                endpoint.network_name.clone(),
                EndpointSettings {
                    network_id: Some(endpoint.network_id.to_string()),
                    ..Default::default()
                },
            );
            NetworkingConfig {
                endpoints_config: Some(endpoints),
            }
        });

        let body = ContainerCreateBody {
            image: Some(spec.image.to_string()),
            tty: Some(spec.tty),
            labels: Some(spec.labels.clone()),
            hostname: Some(spec.hostname.clone()),
            attach_stdin: Some(spec.attach_stdin),
            attach_stdout: Some(spec.attach_stdout),
            attach_stderr: Some(spec.attach_stderr),
            host_config: Some(host_config),
            networking_config,
            ..Default::default()
        };

        let opts = CreateContainerOptions {
            name: Some(spec.name.clone()),
            ..Default::default()
        };

        let response = self
            .client
            .create_container(Some(opts), body)
            .await
            .map_err(map_container_create_error)?;

        Ok(ContainerId::new(response.id))
    }

    async fn start_container(&self, id: &ContainerId) -> Result<(), ContainerError> {
        self.client
            .start_container(id.as_str(), None::<StartContainerOptions>)
            .await
            .map_err(map_container_start_error)
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        let details = self
            .client
            .inspect_container(id.as_str(), None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        let status = to_status(details.state.as_ref().and_then(|s| s.status));
        let networks = to_endpoints(details.network_settings.and_then(|n| n.networks));
        let (hostname, labels) = details
            .config
            .map(|c| (c.hostname.unwrap_or_default(), c.labels.unwrap_or_default()))
            .unwrap_or_default();

        Ok(ContainerDetails {
            id: details
                .id
                .map(ContainerId::new)
                .unwrap_or_else(|| id.clone()),
            name: trim_name(&details.name.unwrap_or_default()),
            hostname,
            labels,
            status,
            networks,
        })
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerSummary {
                id: ContainerId::new(c.id.unwrap_or_default()),
                name: c
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| trim_name(n))
                    .unwrap_or_default(),
                networks: to_endpoints(c.network_settings.and_then(|n| n.networks)),
            })
            .collect())
    }

    async fn remove_container(
        &self,
        id: &ContainerId,
        opts: RemoveOptions,
    ) -> Result<(), ContainerError> {
        let opts = RemoveContainerOptions {
            force: opts.force,
            v: opts.volumes,
            ..Default::default()
        };

        self.client
            .remove_container(id.as_str(), Some(opts))
            .await
            .map_err(map_container_not_found_error)
    }
}
