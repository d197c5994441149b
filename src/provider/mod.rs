// ABOUTME: Container provider: runtime-agnostic node container operations.
// ABOUTME: Composes network, image, mounts and launch posture into one creation call.

mod capability;
mod error;
mod prepare;
mod record;
mod request;

pub use capability::{
    CGROUP_NONE_DRIVER, NamespaceProbe, USERNS_SECURITY_OPTION, capabilities_from,
    namespace_mode_from,
};
pub use error::{ErrorKind, ProviderError};
pub use prepare::MANAGED_LABEL;
pub use record::{Attachment, ContainerRecord, HostCapabilities};
pub use request::{CreationRequest, default_mounts};

use crate::config::{Config, StartFailurePolicy};
use crate::policy::{LaunchPolicy, UsernsMode};
use crate::runtime::{
    BollardClient, CallContext, ContainerFilters, ContainerSpec, EndpointBinding, RemoveOptions,
    RuntimeClient, RuntimeError,
};
use crate::types::{ContainerId, NetworkId};
use std::net::IpAddr;
use tokio_util::sync::CancellationToken;

/// Launches and queries node containers through an owned runtime client.
///
/// Operations take `&self` and may run concurrently. Every runtime call goes
/// through the provider's [`CallContext`].
pub struct ContainerProvider<C = BollardClient> {
    client: C,
    policy: LaunchPolicy,
    on_start_failure: StartFailurePolicy,
    context: CallContext,
}

impl ContainerProvider<BollardClient> {
    /// Connect to the configured runtime.
    pub async fn connect(config: &Config) -> Result<Self, RuntimeError> {
        let client = crate::runtime::connect(&config.runtime, config.connect_timeout).await?;
        Ok(Self::new(client)
            .with_start_failure_policy(config.on_start_failure)
            .with_context(CallContext::new(
                CancellationToken::new(),
                config.call_timeout,
            )))
    }
}

impl<C: RuntimeClient> ContainerProvider<C> {
    /// Provider with the default launch posture, no call deadline, and
    /// containers left in place when they fail to start.
    pub fn new(client: C) -> Self {
        Self {
            client,
            policy: LaunchPolicy::default(),
            on_start_failure: StartFailurePolicy::default(),
            context: CallContext::default(),
        }
    }

    pub fn with_policy(mut self, policy: LaunchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_start_failure_policy(mut self, policy: StartFailurePolicy) -> Self {
        self.on_start_failure = policy;
        self
    }

    pub fn with_context(mut self, context: CallContext) -> Self {
        self.context = context;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn policy(&self) -> &LaunchPolicy {
        &self.policy
    }

    /// Cancelling this token interrupts every in-flight and future call.
    pub fn cancel_token(&self) -> &CancellationToken {
        self.context.token()
    }

    /// Create and start a node container, returning the runtime-assigned ID.
    ///
    /// Network and image failures abort before any container exists. A
    /// failed user-namespace query does not abort; the daemon default mode
    /// is used instead.
    pub async fn run_container(
        &self,
        request: &CreationRequest,
    ) -> Result<ContainerId, ProviderError> {
        if request.network_name.trim().is_empty() {
            return Err(ProviderError::InvalidRequest(
                "network name cannot be empty".to_string(),
            ));
        }

        let network_id = self
            .prepare_network(&request.network_name)
            .await
            .map_err(|source| ProviderError::NetworkResolution {
                network: request.network_name.clone(),
                source,
            })?;

        self.fetch_image(&request.image)
            .await
            .map_err(|source| ProviderError::ImageFetch {
                image: request.image.to_string(),
                source,
            })?;

        let userns_mode = self.probe_namespace_mode().await.mode();
        let spec = compose_spec(request, network_id, userns_mode, &self.policy);

        let id = self
            .context
            .run(self.client.create_container(&spec))
            .await
            .map_err(|source| ProviderError::Creation {
                name: request.name.to_string(),
                source,
            })?;

        if let Err(source) = self.context.run(self.client.start_container(&id)).await {
            self.handle_start_failure(&id).await;
            return Err(ProviderError::Start { id, source });
        }

        tracing::info!(
            container = %request.name,
            id = %id.short(),
            network = %request.network_name,
            "created container"
        );
        Ok(id)
    }

    async fn handle_start_failure(&self, id: &ContainerId) {
        match self.on_start_failure {
            StartFailurePolicy::Leave => {
                tracing::warn!(id = %id.short(), "container failed to start, leaving it in place");
            }
            StartFailurePolicy::Remove => {
                let opts = RemoveOptions {
                    force: true,
                    volumes: true,
                };
                match self.context.run(self.client.remove_container(id, opts)).await {
                    Ok(()) => tracing::info!(id = %id.short(), "removed container that failed to start"),
                    Err(e) => tracing::warn!(
                        id = %id.short(),
                        error = %e,
                        "failed to remove container that failed to start"
                    ),
                }
            }
        }
    }

    /// Fresh view of a container, with its address on `network`.
    pub async fn container_info(
        &self,
        id: &ContainerId,
        network: &str,
    ) -> Result<ContainerRecord, ProviderError> {
        let details = self
            .context
            .run(self.client.inspect_container(id))
            .await
            .map_err(|source| ProviderError::inspect(id, source))?;

        let record = ContainerRecord::from_details(details, network);
        if record.ip_address.is_none() {
            tracing::debug!(id = %id.short(), network, "container has no address on network");
        }
        Ok(record)
    }

    /// First running container, in runtime listing order, holding `ip` on
    /// `network`. `Ok(None)` when no container matches.
    pub async fn container_id_by_ip(
        &self,
        ip: IpAddr,
        network: &str,
    ) -> Result<Option<ContainerId>, ProviderError> {
        let containers = self
            .context
            .run(self.client.list_containers(&ContainerFilters::default()))
            .await
            .map_err(|source| ProviderError::ContainerQuery { source })?;

        Ok(containers
            .into_iter()
            .find(|c| {
                c.networks
                    .get(network)
                    .and_then(|endpoint| endpoint.ip_address.parse::<IpAddr>().ok())
                    == Some(ip)
            })
            .map(|c| c.id))
    }

    /// Force-remove a container and its anonymous volumes.
    pub async fn remove_container(&self, id: &ContainerId) -> Result<(), ProviderError> {
        let opts = RemoveOptions {
            force: true,
            volumes: true,
        };
        self.context
            .run(self.client.remove_container(id, opts))
            .await
            .map_err(|source| ProviderError::removal(id, source))?;

        tracing::info!(id = %id.short(), "removed container");
        Ok(())
    }
}

/// The creation call for `request`: TTY on, standard streams detached,
/// bound to the resolved network, with the given posture.
pub fn compose_spec(
    request: &CreationRequest,
    network_id: NetworkId,
    userns_mode: UsernsMode,
    policy: &LaunchPolicy,
) -> ContainerSpec {
    ContainerSpec {
        name: request.name.to_string(),
        image: request.image.clone(),
        hostname: request.hostname.clone(),
        labels: request.labels.clone(),
        tty: true,
        attach_stdin: false,
        attach_stdout: false,
        attach_stderr: false,
        mounts: request.all_mounts(),
        endpoint: Some(EndpointBinding {
            network_name: request.network_name.clone(),
            network_id,
        }),
        userns_mode,
        policy: policy.clone(),
    }
}
