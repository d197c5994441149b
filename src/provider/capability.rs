// ABOUTME: Host capability inspection for the provider.
// ABOUTME: Derives user-namespace mode and resource-limit support from daemon info.

use super::ContainerProvider;
use super::error::ProviderError;
use super::record::HostCapabilities;
use crate::policy::UsernsMode;
use crate::runtime::{HostInfo, RuntimeClient};

/// Cgroup driver reported when the daemon enforces no resource limits.
pub const CGROUP_NONE_DRIVER: &str = "none";

/// Security option the daemon reports when user-namespace remapping is on.
pub const USERNS_SECURITY_OPTION: &str = "name=userns";

/// Outcome of the best-effort namespace query made before each launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceProbe {
    Detected(UsernsMode),
    /// The query failed; launches proceed with the daemon default.
    Unknown { reason: String },
}

impl NamespaceProbe {
    pub fn mode(&self) -> UsernsMode {
        match self {
            NamespaceProbe::Detected(mode) => *mode,
            NamespaceProbe::Unknown { .. } => UsernsMode::Default,
        }
    }
}

/// A remapping daemon gets `host` mode so privileged node containers keep
/// real root; otherwise the daemon default applies.
pub fn namespace_mode_from(security_options: &[String]) -> UsernsMode {
    if security_options
        .iter()
        .any(|opt| opt == USERNS_SECURITY_OPTION)
    {
        UsernsMode::Host
    } else {
        UsernsMode::Default
    }
}

/// Build the capability snapshot, leaving resource fields zeroed when the
/// cgroup driver is `none` (moby/moby#42151).
pub fn capabilities_from(info: HostInfo) -> HostCapabilities {
    let mut caps = HostCapabilities {
        cgroup_driver: info.cgroup_driver,
        cgroup_version: info.cgroup_version,
        storage_driver: info.storage_driver,
        security_options: info.security_options,
        ..Default::default()
    };

    if caps.cgroup_driver == CGROUP_NONE_DRIVER {
        return caps;
    }

    caps.memory_limit = info.memory_limit;
    caps.pids_limit = info.pids_limit;
    caps.cpu_shares = info.cpu_shares;
    caps.cpu_count = info.cpu_count;
    caps
}

impl<C: RuntimeClient> ContainerProvider<C> {
    /// Query the daemon's host configuration.
    pub async fn server_info(&self) -> Result<HostCapabilities, ProviderError> {
        let info = self
            .context
            .run(self.client.host_info())
            .await
            .map_err(|source| ProviderError::HostQuery { source })?;
        Ok(capabilities_from(info))
    }

    /// User-namespace mode to request, from the daemon's security options.
    pub async fn user_namespace_mode(&self) -> Result<UsernsMode, ProviderError> {
        let info = self
            .context
            .run(self.client.host_info())
            .await
            .map_err(|source| ProviderError::HostQuery { source })?;
        Ok(namespace_mode_from(&info.security_options))
    }

    /// Like [`user_namespace_mode`](Self::user_namespace_mode), but a failed
    /// query is logged and reported as [`NamespaceProbe::Unknown`].
    pub async fn probe_namespace_mode(&self) -> NamespaceProbe {
        match self.user_namespace_mode().await {
            Ok(mode) => NamespaceProbe::Detected(mode),
            Err(e) => {
                tracing::warn!(error = %e, "user namespace mode unknown, using daemon default");
                NamespaceProbe::Unknown {
                    reason: e.to_string(),
                }
            }
        }
    }
}
