// ABOUTME: Launch posture applied to every node container.
// ABOUTME: Security, namespace, init and restart settings as one auditable struct.

mod restart_policy;

pub use restart_policy::RestartPolicy;

use std::fmt;

/// Seccomp override applied by the default posture.
pub const SECCOMP_UNCONFINED: &str = "seccomp=unconfined";
/// AppArmor override applied by the default posture.
pub const APPARMOR_UNCONFINED: &str = "apparmor=unconfined";

/// Host isolation settings for containers launched by the provider.
///
/// Node containers run systemd and nested container engines, so the default
/// posture is privileged and unconfined, shares the host cgroup namespace,
/// skips the engine's init shim and restarts at most once on failure.
/// Callers of the provider cannot change it per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPolicy {
    pub security_opt: Vec<String>,
    pub privileged: bool,
    pub cgroupns_mode: CgroupnsMode,
    pub init: bool,
    pub restart_policy: RestartPolicy,
}

impl Default for LaunchPolicy {
    fn default() -> Self {
        Self {
            security_opt: vec![
                SECCOMP_UNCONFINED.to_string(),
                APPARMOR_UNCONFINED.to_string(),
            ],
            privileged: true,
            cgroupns_mode: CgroupnsMode::Host,
            init: false,
            restart_policy: RestartPolicy::OnFailure {
                max_retries: Some(1),
            },
        }
    }
}

/// Cgroup namespace requested for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgroupnsMode {
    Host,
    Private,
}

/// User namespace mode requested for a container.
///
/// `Host` disables UID/GID remapping by sharing the host's user namespace.
/// `Default` leaves the choice to the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsernsMode {
    Host,
    #[default]
    Default,
}

impl UsernsMode {
    /// Value sent to the engine; the default mode is the empty string.
    pub fn as_engine_value(&self) -> &'static str {
        match self {
            UsernsMode::Host => "host",
            UsernsMode::Default => "",
        }
    }
}

impl fmt::Display for UsernsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsernsMode::Host => write!(f, "host"),
            UsernsMode::Default => write!(f, "default"),
        }
    }
}
