// ABOUTME: Endpoint resolution for the runtime client handle.
// ABOUTME: Explicit config first, then DOCKER_HOST, then local socket detection.

use super::types::{Endpoint, RuntimeConfig, RuntimeInfo, RuntimeType};
use std::path::Path;

/// Error during runtime detection.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("no container runtime found (checked DOCKER_HOST, Podman and Docker sockets)")]
    NoRuntimeFound,
}

const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const DOCKER_HOST_VAR: &str = "DOCKER_HOST";

/// Resolve where to connect.
///
/// Precedence:
/// 1. Explicit `socket` (runtime type defaults to Docker)
/// 2. Explicit `runtime` at its default socket
/// 3. A non-empty `DOCKER_HOST`
/// 4. Local socket detection, see [`detect_local`]
pub fn resolve_endpoint(config: &RuntimeConfig) -> Result<Endpoint, DetectionError> {
    if let Some(socket) = &config.socket {
        return Ok(Endpoint::Socket(RuntimeInfo {
            runtime_type: config.runtime.unwrap_or(RuntimeType::Docker),
            socket_path: socket.clone(),
        }));
    }

    if let Some(runtime_type) = config.runtime {
        return Ok(Endpoint::Socket(RuntimeInfo {
            runtime_type,
            socket_path: default_socket_path(runtime_type),
        }));
    }

    if std::env::var(DOCKER_HOST_VAR).is_ok_and(|host| !host.trim().is_empty()) {
        return Ok(Endpoint::Environment);
    }

    detect_local().map(Endpoint::Socket)
}

/// Detect a container runtime socket on the local system.
///
/// Detection order:
/// 1. Docker socket (`/var/run/docker.sock`)
/// 2. Rootful Podman socket (`/run/podman/podman.sock`)
/// 3. Rootless Podman socket (`/run/user/$UID/podman/podman.sock`)
///
/// Node containers need a rootful engine, so rootless Podman comes last.
pub fn detect_local() -> Result<RuntimeInfo, DetectionError> {
    if Path::new(DOCKER_SOCKET).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Docker,
            socket_path: DOCKER_SOCKET.to_string(),
        });
    }

    if Path::new(ROOTFUL_PODMAN).exists() {
        return Ok(RuntimeInfo {
            runtime_type: RuntimeType::Podman,
            socket_path: ROOTFUL_PODMAN.to_string(),
        });
    }

    if let Some(uid) = get_uid() {
        let rootless_socket = format!("/run/user/{}/podman/podman.sock", uid);
        if Path::new(&rootless_socket).exists() {
            return Ok(RuntimeInfo {
                runtime_type: RuntimeType::Podman,
                socket_path: rootless_socket,
            });
        }
    }

    Err(DetectionError::NoRuntimeFound)
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}

fn default_socket_path(runtime: RuntimeType) -> String {
    match runtime {
        RuntimeType::Docker => DOCKER_SOCKET.to_string(),
        RuntimeType::Podman => ROOTFUL_PODMAN.to_string(),
    }
}
