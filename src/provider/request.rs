// ABOUTME: Caller-supplied intent for a new node container.
// ABOUTME: Also defines the mounts every node container receives.

use crate::runtime::MountSpec;
use crate::types::{ContainerName, ImageRef};
use std::collections::HashMap;

/// What the caller wants launched.
///
/// Name and image are validated on construction, so neither can be empty.
/// Uniqueness of the name is left to the runtime.
#[derive(Debug, Clone)]
pub struct CreationRequest {
    pub name: ContainerName,
    pub image: ImageRef,
    pub hostname: String,
    pub labels: HashMap<String, String>,
    pub network_name: String,
    /// Appended after [`default_mounts`].
    pub mounts: Vec<MountSpec>,
}

impl CreationRequest {
    /// Request with the hostname defaulted to the container name.
    pub fn new(name: ContainerName, image: ImageRef, network_name: impl Into<String>) -> Self {
        Self {
            hostname: name.to_string(),
            name,
            image,
            labels: HashMap::new(),
            network_name: network_name.into(),
            mounts: Vec::new(),
        }
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn mount(mut self, mount: MountSpec) -> Self {
        self.mounts.push(mount);
        self
    }

    /// Default mounts followed by the caller's, without deduplication.
    pub fn all_mounts(&self) -> Vec<MountSpec> {
        let mut mounts = default_mounts();
        mounts.extend(self.mounts.iter().cloned());
        mounts
    }
}

/// Mounts applied to every node container.
///
/// Scratch space on tmpfs, a throwaway `/var` so nested engines get a
/// non-overlay filesystem, and the host's kernel modules read-only.
pub fn default_mounts() -> Vec<MountSpec> {
    vec![
        MountSpec::tmpfs("/tmp"),
        MountSpec::tmpfs("/run"),
        MountSpec::anonymous_volume("/var"),
        MountSpec::bind("/lib/modules", "/lib/modules").read_only(),
    ]
}
