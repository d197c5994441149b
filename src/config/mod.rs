// ABOUTME: Provider configuration loaded from dockhand.yml.
// ABOUTME: Runtime endpoint, call deadlines and start-failure cleanup.

mod start_failure;

pub use start_failure::StartFailurePolicy;

use crate::error::{Error, Result};
use crate::runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "dockhand.yml";
pub const CONFIG_FILENAME_ALT: &str = "dockhand.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dockhand/config.yml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Timeout applied by the HTTP client when talking to the daemon.
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Deadline for each individual runtime call. Unbounded when absent.
    #[serde(default, with = "humantime_serde")]
    pub call_timeout: Option<Duration>,

    #[serde(default)]
    pub on_start_failure: StartFailurePolicy,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(120)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            connect_timeout: default_connect_timeout(),
            call_timeout: None,
            on_start_failure: StartFailurePolicy::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "connect_timeout must be greater than zero".to_string(),
            ));
        }
        if self.call_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::InvalidConfig(
                "call_timeout must be greater than zero".to_string(),
            ));
        }
        if self
            .runtime
            .socket
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
        {
            return Err(Error::InvalidConfig(
                "runtime.socket cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
