// ABOUTME: Engine-enforced restart policy for launched containers.
// ABOUTME: Governs the container process, not the API calls made to launch it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartPolicy {
    No,
    Always,
    UnlessStopped,
    OnFailure { max_retries: Option<u32> },
}

impl RestartPolicy {
    /// Retry ceiling sent to the engine. Only `on-failure` carries one.
    pub fn maximum_retry_count(&self) -> Option<i64> {
        match self {
            RestartPolicy::OnFailure { max_retries } => max_retries.map(i64::from),
            _ => None,
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPolicy::No => write!(f, "no"),
            RestartPolicy::Always => write!(f, "always"),
            RestartPolicy::UnlessStopped => write!(f, "unless-stopped"),
            RestartPolicy::OnFailure { max_retries: None } => write!(f, "on-failure"),
            RestartPolicy::OnFailure {
                max_retries: Some(n),
            } => write!(f, "on-failure:{n}"),
        }
    }
}
