// ABOUTME: Container name validation matching the engine's naming rule.
// ABOUTME: Names start with an alphanumeric, then allow alphanumerics and _.-

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerNameError {
    #[error("container name cannot be empty")]
    Empty,

    #[error("container name must start with a letter or digit, found '{0}'")]
    InvalidStart(char),

    #[error("invalid character in container name: '{0}'")]
    InvalidChar(char),
}

/// A container name accepted by Docker-compatible engines.
///
/// A single leading `/`, as the engine reports names on inspect, is stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerName(String);

impl ContainerName {
    pub fn new(value: &str) -> Result<Self, ContainerNameError> {
        let value = value.strip_prefix('/').unwrap_or(value);
        let mut chars = value.chars();

        let first = chars.next().ok_or(ContainerNameError::Empty)?;
        if !first.is_ascii_alphanumeric() {
            return Err(ContainerNameError::InvalidStart(first));
        }

        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
        {
            return Err(ContainerNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
