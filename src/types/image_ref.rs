// ABOUTME: Image reference validation for node container images.
// ABOUTME: Accepts repo, repo:tag, registry:port/repo:tag and repo@digest forms.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageRefError {
    #[error("image reference cannot be empty")]
    Empty,

    #[error("invalid character in image reference: '{0}'")]
    InvalidChar(char),

    #[error("image reference has an empty {0}")]
    EmptyComponent(&'static str),
}

/// A validated image reference.
///
/// References without a tag or digest are pinned to `latest`, the same
/// default the engine applies on pull.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    repository: String,
    tag: Option<String>,
    digest: Option<String>,
}

impl ImageRef {
    pub fn parse(input: &str) -> Result<Self, ParseImageRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseImageRefError::Empty);
        }

        if let Some(c) = input
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "/:.-_@".contains(*c)))
        {
            return Err(ParseImageRefError::InvalidChar(c));
        }

        let (named, digest) = match input.split_once('@') {
            Some((_, "")) => return Err(ParseImageRefError::EmptyComponent("digest")),
            Some((named, digest)) => (named, Some(digest.to_string())),
            None => (input, None),
        };

        // A tag can only follow the last path segment; a colon before that is
        // a registry port.
        let last_segment_start = named.rfind('/').map_or(0, |i| i + 1);
        let (repository, tag) = match named[last_segment_start..].rfind(':') {
            Some(offset) => {
                let split = last_segment_start + offset;
                (&named[..split], Some(named[split + 1..].to_string()))
            }
            None => (named, None),
        };

        if repository.is_empty() || repository.ends_with('/') {
            return Err(ParseImageRefError::EmptyComponent("repository"));
        }
        if tag.as_deref() == Some("") {
            return Err(ParseImageRefError::EmptyComponent("tag"));
        }

        let tag = match (tag, &digest) {
            (None, None) => Some("latest".to_string()),
            (tag, _) => tag,
        };

        Ok(Self {
            repository: repository.to_string(),
            tag,
            digest,
        })
    }

    /// Repository including any registry host, e.g. `registry:5000/team/base`.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ImageRef {
    type Err = ParseImageRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
