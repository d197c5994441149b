// ABOUTME: Phantom-typed identifiers handed out by the container runtime.
// ABOUTME: A NetworkId cannot be passed where a ContainerId is expected.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub enum ContainerMarker {}
pub enum NetworkMarker {}
pub enum ImageMarker {}

/// Length of the abbreviated form the engine CLI prints.
const SHORT_LEN: usize = 12;

/// An opaque runtime-assigned identifier.
///
/// The marker parameter exists only at compile time, so none of the trait
/// impls below place bounds on `T`.
#[must_use = "ids reference runtime resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Abbreviated id for log lines. Digest prefixes such as `sha256:` are kept.
    pub fn short(&self) -> &str {
        let (prefix_len, rest) = match self.value.split_once(':') {
            Some((algo, rest)) => (algo.len() + 1, rest),
            None => (0, self.value.as_str()),
        };
        let kept = rest
            .char_indices()
            .nth(SHORT_LEN)
            .map_or(rest.len(), |(i, _)| i);
        let end = prefix_len + kept;
        &self.value[..end]
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

pub type ContainerId = Id<ContainerMarker>;
pub type NetworkId = Id<NetworkMarker>;
pub type ImageId = Id<ImageMarker>;
