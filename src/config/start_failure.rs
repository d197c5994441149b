// ABOUTME: What to do with a container that was created but failed to start.
// ABOUTME: Parsed from "leave" or "remove" in the config file.

use serde::de::{self, Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartFailurePolicy {
    /// Leave the stopped container for the caller to inspect or clean up.
    #[default]
    Leave,
    /// Force-remove the container before returning the start error.
    Remove,
}

impl FromStr for StartFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leave" => Ok(StartFailurePolicy::Leave),
            "remove" => Ok(StartFailurePolicy::Remove),
            _ => Err(format!(
                "unknown start failure policy: {} (expected leave or remove)",
                s
            )),
        }
    }
}

impl fmt::Display for StartFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartFailurePolicy::Leave => write!(f, "leave"),
            StartFailurePolicy::Remove => write!(f, "remove"),
        }
    }
}

impl<'de> Deserialize<'de> for StartFailurePolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
