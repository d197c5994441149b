// ABOUTME: Runtime client handle for Docker-compatible container engines.
// ABOUTME: Capability traits, the bollard implementation and endpoint resolution.

mod bollard;
mod context;
mod detection;
pub mod error;
pub mod traits;
mod types;

pub use self::bollard::{BollardClient, connect};
pub use context::{CallContext, Interrupted};
pub use detection::{DetectionError, detect_local, resolve_endpoint};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::*;
pub use types::{Endpoint, RuntimeConfig, RuntimeInfo, RuntimeType};
