// ABOUTME: Composable capability traits for the runtime client handle.
// ABOUTME: Defines SystemOps, ImageOps, NetworkOps, ContainerOps and RuntimeClient.

mod container;
mod image;
mod network;
mod shared_types;
mod system;

pub use container::{ContainerError, ContainerFilters, ContainerOps};
pub use image::{ImageError, ImageOps};
pub use network::{NetworkError, NetworkOps};
pub use shared_types::*;
pub use system::{SystemError, SystemOps};

/// Everything the provider needs from a container engine.
///
/// Implemented automatically for any type that provides all four
/// capability traits.
pub trait RuntimeClient: SystemOps + ImageOps + NetworkOps + ContainerOps {}

impl<T> RuntimeClient for T where T: SystemOps + ImageOps + NetworkOps + ContainerOps {}
