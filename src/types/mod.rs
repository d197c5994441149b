// ABOUTME: Type-safe identifiers and validated request types.
// ABOUTME: Phantom-typed ids keep container, network and image handles apart.

mod container_name;
mod id;
mod image_ref;

pub use container_name::{ContainerName, ContainerNameError};
pub use id::{ContainerId, Id, ImageId, NetworkId};
pub use image_ref::{ImageRef, ParseImageRefError};
