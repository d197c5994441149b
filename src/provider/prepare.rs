// ABOUTME: Network and image preparation ahead of container creation.
// ABOUTME: Resolve-or-create a named network; pull an image and resolve its ID.

use super::ContainerProvider;
use super::error::ProviderError;
use crate::runtime::{ImageError, NetworkConfig, NetworkError, RuntimeClient};
use crate::types::{ImageId, ImageRef, NetworkId};
use std::collections::HashMap;

/// Label marking networks created by the provider.
pub const MANAGED_LABEL: &str = "dockhand.managed";

const NETWORK_DRIVER: &str = "bridge";

impl<C: RuntimeClient> ContainerProvider<C> {
    /// Resolve a network by name, creating a bridge network when absent.
    ///
    /// Losing a creation race to another caller is not an error; the winner's
    /// network is resolved instead.
    pub async fn prepare_network(&self, name: &str) -> Result<NetworkId, NetworkError> {
        if let Some(id) = self.context.run(self.client.find_network(name)).await? {
            tracing::debug!(network = name, id = %id.short(), "network exists");
            return Ok(id);
        }

        let config = NetworkConfig {
            name: name.to_string(),
            driver: Some(NETWORK_DRIVER.to_string()),
            labels: HashMap::from([(MANAGED_LABEL.to_string(), "true".to_string())]),
        };

        match self.context.run(self.client.create_network(&config)).await {
            Ok(id) => {
                tracing::info!(network = name, id = %id.short(), "created network");
                Ok(id)
            }
            Err(NetworkError::AlreadyExists(_)) => self
                .context
                .run(self.client.find_network(name))
                .await?
                .ok_or_else(|| NetworkError::NotFound(name.to_string())),
            Err(e) => Err(e),
        }
    }

    /// Local image ID for `image`, pulling it only when it is not present.
    pub async fn fetch_image(&self, image: &ImageRef) -> Result<ImageId, ImageError> {
        match self.context.run(self.client.inspect_image(image)).await {
            Ok(id) => {
                tracing::debug!(%image, id = %id.short(), "image present locally");
                return Ok(id);
            }
            Err(ImageError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        tracing::debug!(%image, "pulling image");
        self.context.run(self.client.pull_image(image)).await?;

        let id = self.context.run(self.client.inspect_image(image)).await?;
        tracing::debug!(%image, id = %id.short(), "image ready");
        Ok(id)
    }

    /// Remove a network by name.
    pub async fn remove_network(&self, name: &str) -> Result<(), ProviderError> {
        let resolution = |source| ProviderError::NetworkResolution {
            network: name.to_string(),
            source,
        };

        let id = self
            .context
            .run(self.client.find_network(name))
            .await
            .map_err(resolution)?
            .ok_or_else(|| resolution(NetworkError::NotFound(name.to_string())))?;

        self.context
            .run(self.client.remove_network(&id))
            .await
            .map_err(resolution)?;

        tracing::info!(network = name, "removed network");
        Ok(())
    }
}
