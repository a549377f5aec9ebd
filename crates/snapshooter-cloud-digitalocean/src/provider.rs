//! DigitalOcean provider implementation

use crate::client::{DigitalOceanClient, DigitalOceanConfig};
use async_trait::async_trait;
use snapshooter_cloud::{
    Action, CloudProvider, CreateDroplet, CreatedDroplet, Droplet, Result, Size, Snapshot,
};

/// DigitalOcean provider
pub struct DigitalOceanProvider {
    client: DigitalOceanClient,
}

impl DigitalOceanProvider {
    pub fn new(config: DigitalOceanConfig) -> Self {
        Self {
            client: DigitalOceanClient::new(config),
        }
    }
}

#[async_trait]
impl CloudProvider for DigitalOceanProvider {
    fn name(&self) -> &str {
        "digitalocean"
    }

    async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        Ok(self.client.list_droplets().await?)
    }

    async fn get_droplet(&self, droplet_id: &str) -> Result<Droplet> {
        Ok(self.client.get_droplet(droplet_id).await?)
    }

    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Snapshot> {
        Ok(self.client.get_image(snapshot_id).await?)
    }

    async fn list_sizes(&self) -> Result<Vec<Size>> {
        Ok(self.client.list_sizes().await?)
    }

    async fn get_action(&self, action_id: &str) -> Result<Action> {
        Ok(self.client.get_action(action_id).await?)
    }

    async fn shutdown(&self, droplet_id: &str) -> Result<Action> {
        tracing::info!("Requesting shutdown of droplet {}", droplet_id);
        Ok(self.client.shutdown(droplet_id).await?)
    }

    async fn power_on(&self, droplet_id: &str) -> Result<Action> {
        tracing::info!("Requesting power on of droplet {}", droplet_id);
        Ok(self.client.power_on(droplet_id).await?)
    }

    async fn take_snapshot(&self, droplet_id: &str, name: &str) -> Result<Action> {
        tracing::info!("Requesting snapshot {} of droplet {}", name, droplet_id);
        Ok(self.client.snapshot(droplet_id, name).await?)
    }

    async fn restore(&self, droplet_id: &str, snapshot_id: &str) -> Result<Action> {
        tracing::info!(
            "Requesting restore of droplet {} from {}",
            droplet_id,
            snapshot_id
        );
        Ok(self.client.restore(droplet_id, snapshot_id).await?)
    }

    async fn rebuild(&self, droplet_id: &str, image_id: &str) -> Result<Action> {
        tracing::info!(
            "Requesting rebuild of droplet {} from {}",
            droplet_id,
            image_id
        );
        Ok(self.client.rebuild(droplet_id, image_id).await?)
    }

    async fn create_droplet(&self, request: &CreateDroplet) -> Result<CreatedDroplet> {
        tracing::info!(
            "Creating droplet {} ({}) in {}",
            request.name,
            request.size,
            request.region
        );
        let (droplet, action_id) = self.client.create_droplet(request).await?;
        Ok(CreatedDroplet { droplet, action_id })
    }

    async fn destroy(&self, droplet_id: &str) -> Result<()> {
        tracing::info!("Deleting droplet {}", droplet_id);
        Ok(self.client.delete_droplet(droplet_id).await?)
    }
}
