//! Cloud provider trait definition

use crate::error::Result;
use crate::model::{Action, CreateDroplet, CreatedDroplet, Droplet, Size, Snapshot};
use async_trait::async_trait;

/// Cloud provider abstraction trait
///
/// Workflows receive the provider as `&dyn CloudProvider` so they can be
/// driven by the real API client or by a scripted fake in tests.
///
/// Methods that start an action return the action as submitted; callers
/// follow it with [`CloudProvider::get_action`] until it settles.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "digitalocean")
    fn name(&self) -> &str;

    /// List every droplet on the account
    async fn list_droplets(&self) -> Result<Vec<Droplet>>;

    /// Fetch a droplet by ID
    async fn get_droplet(&self, droplet_id: &str) -> Result<Droplet>;

    /// Fetch a snapshot image by ID
    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Snapshot>;

    /// List every size offering
    async fn list_sizes(&self) -> Result<Vec<Size>>;

    /// Fetch the current state of an action
    async fn get_action(&self, action_id: &str) -> Result<Action>;

    /// Gracefully shut a droplet down
    async fn shutdown(&self, droplet_id: &str) -> Result<Action>;

    /// Power a droplet on
    async fn power_on(&self, droplet_id: &str) -> Result<Action>;

    /// Take a snapshot of a droplet under the given name
    async fn take_snapshot(&self, droplet_id: &str, name: &str) -> Result<Action>;

    /// Restore a droplet's disk from one of its snapshots
    async fn restore(&self, droplet_id: &str, snapshot_id: &str) -> Result<Action>;

    /// Rebuild a droplet from an image
    async fn rebuild(&self, droplet_id: &str, image_id: &str) -> Result<Action>;

    /// Create a droplet
    async fn create_droplet(&self, request: &CreateDroplet) -> Result<CreatedDroplet>;

    /// Destroy a droplet. The provider completes this synchronously.
    async fn destroy(&self, droplet_id: &str) -> Result<()>;
}
