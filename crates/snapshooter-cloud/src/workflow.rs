//! Snapshot lifecycle workflows
//!
//! Each workflow is a strictly sequential chain of provider calls. Steps that
//! start an asynchronous action wait for it through
//! [`wait_for_action`](crate::action::wait_for_action) before the next step
//! runs, and the first failing step aborts the rest of the chain.

use crate::action::{PollIntervals, wait_for_action};
use crate::error::{CloudError, Result};
use crate::model::{Action, CreateDroplet, Droplet, Snapshot};
use crate::progress::Progress;
use crate::provider::CloudProvider;
use crate::sizing::choose_size_slug;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;

/// Tag attached to droplets created to check a snapshot
pub const VERIFICATION_TAG: &str = "snapshot_restore";

/// Name for a snapshot of `droplet_name` taken at `at`
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use snapshooter_cloud::snapshot_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 2, 10, 15, 30).unwrap();
/// assert_eq!(snapshot_name("web-1", at), "web-1-20240302101530");
/// ```
pub fn snapshot_name(droplet_name: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", droplet_name, at.format("%Y%m%d%H%M%S"))
}

/// Outcome of a snapshot check
#[derive(Debug, Clone)]
pub struct SnapshotCheck {
    /// The snapshot that was checked
    pub snapshot: Snapshot,

    /// Size slug the verification droplet was created with
    pub size: String,

    /// The throwaway verification droplet
    pub droplet: Droplet,

    /// Whether the verification droplet was destroyed afterwards
    pub destroyed: bool,
}

/// Source of the current time for snapshot names
pub type Clock<'a> = Box<dyn Fn() -> DateTime<Utc> + Send + Sync + 'a>;

/// Snapshot workflows bound to a provider
pub struct Snapshooter<'a> {
    provider: &'a dyn CloudProvider,
    progress: &'a dyn Progress,
    intervals: PollIntervals,
    clock: Clock<'a>,
}

impl<'a> Snapshooter<'a> {
    pub fn new(
        provider: &'a dyn CloudProvider,
        progress: &'a dyn Progress,
        intervals: PollIntervals,
    ) -> Self {
        Self {
            provider,
            progress,
            intervals,
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the wall clock used to name snapshots
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn provider(&self) -> &dyn CloudProvider {
        self.provider
    }

    /// Run one action step: report it, submit it, wait for it to settle
    async fn step<T, F>(
        &self,
        message: &str,
        operation: &str,
        interval: Duration,
        submit: F,
    ) -> Result<(T, Action)>
    where
        F: Future<Output = Result<(T, Action)>>,
    {
        self.progress.start(message);

        let result = match submit.await {
            Ok((value, action)) => {
                tracing::info!("{}: submitted action {}", operation, action.id);
                wait_for_action(self.provider, operation, action, interval)
                    .await
                    .map(|action| (value, action))
            }
            Err(e) => Err(e),
        };

        if result.is_ok() {
            self.progress.succeed();
        } else {
            self.progress.fail();
        }
        result
    }

    /// Shut a droplet down; droplets that are already off are left alone
    pub async fn shutdown_droplet(&self, droplet: &Droplet) -> Result<Option<Action>> {
        if droplet.is_off() {
            tracing::debug!("{} is already off, skipping shutdown", droplet.name);
            return Ok(None);
        }

        let ((), action) = self
            .step(
                &format!("Shutting down {}", droplet.name),
                "shutdown_droplet",
                self.intervals.action,
                async {
                    self.provider
                        .shutdown(&droplet.id)
                        .await
                        .map(|action| ((), action))
                },
            )
            .await?;
        Ok(Some(action))
    }

    /// Snapshot a droplet, naming the snapshot after the submission time
    ///
    /// Returns the snapshot name.
    pub async fn snapshot_droplet(&self, droplet: &Droplet) -> Result<String> {
        let name = snapshot_name(&droplet.name, (self.clock)());

        self.step(
            &format!("Taking snapshot of {}: {}", droplet.name, name),
            "snapshot_droplet",
            self.intervals.snapshot,
            async {
                self.provider
                    .take_snapshot(&droplet.id, &name)
                    .await
                    .map(|action| ((), action))
            },
        )
        .await?;
        Ok(name)
    }

    /// Power a droplet on
    pub async fn turnon_droplet(&self, droplet: &Droplet) -> Result<Action> {
        let ((), action) = self
            .step(
                &format!("Turning on {}", droplet.name),
                "turnon_droplet",
                self.intervals.action,
                async {
                    self.provider
                        .power_on(&droplet.id)
                        .await
                        .map(|action| ((), action))
                },
            )
            .await?;
        Ok(action)
    }

    /// Create a droplet and wait until it is provisioned
    pub async fn create_droplet(&self, request: &CreateDroplet) -> Result<Droplet> {
        let (droplet, _) = self
            .step(
                &format!(
                    "Creating new droplet {} ({}) from snapshot {}",
                    request.name, request.size, request.image
                ),
                "create_droplet",
                self.intervals.action,
                async {
                    let created = self.provider.create_droplet(request).await?;
                    let action = self.provider.get_action(&created.action_id).await?;
                    Ok::<_, CloudError>((created.droplet, action))
                },
            )
            .await?;
        Ok(droplet)
    }

    /// Destroy a droplet, reporting the outcome instead of failing
    ///
    /// Returns `true` only when the provider confirmed the destroy.
    pub async fn destroy_droplet(&self, droplet: &Droplet) -> bool {
        self.progress
            .println(&format!("Destroying droplet {}", droplet.name));

        match self.provider.destroy(&droplet.id).await {
            Ok(()) => {
                self.progress.println("Done");
                true
            }
            Err(e) => {
                tracing::warn!("Destroying droplet {} failed: {}", droplet.id, e);
                self.progress.println("Droplet destruction failed");
                false
            }
        }
    }

    /// Shut down, snapshot and power a droplet back on
    ///
    /// Returns the name of the new snapshot.
    pub async fn take_snapshot(&self, droplet_id: &str) -> Result<String> {
        let droplet = self.provider.get_droplet(droplet_id).await?;

        self.shutdown_droplet(&droplet).await?;
        let name = self.snapshot_droplet(&droplet).await?;
        self.turnon_droplet(&droplet).await?;

        Ok(name)
    }

    /// Boot a throwaway droplet from a snapshot, then destroy it
    ///
    /// The droplet uses the cheapest size that fits the snapshot in `region`.
    /// Nothing is run against the booted droplet.
    pub async fn check_snapshot(&self, snapshot_id: &str, region: &str) -> Result<SnapshotCheck> {
        self.progress
            .println(&format!("Sanity checking snapshot {}", snapshot_id));

        let snapshot = self.provider.get_snapshot(snapshot_id).await?;
        if !snapshot.regions.iter().any(|r| r == region) {
            tracing::warn!(
                "Snapshot {} is only available in {:?}",
                snapshot_id,
                snapshot.regions
            );
            self.progress.println(&format!(
                "Snapshot {} is not available in {}",
                snapshot_id, region
            ));
        }
        let sizes = self.provider.list_sizes().await?;
        let size = choose_size_slug(&sizes, snapshot.min_disk_size, region).ok_or_else(|| {
            CloudError::NoSuitableSize {
                min_disk: snapshot.min_disk_size,
                region: region.to_string(),
            }
        })?;

        let request = CreateDroplet {
            name: format!("{}-check", snapshot.name),
            region: region.to_string(),
            size: size.clone(),
            image: snapshot_id.to_string(),
            monitoring: true,
            tags: vec![VERIFICATION_TAG.to_string()],
        };
        let droplet = self.create_droplet(&request).await?;

        let destroyed = self.destroy_droplet(&droplet).await;

        Ok(SnapshotCheck {
            snapshot,
            size,
            droplet,
            destroyed,
        })
    }

    /// Restore a droplet from one of its snapshots
    pub async fn restore_snapshot(&self, droplet_id: &str, snapshot_id: &str) -> Result<Action> {
        let droplet = self.provider.get_droplet(droplet_id).await?;

        let ((), action) = self
            .step(
                &format!("Restoring {} from snapshot {}", droplet.name, snapshot_id),
                "restore_snapshot",
                self.intervals.action,
                async {
                    self.provider
                        .restore(&droplet.id, snapshot_id)
                        .await
                        .map(|action| ((), action))
                },
            )
            .await?;
        Ok(action)
    }

    /// Rebuild a droplet in place from a snapshot image
    pub async fn rebuild_droplet(&self, droplet_id: &str, snapshot_id: &str) -> Result<Action> {
        let droplet = self.provider.get_droplet(droplet_id).await?;

        let ((), action) = self
            .step(
                &format!(
                    "Rebuilding droplet {} from snapshot {}",
                    droplet.name, snapshot_id
                ),
                "rebuild",
                self.intervals.action,
                async {
                    self.provider
                        .rebuild(&droplet.id, snapshot_id)
                        .await
                        .map(|action| ((), action))
                },
            )
            .await?;
        Ok(action)
    }

    pub async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        self.provider.list_droplets().await
    }

    /// Fetch every snapshot taken from a droplet
    pub async fn list_snapshots(&self, droplet_id: &str) -> Result<Vec<Snapshot>> {
        let droplet = self.provider.get_droplet(droplet_id).await?;

        let mut snapshots = Vec::with_capacity(droplet.snapshot_ids.len());
        for snapshot_id in &droplet.snapshot_ids {
            snapshots.push(self.provider.get_snapshot(snapshot_id).await?);
        }
        Ok(snapshots)
    }
}
