//! Following provider actions until they settle

use crate::error::{CloudError, Result};
use crate::model::{Action, ActionStatus};
use crate::provider::CloudProvider;
use std::time::Duration;
use tokio::time::sleep;

/// Delays between status checks of a submitted action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollIntervals {
    /// Power, create, restore and rebuild actions
    pub action: Duration,

    /// Snapshot actions, which take considerably longer
    pub snapshot: Duration,
}

impl Default for PollIntervals {
    fn default() -> Self {
        Self {
            action: Duration::from_secs(15),
            snapshot: Duration::from_secs(30),
        }
    }
}

impl PollIntervals {
    /// Intervals that never sleep, for driving workflows against fakes
    pub fn immediate() -> Self {
        Self {
            action: Duration::ZERO,
            snapshot: Duration::ZERO,
        }
    }
}

/// Wait until a submitted action leaves `in-progress`
///
/// The action is re-fetched every `interval` while it is in progress. A
/// completed action is returned; an errored one becomes
/// [`CloudError::ActionFailed`] labelled with `operation`. There is no
/// timeout: an action stuck in progress is polled indefinitely.
pub async fn wait_for_action(
    provider: &dyn CloudProvider,
    operation: &str,
    mut action: Action,
    interval: Duration,
) -> Result<Action> {
    while !action.status.is_terminal() {
        sleep(interval).await;
        action = provider.get_action(&action.id).await?;
        tracing::debug!(
            "{} ({}) action {} is {}",
            operation,
            action.kind,
            action.id,
            action.status
        );
    }

    match action.status {
        ActionStatus::Completed => Ok(action),
        status => Err(CloudError::ActionFailed {
            operation: operation.to_string(),
            status,
        }),
    }
}
