//! Snapshooter cloud layer
//!
//! This crate provides the provider abstraction for Snapshooter together with
//! the snapshot lifecycle workflows built on top of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 snapshooter CLI                  │
//! │        (droplet list, snapshot take, ...)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               snapshooter-cloud                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │    Workflows (take / check / restore)     │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────────────┐     │
//! │  │ Action poller│  │ trait CloudProvider  │     │
//! │  └──────────────┘  └──────────────────────┘     │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │ digitalocean  │
//!           │   provider    │
//!           └───────────────┘
//! ```

pub mod action;
pub mod error;
pub mod model;
pub mod progress;
pub mod provider;
pub mod sizing;
pub mod workflow;

// Re-exports
pub use action::{PollIntervals, wait_for_action};
pub use error::{CloudError, Result};
pub use model::{
    Action, ActionStatus, CreateDroplet, CreatedDroplet, Droplet, PowerStatus, Size, Snapshot,
};
pub use progress::{Progress, Silent};
pub use provider::CloudProvider;
pub use sizing::choose_size_slug;
pub use workflow::{Clock, SnapshotCheck, Snapshooter, VERIFICATION_TAG, snapshot_name};
