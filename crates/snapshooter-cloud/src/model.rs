//! Resource types shared by all providers
//!
//! Everything here is a snapshot of remote state at the time it was fetched.
//! Nothing is cached: workflows re-read resources by ID before using them.

use serde::{Deserialize, Serialize};

/// A virtual machine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    /// Provider-assigned identifier
    pub id: String,

    /// Human readable name
    pub name: String,

    /// Power state at fetch time
    pub status: PowerStatus,

    /// Public IPv4 address, if one is assigned
    pub ip_address: Option<String>,

    /// Snapshots taken from this droplet
    pub snapshot_ids: Vec<String>,
}

impl Droplet {
    pub fn is_off(&self) -> bool {
        self.status == PowerStatus::Off
    }
}

/// Power state of a droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerStatus {
    /// Still being provisioned
    New,
    /// Powered on
    Active,
    /// Powered off
    Off,
    /// Archived by the provider
    Archive,
}

impl std::fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerStatus::New => write!(f, "new"),
            PowerStatus::Active => write!(f, "active"),
            PowerStatus::Off => write!(f, "off"),
            PowerStatus::Archive => write!(f, "archive"),
        }
    }
}

/// A point-in-time disk image of a droplet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,

    pub name: String,

    /// Size of the stored image in gigabytes
    pub size_gigabytes: f64,

    /// Smallest disk (GB) a droplet needs to boot from this image
    pub min_disk_size: u64,

    pub status: String,

    /// Regions the image is available in
    pub regions: Vec<String>,
}

/// Status of a provider-side asynchronous action
///
/// `InProgress` is the only non-terminal state. An action moves from it to
/// exactly one of the terminal states and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    InProgress,
    Completed,
    Errored,
}

impl ActionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ActionStatus::InProgress)
    }
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::InProgress => write!(f, "in-progress"),
            ActionStatus::Completed => write!(f, "completed"),
            ActionStatus::Errored => write!(f, "errored"),
        }
    }
}

/// A provider-tracked asynchronous operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,

    pub status: ActionStatus,

    /// Provider action type (e.g. "shutdown", "snapshot")
    pub kind: String,
}

/// A purchasable droplet size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub slug: String,

    /// Disk capacity in gigabytes
    pub disk: u64,

    pub price_hourly: f64,

    /// Region slugs this size can be created in
    pub regions: Vec<String>,
}

/// Parameters for creating a droplet from an image
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDroplet {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    pub monitoring: bool,
    pub tags: Vec<String>,
}

/// A freshly created droplet together with the action provisioning it
#[derive(Debug, Clone)]
pub struct CreatedDroplet {
    pub droplet: Droplet,
    pub action_id: String,
}
