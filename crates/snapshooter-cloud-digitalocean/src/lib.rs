//! DigitalOcean provider for Snapshooter
//!
//! This crate implements the CloudProvider trait for DigitalOcean on top of
//! the public REST API (v2).
//!
//! # Features
//!
//! - Droplet listing, lookup, creation and deletion
//! - Droplet actions: shutdown, power on, snapshot, restore, rebuild
//! - Action status lookup for polling
//! - Image (snapshot) and size lookup
//!
//! # Requirements
//!
//! - A personal access token in `DIGITALOCEAN_ACCESS_TOKEN`
//!
//! # Example
//!
//! ```ignore
//! use snapshooter_cloud::CloudProvider;
//! use snapshooter_cloud_digitalocean::{DigitalOceanConfig, DigitalOceanProvider};
//!
//! let config = DigitalOceanConfig::from_env()?;
//! let provider = DigitalOceanProvider::new(config);
//!
//! for droplet in provider.list_droplets().await? {
//!     println!("{} ({})", droplet.name, droplet.id);
//! }
//! ```

pub mod client;
pub mod error;
pub mod provider;

pub use client::{DIGITALOCEAN_API_BASE, DigitalOceanClient, DigitalOceanConfig, TOKEN_ENV_VAR};
pub use error::{DigitalOceanError, Result};
pub use provider::DigitalOceanProvider;
