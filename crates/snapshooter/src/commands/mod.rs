pub mod droplet;
pub mod snapshot;
