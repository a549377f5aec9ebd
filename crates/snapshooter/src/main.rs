mod commands;
mod progress;

use clap::{Parser, Subcommand};
use progress::SpinnerProgress;
use snapshooter_cloud::{CloudProvider, PollIntervals, Snapshooter};
use snapshooter_cloud_digitalocean::{DigitalOceanConfig, DigitalOceanProvider};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snapshooter", version)]
#[command(about = "Take, check and restore DigitalOcean droplet snapshots", long_about = None)]
struct Cli {
    /// Show debug logs on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage droplets
    #[command(subcommand)]
    Droplet(DropletCommands),
    /// Manage droplet snapshots
    #[command(subcommand)]
    Snapshot(SnapshotCommands),
}

#[derive(Subcommand)]
enum DropletCommands {
    /// List all droplets
    List,
    /// Destroy a droplet
    Destroy {
        /// Droplet ID
        droplet_id: String,
    },
}

#[derive(Subcommand)]
enum SnapshotCommands {
    /// Power a droplet off, snapshot it and power it back on
    Take {
        /// Droplet ID
        droplet_id: String,
    },
    /// Boot a throwaway droplet from a snapshot and destroy it again
    Check {
        /// Snapshot ID
        snapshot_id: String,
        /// Region for the check droplet (defaults to the configured region)
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Restore a droplet from a snapshot
    Restore {
        /// Droplet ID
        droplet_id: String,
        /// Snapshot ID
        snapshot_id: String,
    },
    /// Rebuild a droplet in place from a snapshot image
    Rebuild {
        /// Droplet ID
        droplet_id: String,
        /// Snapshot ID
        snapshot_id: String,
    },
    /// List the snapshots of a droplet
    List {
        /// Droplet ID
        droplet_id: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = snapshooter_config::load_settings()?;
    tracing::debug!("Using settings {:?}", settings);

    let config = DigitalOceanConfig::from_env()?.with_base_url(settings.api_url.as_str());
    let provider = DigitalOceanProvider::new(config);
    tracing::debug!("Using provider {}", provider.name());
    let progress = SpinnerProgress::new();
    let intervals = PollIntervals {
        action: settings.poll.action_interval(),
        snapshot: settings.poll.snapshot_interval(),
    };
    let workflows = Snapshooter::new(&provider, &progress, intervals);

    match cli.command {
        Commands::Droplet(command) => match command {
            DropletCommands::List => commands::droplet::list(&workflows).await,
            DropletCommands::Destroy { droplet_id } => {
                commands::droplet::destroy(&workflows, &droplet_id).await
            }
        },
        Commands::Snapshot(command) => match command {
            SnapshotCommands::Take { droplet_id } => {
                commands::snapshot::take(&workflows, &droplet_id).await
            }
            SnapshotCommands::Check {
                snapshot_id,
                region,
            } => {
                let region = region.unwrap_or_else(|| settings.region.clone());
                commands::snapshot::check(&workflows, &snapshot_id, &region).await
            }
            SnapshotCommands::Restore {
                droplet_id,
                snapshot_id,
            } => commands::snapshot::restore(&workflows, &droplet_id, &snapshot_id).await,
            SnapshotCommands::Rebuild {
                droplet_id,
                snapshot_id,
            } => commands::snapshot::rebuild(&workflows, &droplet_id, &snapshot_id).await,
            SnapshotCommands::List { droplet_id } => {
                commands::snapshot::list(&workflows, &droplet_id).await
            }
        },
    }
}
