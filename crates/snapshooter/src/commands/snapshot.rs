use colored::Colorize;
use snapshooter_cloud::{Snapshooter, Snapshot};

pub async fn take(workflows: &Snapshooter<'_>, droplet_id: &str) -> anyhow::Result<()> {
    let name = workflows.take_snapshot(droplet_id).await?;
    println!();
    println!("{}", format!("Snapshot {} taken", name).green().bold());
    Ok(())
}

pub async fn check(
    workflows: &Snapshooter<'_>,
    snapshot_id: &str,
    region: &str,
) -> anyhow::Result<()> {
    let check = workflows.check_snapshot(snapshot_id, region).await?;

    println!();
    println!(
        "{}",
        format!(
            "Snapshot {} booted as {} ({}) in {}",
            check.snapshot.name, check.droplet.name, check.size, region
        )
        .green()
        .bold()
    );
    if !check.destroyed {
        println!(
            "{}",
            format!(
                "Droplet {} ({}) is still running and must be removed by hand",
                check.droplet.name, check.droplet.id
            )
            .yellow()
        );
    }
    Ok(())
}

pub async fn restore(
    workflows: &Snapshooter<'_>,
    droplet_id: &str,
    snapshot_id: &str,
) -> anyhow::Result<()> {
    workflows.restore_snapshot(droplet_id, snapshot_id).await?;
    Ok(())
}

pub async fn rebuild(
    workflows: &Snapshooter<'_>,
    droplet_id: &str,
    snapshot_id: &str,
) -> anyhow::Result<()> {
    workflows.rebuild_droplet(droplet_id, snapshot_id).await?;
    Ok(())
}

pub async fn list(workflows: &Snapshooter<'_>, droplet_id: &str) -> anyhow::Result<()> {
    let snapshots = workflows.list_snapshots(droplet_id).await?;

    if snapshots.is_empty() {
        println!("{}", format!("No snapshots of droplet {}", droplet_id).dimmed());
        return Ok(());
    }

    for snapshot in &snapshots {
        println!("{}", snapshot_line(snapshot));
    }
    Ok(())
}

/// `{name} ({id}): {size} GB (status: {status})`
pub fn snapshot_line(snapshot: &Snapshot) -> String {
    format!(
        "{} ({}): {} GB (status: {})",
        snapshot.name, snapshot.id, snapshot.size_gigabytes, snapshot.status
    )
}
