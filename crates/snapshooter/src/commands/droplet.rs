use colored::Colorize;
use snapshooter_cloud::{Droplet, Snapshooter};

pub async fn list(workflows: &Snapshooter<'_>) -> anyhow::Result<()> {
    let droplets = workflows.list_droplets().await?;
    tracing::debug!("Fetched {} droplets", droplets.len());

    if droplets.is_empty() {
        println!("{}", "No droplets found".dimmed());
        return Ok(());
    }

    for droplet in &droplets {
        println!("{}", droplet_line(droplet));
    }
    Ok(())
}

/// Destroy a droplet; a failed destroy is reported, not returned
pub async fn destroy(workflows: &Snapshooter<'_>, droplet_id: &str) -> anyhow::Result<()> {
    let droplet = workflows.provider().get_droplet(droplet_id).await?;
    workflows.destroy_droplet(&droplet).await;
    Ok(())
}

/// `{name} ({ip}): {id}`
pub fn droplet_line(droplet: &Droplet) -> String {
    format!(
        "{} ({}): {}",
        droplet.name,
        droplet.ip_address.as_deref().unwrap_or("-"),
        droplet.id
    )
}
