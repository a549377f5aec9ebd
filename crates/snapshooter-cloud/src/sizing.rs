//! Size selection for verification droplets

use crate::model::Size;

/// Pick the cheapest size that can boot an image
///
/// Only sizes with at least `min_disk` GB of disk that are offered in
/// `region` qualify. Among those the lowest hourly price wins; equal prices
/// keep the order the provider listed them in.
pub fn choose_size_slug(sizes: &[Size], min_disk: u64, region: &str) -> Option<String> {
    let mut candidates: Vec<&Size> = sizes
        .iter()
        .filter(|size| size.disk >= min_disk && size.regions.iter().any(|r| r == region))
        .collect();

    candidates.sort_by(|a, b| a.price_hourly.total_cmp(&b.price_hourly));

    candidates.first().map(|size| size.slug.clone())
}
