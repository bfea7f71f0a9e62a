//! Availability-zone labels per provider.

use crate::config::PlannerConfig;
use crate::models::Provider;

/// Zone label for the subnet at `index` (0-based), cycling over
/// `config.zone_count` zones.
///
/// Public and private subnets at the same index get the same label.
pub fn availability_zone(provider: Provider, index: usize, config: &PlannerConfig) -> String {
    let zone = index % config.zone_count.max(1);
    let letter = (b'a' + (zone % 26) as u8) as char;
    let region = config.region(provider);
    match provider {
        Provider::Eks => format!("{region}{letter}"),
        Provider::Gke => format!("{region}-{letter}"),
        Provider::Aks => format!("{region}-{}", zone + 1),
        Provider::Kubernetes => format!("zone-{}", zone + 1),
    }
}
