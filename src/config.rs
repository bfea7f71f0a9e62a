//! Runtime configuration read from the environment.
//!
//! `dotenv::dotenv()` is called by the binary before [`PlannerConfig::from_env`],
//! so values may also come from a `.env` file.

use crate::models::Provider;
use crate::output::OutputFormat;
use std::collections::HashMap;

pub const DEFAULT_EKS_REGION: &str = "us-east-1";
pub const DEFAULT_GKE_REGION: &str = "us-central1";
pub const DEFAULT_AKS_REGION: &str = "eastus";
pub const DEFAULT_ZONE_COUNT: usize = 3;
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Letters available for zone suffixes.
const MAX_ZONE_COUNT: usize = 26;

/// Provider regions and output defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub eks_region: String,
    pub gke_region: String,
    pub aks_region: String,
    /// Zones cycled through when labelling subnets.
    pub zone_count: usize,
    pub log_config: String,
    pub output_format: OutputFormat,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            eks_region: DEFAULT_EKS_REGION.to_string(),
            gke_region: DEFAULT_GKE_REGION.to_string(),
            aks_region: DEFAULT_AKS_REGION.to_string(),
            zone_count: DEFAULT_ZONE_COUNT,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
            output_format: OutputFormat::Json,
        }
    }
}

impl PlannerConfig {
    /// Build from the process environment.
    pub fn from_env() -> PlannerConfig {
        PlannerConfig::from_vars(std::env::vars().collect())
    }

    /// Build from an explicit variable map. Invalid values keep their default.
    pub fn from_vars(vars: HashMap<String, String>) -> PlannerConfig {
        let mut config = PlannerConfig::default();
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(region) = get("PLANNER_EKS_REGION") {
            config.eks_region = region;
        }
        if let Some(region) = get("PLANNER_GKE_REGION") {
            config.gke_region = region;
        }
        if let Some(region) = get("PLANNER_AKS_REGION") {
            config.aks_region = region;
        }
        if let Some(count) = get("PLANNER_ZONE_COUNT") {
            match count.parse::<usize>() {
                Ok(n) if (1..=MAX_ZONE_COUNT).contains(&n) => config.zone_count = n,
                _ => log::warn!(
                    "PLANNER_ZONE_COUNT={count} is not in 1-{MAX_ZONE_COUNT}, using {}",
                    config.zone_count
                ),
            }
        }
        if let Some(path) = get("PLANNER_LOG_CONFIG") {
            config.log_config = path;
        }
        if let Some(format) = get("PLANNER_OUTPUT_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(f) => config.output_format = f,
                Err(e) => log::warn!("PLANNER_OUTPUT_FORMAT: {e}, using json"),
            }
        }

        log::debug!("config: {config:?}");
        config
    }

    /// Region used for a provider's zone labels; empty for generic clusters.
    pub fn region(&self, provider: Provider) -> &str {
        match provider {
            Provider::Eks => &self.eks_region,
            Provider::Gke => &self.gke_region,
            Provider::Aks => &self.aks_region,
            Provider::Kubernetes => "",
        }
    }
}
