//! Deployment tier presets.
//!
//! The table is static and read-only; every tier's subnets fit a VPC at
//! exactly its `min_vpc_prefix`.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named deployment-size preset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTier {
    Micro,
    Standard,
    Professional,
    Enterprise,
    Hyperscale,
}

/// Sizing policy for one tier.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTierConfig {
    pub public_subnets: usize,
    pub private_subnets: usize,
    pub public_subnet_size: u8,
    pub private_subnet_size: u8,
    pub pods_prefix: u8,
    pub services_prefix: u8,
    pub min_vpc_prefix: u8,
    pub description: &'static str,
}

const MICRO: DeploymentTierConfig = DeploymentTierConfig {
    public_subnets: 1,
    private_subnets: 1,
    public_subnet_size: 26,
    private_subnet_size: 25,
    pods_prefix: 20,
    services_prefix: 22,
    min_vpc_prefix: 24,
    description: "Development and testing: single zone, a handful of nodes",
};

const STANDARD: DeploymentTierConfig = DeploymentTierConfig {
    public_subnets: 1,
    private_subnets: 1,
    public_subnet_size: 24,
    private_subnet_size: 23,
    pods_prefix: 16,
    services_prefix: 20,
    min_vpc_prefix: 22,
    description: "Small production workloads: single zone, up to ~50 nodes",
};

const PROFESSIONAL: DeploymentTierConfig = DeploymentTierConfig {
    public_subnets: 2,
    private_subnets: 2,
    public_subnet_size: 24,
    private_subnet_size: 22,
    pods_prefix: 16,
    services_prefix: 20,
    min_vpc_prefix: 20,
    description: "Production with high availability: two zones, up to ~200 nodes",
};

const ENTERPRISE: DeploymentTierConfig = DeploymentTierConfig {
    public_subnets: 3,
    private_subnets: 3,
    public_subnet_size: 23,
    private_subnet_size: 20,
    pods_prefix: 14,
    services_prefix: 16,
    min_vpc_prefix: 18,
    description: "Large production: three zones, up to ~1000 nodes",
};

const HYPERSCALE: DeploymentTierConfig = DeploymentTierConfig {
    public_subnets: 3,
    private_subnets: 3,
    public_subnet_size: 22,
    private_subnet_size: 19,
    pods_prefix: 13,
    services_prefix: 16,
    min_vpc_prefix: 16,
    description: "Very large multi-zone clusters: three zones, thousands of nodes",
};

impl DeploymentTier {
    /// All tiers, smallest first.
    pub const ALL: [DeploymentTier; 5] = [
        DeploymentTier::Micro,
        DeploymentTier::Standard,
        DeploymentTier::Professional,
        DeploymentTier::Enterprise,
        DeploymentTier::Hyperscale,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentTier::Micro => "micro",
            DeploymentTier::Standard => "standard",
            DeploymentTier::Professional => "professional",
            DeploymentTier::Enterprise => "enterprise",
            DeploymentTier::Hyperscale => "hyperscale",
        }
    }

    pub fn config(&self) -> &'static DeploymentTierConfig {
        match self {
            DeploymentTier::Micro => &MICRO,
            DeploymentTier::Standard => &STANDARD,
            DeploymentTier::Professional => &PROFESSIONAL,
            DeploymentTier::Enterprise => &ENTERPRISE,
            DeploymentTier::Hyperscale => &HYPERSCALE,
        }
    }
}

impl FromStr for DeploymentTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DeploymentTier::ALL
            .into_iter()
            .find(|tier| tier.name() == wanted)
            .ok_or_else(|| PlanError::InvalidDeploymentSize(s.to_string()))
    }
}

impl fmt::Display for DeploymentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
