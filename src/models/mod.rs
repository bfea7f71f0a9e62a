//! Domain models for the subnet planner.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Ipv4`] - IPv4 network with CIDR notation support
//! - [`SubnetInfo`] - calculated subnet record and split tree node
//! - [`DeploymentTier`] and [`DeploymentTierConfig`] - tier presets
//! - [`NetworkPlan`] and friends - Kubernetes network plan types

mod ipv4;
mod plan;
mod subnet;
mod tier;

// Re-export public types
pub use ipv4::{
    align_up, block_size, broadcast_addr, cut_addr, ip_after_subnet, ip_to_number,
    mask_to_prefix, number_to_ip, parse_prefix, prefix_to_mask, Ipv4, MAX_LENGTH,
};
pub use plan::{
    CidrBlock, NetworkPlan, PlanMetadata, PlanRequest, PlanSubnets, PlannedSubnet, Provider,
    SubnetType, PLAN_VERSION,
};
pub use subnet::SubnetInfo;
pub use tier::{DeploymentTier, DeploymentTierConfig};
