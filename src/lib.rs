//! CIDR subnet calculator and Kubernetes network planner.
//!
//! - [`models`] - address, subnet, tier and plan types
//! - [`processing`] - calculation, splitting and plan generation
//! - [`output`] - JSON/YAML/CSV/terminal rendering
//! - [`config`] - environment configuration
//! - [`input`] - plan request files
//!
//! Everything in the engine is synchronous and pure; the only randomness is
//! the VPC drawn for a plan request without one.

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

pub use config::PlannerConfig;
pub use error::{CidrError, PlanError};
pub use models::{NetworkPlan, PlanRequest, SubnetInfo};
pub use processing::{
    calculate_subnet, collect_all_subnets, collect_visible_subnets, count_subnet_nodes,
    generate_kubernetes_network_plan, get_deployment_tier_info, get_subnet_class, split_subnet,
};

/// Split every visible leaf of `root` `depth` levels deep.
///
/// `tree_size` is the caller's running node count and is updated as nodes
/// are added; splitting stops with an error once the budget is reached.
/// Leaves that cannot be split (a /32) are left as they are.
pub fn split_to_depth(
    root: &mut SubnetInfo,
    depth: usize,
    tree_size: &mut usize,
) -> Result<(), CidrError> {
    if depth == 0 || !root.can_split {
        return Ok(());
    }
    *tree_size += root.split_in_place(*tree_size)?;
    if let Some(children) = root.children.as_deref_mut() {
        for child in children.iter_mut() {
            split_to_depth(child, depth - 1, tree_size)?;
        }
    }
    Ok(())
}
