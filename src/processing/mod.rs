//! Subnet calculation and network planning logic.
//!
//! This module contains the engine's business logic:
//! - [`calculator`] - single-subnet calculation and splitting
//! - [`tree`] - split tree traversal and in-place edits
//! - [`class`] - classful address labels
//! - [`private`] - RFC 1918 block checks
//! - [`allocator`] - packing ranges inside a parent network
//! - [`zones`] - provider availability-zone labels
//! - [`plan`] - Kubernetes network plan generation

mod allocator;
mod calculator;
mod class;
mod plan;
mod private;
mod tree;
mod zones;

// Re-export public functions
pub use allocator::{find_free_range, SubnetAllocator};
pub use calculator::{calculate_subnet, split_subnet, MAX_TREE_SIZE};
pub use class::{get_subnet_class, SubnetClass};
pub use plan::{
    generate_kubernetes_network_plan, generate_kubernetes_network_plan_with_rng,
    get_deployment_tier_info, TierInfo,
};
pub use private::{is_rfc1918, PrivateBlock};
pub use tree::{collect_all_subnets, collect_visible_subnets, count_subnet_nodes, find_subnet_mut};
pub use zones::availability_zone;
