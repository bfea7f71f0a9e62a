//! Kubernetes network plan generation.
//!
//! A plan is built entirely from the request, the static tier table and the
//! config. Only an omitted VPC CIDR draws on randomness.

use super::allocator::{find_free_range, SubnetAllocator};
use super::private::{is_rfc1918, PrivateBlock};
use super::zones::availability_zone;
use crate::config::PlannerConfig;
use crate::error::{PlanError, PlanResult};
use crate::models::{
    block_size, CidrBlock, DeploymentTier, DeploymentTierConfig, Ipv4, NetworkPlan, PlanMetadata,
    PlanRequest, PlanSubnets, PlannedSubnet, Provider, SubnetType, PLAN_VERSION,
};
use chrono::{SecondsFormat, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Result of a tier lookup: the whole table or one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierInfo {
    All,
    Single(DeploymentTier),
}

impl TierInfo {
    pub fn config(&self) -> Option<&'static DeploymentTierConfig> {
        match self {
            TierInfo::All => None,
            TierInfo::Single(tier) => Some(tier.config()),
        }
    }
}

impl Serialize for TierInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            // Map in tier order, smallest first.
            TierInfo::All => {
                let mut map = serializer.serialize_map(Some(DeploymentTier::ALL.len()))?;
                for tier in DeploymentTier::ALL {
                    map.serialize_entry(tier.name(), tier.config())?;
                }
                map.end()
            }
            TierInfo::Single(tier) => tier.config().serialize(serializer),
        }
    }
}

/// Look up the tier table, or one tier by name.
pub fn get_deployment_tier_info(tier: Option<&str>) -> PlanResult<TierInfo> {
    match tier {
        None => Ok(TierInfo::All),
        Some(name) => name
            .parse::<DeploymentTier>()
            .map(TierInfo::Single)
            .map_err(|_| PlanError::UnknownTier(name.to_string())),
    }
}

/// Generate a network plan, drawing a random VPC from private space when
/// the request has none.
pub fn generate_kubernetes_network_plan(
    request: &PlanRequest,
    config: &PlannerConfig,
) -> PlanResult<NetworkPlan> {
    generate_kubernetes_network_plan_with_rng(request, config, &mut rand::thread_rng())
}

/// Same as [`generate_kubernetes_network_plan`] with a caller-supplied
/// random source.
pub fn generate_kubernetes_network_plan_with_rng<R: Rng + ?Sized>(
    request: &PlanRequest,
    config: &PlannerConfig,
    rng: &mut R,
) -> PlanResult<NetworkPlan> {
    let tier: DeploymentTier = request.deployment_size.parse()?;
    let provider: Provider = match &request.provider {
        Some(p) => p.parse()?,
        None => Provider::default(),
    };
    let tier_config = tier.config();

    let vpc = match &request.vpc_cidr {
        Some(cidr) => resolve_vpc(cidr)?,
        None => {
            let vpc = random_vpc(tier_config, rng);
            log::info!("generated VPC {vpc} for {tier} tier");
            vpc
        }
    };

    if vpc.prefix > tier_config.min_vpc_prefix {
        log::warn!(
            "VPC {vpc} too small for {tier}: needs /{} or larger",
            tier_config.min_vpc_prefix
        );
        return Err(PlanError::InsufficientVpcSpace {
            cidr: vpc.to_string(),
            tier: tier.to_string(),
            prefix: vpc.prefix,
            min_prefix: tier_config.min_vpc_prefix,
        });
    }

    let subnets = allocate_subnets(&vpc, tier_config, provider, config)?;

    let vpc_block = is_rfc1918(&vpc);
    let pods = allocate_cluster_range("pods", tier_config.pods_prefix, vpc_block, &[vpc])?;
    let services = allocate_cluster_range(
        "services",
        tier_config.services_prefix,
        vpc_block,
        &[vpc, pods],
    )?;

    let plan = NetworkPlan {
        deployment_size: tier,
        provider,
        deployment_name: request.deployment_name.clone(),
        vpc: CidrBlock { cidr: vpc },
        subnets,
        pods: CidrBlock { cidr: pods },
        services: CidrBlock { cidr: services },
        metadata: PlanMetadata {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: PLAN_VERSION.to_string(),
        },
    };
    plan.validate()?;

    log::info!(
        "plan {tier}/{provider}: vpc={vpc} subnets={}+{} pods={pods} services={services}",
        plan.subnets.public.len(),
        plan.subnets.private.len()
    );
    Ok(plan)
}

/// Parse a caller VPC CIDR, normalize it and require RFC 1918 space.
fn resolve_vpc(cidr: &str) -> PlanResult<Ipv4> {
    let vpc = Ipv4::new(cidr)?.network();
    if is_rfc1918(&vpc).is_none() {
        log::warn!("rejecting non-private VPC CIDR {vpc}");
        return Err(PlanError::PublicCidrRejected(vpc.to_string()));
    }
    Ok(vpc)
}

/// Random VPC inside a randomly chosen private block.
fn random_vpc<R: Rng + ?Sized>(tier_config: &DeploymentTierConfig, rng: &mut R) -> Ipv4 {
    let block = PrivateBlock::ALL
        .choose(rng)
        .copied()
        .unwrap_or(PrivateBlock::Ten)
        .net();
    let prefix = tier_config.min_vpc_prefix.min(16).max(block.prefix);
    let slots = 1u64 << (prefix - block.prefix);
    let offset = rng.gen_range(0..slots) * block_size(prefix);
    Ipv4 {
        addr: (u32::from(block.lo()) + offset as u32).into(),
        prefix,
    }
}

fn allocate_subnets(
    vpc: &Ipv4,
    tier_config: &DeploymentTierConfig,
    provider: Provider,
    config: &PlannerConfig,
) -> PlanResult<PlanSubnets> {
    let mut allocator = SubnetAllocator::new(*vpc);
    let mut next_subnets = |subnet_type: SubnetType, count: usize, prefix: u8| {
        (0..count)
            .map(|i| -> PlanResult<PlannedSubnet> {
                let name = format!("{}-{}", subnet_type.name(), i + 1);
                let cidr = allocator.allocate(prefix).ok_or_else(|| {
                    PlanError::SubnetAllocationOverflow {
                        vpc: vpc.to_string(),
                        name: name.clone(),
                        prefix,
                    }
                })?;
                Ok(PlannedSubnet {
                    cidr,
                    name,
                    subnet_type,
                    availability_zone: availability_zone(provider, i, config),
                })
            })
            .collect::<PlanResult<Vec<_>>>()
    };

    let public = next_subnets(
        SubnetType::Public,
        tier_config.public_subnets,
        tier_config.public_subnet_size,
    )?;
    let private = next_subnets(
        SubnetType::Private,
        tier_config.private_subnets,
        tier_config.private_subnet_size,
    )?;
    Ok(PlanSubnets { public, private })
}

/// Blocks to try for pod/service ranges: the other private blocks largest
/// first, the VPC's own block last.
fn candidate_blocks(vpc_block: Option<PrivateBlock>) -> Vec<PrivateBlock> {
    let mut blocks: Vec<PrivateBlock> = PrivateBlock::ALL
        .into_iter()
        .filter(|b| Some(*b) != vpc_block)
        .collect();
    blocks.extend(vpc_block);
    blocks
}

fn allocate_cluster_range(
    purpose: &str,
    prefix: u8,
    vpc_block: Option<PrivateBlock>,
    taken: &[Ipv4],
) -> PlanResult<Ipv4> {
    candidate_blocks(vpc_block)
        .into_iter()
        .find_map(|block| find_free_range(&block.net(), prefix, taken))
        .ok_or_else(|| PlanError::AddressSpaceExhausted {
            purpose: purpose.to_string(),
            prefix,
        })
}
