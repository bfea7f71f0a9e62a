//! Single-subnet calculation and splitting.

use crate::error::{CidrError, CidrResult};
use crate::models::{number_to_ip, Ipv4, SubnetInfo, MAX_LENGTH};
use uuid::Uuid;

/// Node budget for an interactively split tree.
pub const MAX_TREE_SIZE: usize = 10_000;

/// Calculate every derived field of a CIDR block.
///
/// A host address is accepted and normalized to its network address.
///
/// # Examples
/// ```
/// use cidr_subnet_planner::processing::calculate_subnet;
/// let s = calculate_subnet("192.168.1.77/24").unwrap();
/// assert_eq!(s.cidr, "192.168.1.0/24");
/// assert_eq!(s.usable_hosts, 254);
/// ```
pub fn calculate_subnet(cidr: &str) -> CidrResult<SubnetInfo> {
    let net = Ipv4::new(cidr)?;
    Ok(calculate_from_net(&net))
}

fn calculate_from_net(net: &Ipv4) -> SubnetInfo {
    let mask = net.mask();
    let (network, broadcast) = net.range();
    let total_hosts = net.size();

    // /32 is a single host, /31 is an RFC 3021 point-to-point pair.
    let (first_host, last_host, usable_hosts) = match net.prefix {
        MAX_LENGTH => (network, network, 1),
        31 => (network, broadcast, 2),
        _ => (network + 1, broadcast - 1, total_hosts - 2),
    };

    log::debug!(
        "calculate_subnet({net}) => {}/{} hosts={usable_hosts}/{total_hosts}",
        number_to_ip(network),
        net.prefix
    );

    SubnetInfo {
        id: Uuid::new_v4().to_string(),
        cidr: net.network().to_string(),
        prefix: net.prefix,
        network_address: number_to_ip(network),
        broadcast_address: number_to_ip(broadcast),
        first_host: number_to_ip(first_host),
        last_host: number_to_ip(last_host),
        total_hosts,
        usable_hosts,
        subnet_mask: number_to_ip(mask),
        wildcard_mask: number_to_ip(!mask),
        can_split: net.prefix < MAX_LENGTH,
        children: None,
        is_expanded: false,
    }
}

/// Split a subnet into its lower and upper halves.
///
/// `current_tree_size` is the caller's running count of materialized nodes;
/// the engine only checks it against [`MAX_TREE_SIZE`].
pub fn split_subnet(parent: &SubnetInfo, current_tree_size: usize) -> CidrResult<[SubnetInfo; 2]> {
    if parent.prefix >= MAX_LENGTH {
        return Err(CidrError::CannotSplit(parent.cidr.clone()));
    }
    if current_tree_size >= MAX_TREE_SIZE {
        log::warn!(
            "refusing to split {}: tree holds {current_tree_size} nodes",
            parent.cidr
        );
        return Err(CidrError::TreeSizeLimitExceeded {
            current: current_tree_size,
            limit: MAX_TREE_SIZE,
        });
    }

    let net = Ipv4::new(&parent.cidr)?.network();
    let child_prefix = net.prefix + 1;
    let lower = Ipv4::from_bits(u32::from(net.addr), child_prefix)?;
    let upper_addr = u32::from(net.addr) + (net.size() / 2) as u32;
    let upper = Ipv4::from_bits(upper_addr, child_prefix)?;

    log::debug!("split_subnet({net}) => {lower} + {upper}");
    Ok([
        calculate_subnet(&lower.to_string())?,
        calculate_subnet(&upper.to_string())?,
    ])
}
