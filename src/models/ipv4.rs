//! IPv4 address and CIDR notation utilities.
//!
//! Provides the [`Ipv4`] network type plus the integer/mask conversions the
//! rest of the engine is built on.

use crate::error::{CidrError, CidrResult};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum prefix length for an IPv4 network (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Matches a plain base-10 token: no sign, no whitespace, no hex.
static DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();

fn decimal_regex() -> &'static Regex {
    DECIMAL_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Invalid Regex"))
}

/// Parse a dotted-quad address into its 32-bit value.
///
/// # Examples
/// ```
/// use cidr_subnet_planner::models::ip_to_number;
/// assert_eq!(ip_to_number("192.168.1.1").unwrap(), 0xC0A80101);
/// assert!(ip_to_number("256.0.0.1").is_err());
/// ```
pub fn ip_to_number(ip: &str) -> CidrResult<u32> {
    let ip = ip.trim();
    let octets: Vec<&str> = ip.split('.').collect();
    if octets.len() != 4 {
        return Err(CidrError::InvalidAddress(format!(
            "{ip}: expected 4 octets, got {}",
            octets.len()
        )));
    }

    let mut value: u32 = 0;
    for octet in octets {
        if !decimal_regex().is_match(octet) {
            return Err(CidrError::InvalidAddress(format!(
                "{ip}: octet '{octet}' is not a number"
            )));
        }
        // Long digit runs overflow u32 parsing, report them as out of range.
        let n: u32 = octet.parse().unwrap_or(u32::MAX);
        if n > 255 {
            return Err(CidrError::InvalidAddress(format!(
                "{ip}: octet {octet} is out of range 0-255"
            )));
        }
        value = (value << 8) | n;
    }
    Ok(value)
}

/// Format a 32-bit value as a dotted-quad address.
pub fn number_to_ip(n: u32) -> String {
    Ipv4Addr::from(n).to_string()
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cidr_subnet_planner::models::prefix_to_mask;
/// assert_eq!(prefix_to_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn prefix_to_mask(len: u8) -> CidrResult<u32> {
    if len > MAX_LENGTH {
        Err(CidrError::InvalidPrefix(format!(
            "/{len} is outside 0-{MAX_LENGTH}"
        )))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Convert a subnet mask back to its prefix length.
///
/// The mask must be a contiguous run of leading one-bits.
pub fn mask_to_prefix(mask: u32) -> CidrResult<u8> {
    let prefix = mask.leading_ones() as u8;
    if prefix_to_mask(prefix)? != mask {
        return Err(CidrError::InvalidPrefix(format!(
            "{} is not a contiguous subnet mask",
            number_to_ip(mask)
        )));
    }
    Ok(prefix)
}

/// Parse a prefix segment (the part after `/`).
pub fn parse_prefix(segment: &str) -> CidrResult<u8> {
    let segment = segment.trim();
    if !decimal_regex().is_match(segment) {
        return Err(CidrError::InvalidPrefix(format!(
            "'{segment}' is not a number"
        )));
    }
    match segment.parse::<u8>() {
        Ok(len) if len <= MAX_LENGTH => Ok(len),
        _ => Err(CidrError::InvalidPrefix(format!(
            "/{segment} is outside 0-{MAX_LENGTH}"
        ))),
    }
}

/// Get the network address bits for a given address and prefix length.
pub fn cut_addr(addr: u32, len: u8) -> CidrResult<u32> {
    Ok(addr & prefix_to_mask(len)?)
}

/// Calculate the broadcast address bits for a given address and prefix length.
pub fn broadcast_addr(addr: u32, len: u8) -> CidrResult<u32> {
    let mask = prefix_to_mask(len)?;
    Ok((addr & mask) | !mask)
}

/// Returns the first address after the network containing `addr`.
///
/// `None` when the network ends at 255.255.255.255.
pub fn ip_after_subnet(addr: u32, len: u8) -> Option<u32> {
    let network = cut_addr(addr, len).ok()?;
    network.checked_add(block_size(len) as u32)
}

/// Number of addresses in a network of the given prefix length.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// Round `addr` up to the next boundary of a `/len` network.
pub fn align_up(addr: u64, len: u8) -> u64 {
    let size = block_size(len);
    addr.div_ceil(size) * size
}

/// IPv4 network in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address as supplied (not necessarily the network address).
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl FromStr for Ipv4 {
    type Err = CidrError;

    fn from_str(s: &str) -> CidrResult<Ipv4> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    ///
    /// The address part is kept as supplied; use [`Ipv4::network`] for the
    /// normalized form.
    pub fn new(addr_cidr: &str) -> CidrResult<Ipv4> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(CidrError::InvalidCidrFormat(addr_cidr.to_string()));
        }
        let addr = ip_to_number(parts[0])?;
        let prefix = parse_prefix(parts[1])
            .map_err(|_| CidrError::InvalidCidrFormat(addr_cidr.to_string()))?;
        Ok(Ipv4 {
            addr: Ipv4Addr::from(addr),
            prefix,
        })
    }

    /// Build a network from raw address bits, normalizing to the network address.
    pub fn from_bits(addr: u32, prefix: u8) -> CidrResult<Ipv4> {
        Ok(Ipv4 {
            addr: Ipv4Addr::from(cut_addr(addr, prefix)?),
            prefix,
        })
    }

    /// Subnet mask bits for this prefix.
    pub fn mask(&self) -> u32 {
        prefix_to_mask(self.prefix).unwrap_or(u32::MAX)
    }

    /// The same network with the address normalized to the network address.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            prefix: self.prefix,
        }
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask())
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask())
    }

    /// Inclusive integer range covered by this network.
    pub fn range(&self) -> (u32, u32) {
        (u32::from(self.lo()), u32::from(self.hi()))
    }

    /// Number of addresses in the network.
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.lo() && ip <= self.hi()
    }

    /// True when `other` lies wholly inside this network.
    pub fn contains_net(&self, other: &Ipv4) -> bool {
        self.contains(other.lo()) && self.contains(other.hi())
    }

    /// True when the two address ranges share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }

    /// The network of the same size immediately after this one.
    pub fn next(&self) -> Option<Ipv4> {
        let addr = ip_after_subnet(u32::from(self.addr), self.prefix)?;
        Some(Ipv4 {
            addr: Ipv4Addr::from(addr),
            prefix: self.prefix,
        })
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_to_number() {
        assert_eq!(ip_to_number("0.0.0.0").unwrap(), 0);
        assert_eq!(ip_to_number("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(ip_to_number("10.0.0.1").unwrap(), 0x0A000001);
        assert_eq!(ip_to_number(" 192.168.1.0 ").unwrap(), 0xC0A80100);
    }

    #[test]
    fn test_ip_to_number_invalid() {
        for bad in [
            "10.0.0",
            "10.0.0.0.1",
            "10.0.0.256",
            "10.0.a.1",
            "10..0.1",
            "10.0.0.-1",
            "10.0.0.+1",
            "10.0.0.99999999999",
            "",
        ] {
            let err = ip_to_number(bad).unwrap_err();
            assert_eq!(err.code(), "INVALID_ADDRESS", "input {bad:?}");
        }
    }

    #[test]
    fn test_number_to_ip() {
        assert_eq!(number_to_ip(0), "0.0.0.0");
        assert_eq!(number_to_ip(0xC0A801FF), "192.168.1.255");
        assert_eq!(number_to_ip(u32::MAX), "255.255.255.255");
    }

    #[test]
    fn test_prefix_to_mask() {
        assert_eq!(prefix_to_mask(0).unwrap(), 0x00000000);
        assert_eq!(prefix_to_mask(8).unwrap(), 0xFF000000);
        assert_eq!(prefix_to_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(prefix_to_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(prefix_to_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(prefix_to_mask(33).is_err());
    }

    #[test]
    fn test_mask_to_prefix() {
        assert_eq!(mask_to_prefix(0).unwrap(), 0);
        assert_eq!(mask_to_prefix(0xFFFFFF00).unwrap(), 24);
        assert_eq!(mask_to_prefix(0xFFFFFFFE).unwrap(), 31);
        assert_eq!(mask_to_prefix(u32::MAX).unwrap(), 32);
        assert_eq!(
            mask_to_prefix(0xFF00FF00).unwrap_err().code(),
            "INVALID_PREFIX"
        );
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("0").unwrap(), 0);
        assert_eq!(parse_prefix("32").unwrap(), 32);
        assert!(parse_prefix("33").is_err());
        assert!(parse_prefix("-1").is_err());
        assert!(parse_prefix("abc").is_err());
        assert!(parse_prefix("").is_err());
    }

    #[test]
    fn test_cut_and_broadcast() {
        let ip = ip_to_number("192.168.1.42").unwrap();
        assert_eq!(number_to_ip(cut_addr(ip, 24).unwrap()), "192.168.1.0");
        assert_eq!(number_to_ip(cut_addr(ip, 16).unwrap()), "192.168.0.0");
        assert_eq!(number_to_ip(cut_addr(ip, 32).unwrap()), "192.168.1.42");
        assert_eq!(
            number_to_ip(broadcast_addr(ip, 24).unwrap()),
            "192.168.1.255"
        );
        assert_eq!(
            number_to_ip(broadcast_addr(ip, 8).unwrap()),
            "192.255.255.255"
        );
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = ip_to_number("192.168.1.0").unwrap();
        assert_eq!(
            number_to_ip(ip_after_subnet(ip, 24).unwrap()),
            "192.168.2.0"
        );
        assert_eq!(number_to_ip(ip_after_subnet(ip, 8).unwrap()), "193.0.0.0");
        assert_eq!(
            number_to_ip(ip_after_subnet(ip, 32).unwrap()),
            "192.168.1.1"
        );
        assert!(ip_after_subnet(u32::MAX, 24).is_none());
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 24), 0);
        assert_eq!(align_up(64, 25), 128);
        assert_eq!(align_up(128, 25), 128);
        assert_eq!(align_up(1, 0), 1u64 << 32);
    }

    #[test]
    fn test_ipv4_new() {
        let net = Ipv4::new("10.1.2.3/16").unwrap();
        assert_eq!(net.addr, Ipv4Addr::new(10, 1, 2, 3));
        assert_eq!(net.prefix, 16);
        assert_eq!(net.network().to_string(), "10.1.0.0/16");
        assert_eq!(net.hi(), Ipv4Addr::new(10, 1, 255, 255));

        assert_eq!(
            Ipv4::new("10.0.0.0").unwrap_err().code(),
            "INVALID_CIDR"
        );
        assert_eq!(
            Ipv4::new("10.0.0.0/8/9").unwrap_err().code(),
            "INVALID_CIDR"
        );
        assert_eq!(
            Ipv4::new("10.0.0.0/33").unwrap_err().code(),
            "INVALID_CIDR"
        );
        assert_eq!(
            Ipv4::new("10.0.0/8").unwrap_err().code(),
            "INVALID_ADDRESS"
        );
    }

    #[test]
    fn test_ip4_cmp_overlap() {
        let ip1 = Ipv4::new("10.0.10.0/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.0/8").unwrap();
        let ip3 = Ipv4::new("10.0.10.64/26").unwrap();
        let ip4 = Ipv4::new("10.0.11.0/24").unwrap();

        assert!(ip2.contains_net(&ip1));
        assert!(ip1.contains_net(&ip3));
        assert!(!ip3.contains_net(&ip1));
        assert!(ip1.overlaps(&ip3));
        assert!(ip3.overlaps(&ip1));
        assert!(!ip1.overlaps(&ip4));
        assert_eq!(ip2.hi(), Ipv4Addr::new(10, 255, 255, 255));
        assert_eq!(ip1.next(), Some(ip4));
    }

    #[test]
    fn test_serde_string_form() {
        let net = Ipv4::new("172.16.0.0/12").unwrap();
        let json = serde_json::to_string(&net).unwrap();
        assert_eq!(json, "\"172.16.0.0/12\"");
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, net);
        assert!(serde_json::from_str::<Ipv4>("\"172.16.0.0\"").is_err());
    }
}
