//! RFC 1918 private address blocks.

use crate::models::Ipv4;
use std::net::Ipv4Addr;

/// One of the three RFC 1918 blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivateBlock {
    /// 10.0.0.0/8
    Ten,
    /// 172.16.0.0/12
    OneSevenTwo,
    /// 192.168.0.0/16
    OneNineTwo,
}

impl PrivateBlock {
    /// Largest block first.
    pub const ALL: [PrivateBlock; 3] = [
        PrivateBlock::Ten,
        PrivateBlock::OneSevenTwo,
        PrivateBlock::OneNineTwo,
    ];

    pub fn net(&self) -> Ipv4 {
        match self {
            PrivateBlock::Ten => Ipv4 {
                addr: Ipv4Addr::new(10, 0, 0, 0),
                prefix: 8,
            },
            PrivateBlock::OneSevenTwo => Ipv4 {
                addr: Ipv4Addr::new(172, 16, 0, 0),
                prefix: 12,
            },
            PrivateBlock::OneNineTwo => Ipv4 {
                addr: Ipv4Addr::new(192, 168, 0, 0),
                prefix: 16,
            },
        }
    }
}

/// The private block wholly containing `net`, if any.
pub fn is_rfc1918(net: &Ipv4) -> Option<PrivateBlock> {
    PrivateBlock::ALL
        .into_iter()
        .find(|block| block.net().contains_net(net))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_of(cidr: &str) -> Option<PrivateBlock> {
        is_rfc1918(&Ipv4::new(cidr).unwrap().network())
    }

    #[test]
    fn test_private_blocks() {
        assert_eq!(block_of("10.0.0.0/16"), Some(PrivateBlock::Ten));
        assert_eq!(block_of("10.0.0.0/8"), Some(PrivateBlock::Ten));
        assert_eq!(block_of("172.31.255.0/24"), Some(PrivateBlock::OneSevenTwo));
        assert_eq!(block_of("192.168.10.0/24"), Some(PrivateBlock::OneNineTwo));
    }

    #[test]
    fn test_public_and_straddling() {
        assert_eq!(block_of("8.8.8.0/24"), None);
        assert_eq!(block_of("172.32.0.0/16"), None);
        assert_eq!(block_of("224.0.0.0/8"), None);
        assert_eq!(block_of("240.0.0.0/8"), None);
        // Starts inside 10/8 but the /7 spills past it.
        assert_eq!(block_of("10.0.0.0/7"), None);
        assert_eq!(block_of("192.168.0.0/15"), None);
    }
}
