//! Classful address labels.

use crate::error::CidrResult;
use crate::models::{ip_to_number, Ipv4};
use serde::Serialize;
use std::fmt;

/// Historical address class, taken from the first octet only.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetClass {
    A,
    B,
    C,
    D,
    E,
    /// First octet 0 or 127 (this-network and loopback).
    Unclassified,
}

impl SubnetClass {
    pub fn from_first_octet(octet: u8) -> SubnetClass {
        match octet {
            1..=126 => SubnetClass::A,
            128..=191 => SubnetClass::B,
            192..=223 => SubnetClass::C,
            224..=239 => SubnetClass::D,
            240..=255 => SubnetClass::E,
            _ => SubnetClass::Unclassified,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubnetClass::A => "A",
            SubnetClass::B => "B",
            SubnetClass::C => "C",
            SubnetClass::D => "D (Multicast)",
            SubnetClass::E => "E (Reserved)",
            SubnetClass::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for SubnetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Class of the supplied address, ignoring the prefix length.
///
/// Accepts a CIDR string or a bare dotted-quad address.
pub fn get_subnet_class(cidr_or_ip: &str) -> CidrResult<SubnetClass> {
    let addr = if cidr_or_ip.contains('/') {
        u32::from(Ipv4::new(cidr_or_ip)?.addr)
    } else {
        ip_to_number(cidr_or_ip)?
    };
    Ok(SubnetClass::from_first_octet((addr >> 24) as u8))
}
