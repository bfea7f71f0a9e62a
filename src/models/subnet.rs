//! Calculated subnet record and its owned split tree.

use serde::{Deserialize, Serialize};

/// A calculated view of one CIDR block.
///
/// A parent exclusively owns its two halves once split; `is_expanded` is a
/// display flag only and never changes the calculated fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetInfo {
    /// Opaque token, unique per calculation.
    pub id: String,
    /// Canonical `network/prefix` form.
    pub cidr: String,
    pub prefix: u8,
    pub network_address: String,
    pub broadcast_address: String,
    pub first_host: String,
    pub last_host: String,
    pub total_hosts: u64,
    pub usable_hosts: u64,
    pub subnet_mask: String,
    pub wildcard_mask: String,
    pub can_split: bool,
    /// Lower and upper halves, present once split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Box<[SubnetInfo; 2]>>,
    #[serde(default)]
    pub is_expanded: bool,
}

impl SubnetInfo {
    pub fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Children visible in the tree: only when split and expanded.
    pub fn visible_children(&self) -> Option<&[SubnetInfo; 2]> {
        match &self.children {
            Some(children) if self.is_expanded => Some(children),
            _ => None,
        }
    }
}
