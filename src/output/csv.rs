//! CSV export of calculated subnets.

use crate::models::SubnetInfo;
use itertools::Itertools;

/// Column order of the export.
pub const CSV_HEADER: [&str; 10] = [
    "cidr",
    "networkAddress",
    "broadcastAddress",
    "firstHost",
    "lastHost",
    "usableHosts",
    "totalHosts",
    "subnetMask",
    "wildcardMask",
    "prefix",
];

/// Render subnets as CSV: a header line, then one row per subnet.
pub fn subnets_to_csv<'a, I>(subnets: I) -> String
where
    I: IntoIterator<Item = &'a SubnetInfo>,
{
    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    for subnet in subnets {
        out.push_str(&csv_row(subnet));
        out.push('\n');
    }
    out
}

fn csv_row(s: &SubnetInfo) -> String {
    [
        s.cidr.clone(),
        s.network_address.clone(),
        s.broadcast_address.clone(),
        s.first_host.clone(),
        s.last_host.clone(),
        s.usable_hosts.to_string(),
        s.total_hosts.to_string(),
        s.subnet_mask.clone(),
        s.wildcard_mask.clone(),
        s.prefix.to_string(),
    ]
    .iter()
    .map(|field| escape_csv_field(field))
    .join(",")
}

/// Quote a field when it holds a comma or double quote.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        // Double any embedded quotes; no space after the comma, excel dislikes it.
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}
