//! Terminal output utilities.
//!
//! Provides formatting helpers and a colored view of a split tree.

use crate::models::SubnetInfo;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Render the visible part of a split tree, one node per line, indented by depth.
///
/// Leaves are green, expanded parents blue, collapsed parents yellow.
pub fn render_tree(root: &SubnetInfo) -> String {
    let mut lines = Vec::new();
    render_node(root, 0, &mut lines);
    lines.join("\n")
}

fn render_node(node: &SubnetInfo, depth: usize, lines: &mut Vec<String>) {
    let marker = match (node.has_children(), node.is_expanded) {
        (false, _) => "-",
        (true, true) => "v",
        (true, false) => ">",
    };
    let cidr = format!("{:<18}", node.cidr);
    let cidr = match marker {
        "-" => cidr.green(),
        "v" => cidr.blue(),
        _ => cidr.yellow(),
    };
    lines.push(format!(
        "{indent}{marker} {cidr} {range} {hosts}",
        indent = "  ".repeat(depth),
        range = format_field(
            format!("{}-{}", node.first_host, node.last_host),
            33
        ),
        hosts = format_field(format!("{}_hosts", node.usable_hosts), 18),
    ));

    if let Some(children) = node.visible_children() {
        for child in children.iter() {
            render_node(child, depth + 1, lines);
        }
    }
}
