//! Subnet split tree: traversal and in-place edits.
//!
//! Traversals follow what the user sees: a node's children only count when
//! the node is expanded.

use super::calculator::split_subnet;
use crate::error::CidrResult;
use crate::models::SubnetInfo;

/// Number of visible nodes, `node` included.
pub fn count_subnet_nodes(node: &SubnetInfo) -> usize {
    1 + node
        .visible_children()
        .map(|children| children.iter().map(count_subnet_nodes).sum::<usize>())
        .unwrap_or(0)
}

/// Visible nodes in pre-order: parent first, then each child's subtree.
pub fn collect_all_subnets(node: &SubnetInfo) -> Vec<&SubnetInfo> {
    let mut out = Vec::new();
    collect_into(node, false, &mut out);
    out
}

/// Visible nodes, optionally suppressing expanded parents so only the
/// leaves of the current split remain.
pub fn collect_visible_subnets(node: &SubnetInfo, hide_parents: bool) -> Vec<&SubnetInfo> {
    let mut out = Vec::new();
    collect_into(node, hide_parents, &mut out);
    out
}

fn collect_into<'a>(node: &'a SubnetInfo, hide_parents: bool, out: &mut Vec<&'a SubnetInfo>) {
    match node.visible_children() {
        Some(children) => {
            if !hide_parents {
                out.push(node);
            }
            for child in children.iter() {
                collect_into(child, hide_parents, out);
            }
        }
        None => out.push(node),
    }
}

/// Find a node anywhere in the tree by id, collapsed branches included.
pub fn find_subnet_mut<'a>(node: &'a mut SubnetInfo, id: &str) -> Option<&'a mut SubnetInfo> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .as_deref_mut()?
        .iter_mut()
        .find_map(|child| find_subnet_mut(child, id))
}

impl SubnetInfo {
    /// Split this node into two owned halves and expand it.
    ///
    /// Returns how many nodes were added. A node already split is only
    /// re-expanded and nothing is added.
    pub fn split_in_place(&mut self, current_tree_size: usize) -> CidrResult<usize> {
        if self.children.is_some() {
            self.is_expanded = true;
            return Ok(0);
        }
        let children = split_subnet(self, current_tree_size)?;
        self.children = Some(Box::new(children));
        self.is_expanded = true;
        Ok(2)
    }

    /// Flip the display flag. No effect on a node without children.
    pub fn toggle_expanded(&mut self) -> bool {
        if self.children.is_some() {
            self.is_expanded = !self.is_expanded;
        }
        self.is_expanded
    }

    /// Drop both halves, merging the node back into a single block.
    ///
    /// Returns the number of nodes removed.
    pub fn join(&mut self) -> usize {
        let removed = self
            .children
            .take()
            .map(|children| children.iter().map(count_all_nodes).sum::<usize>())
            .unwrap_or(0);
        self.is_expanded = false;
        removed
    }
}

/// Every materialized node, collapsed branches included.
fn count_all_nodes(node: &SubnetInfo) -> usize {
    1 + node
        .children
        .as_deref()
        .map(|children| children.iter().map(count_all_nodes).sum::<usize>())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::calculate_subnet;

    fn cidrs(nodes: &[&SubnetInfo]) -> Vec<String> {
        nodes.iter().map(|n| n.cidr.clone()).collect()
    }

    /// 10.0.0.0/24 split once, lower half split again.
    fn sample_tree() -> SubnetInfo {
        let mut root = calculate_subnet("10.0.0.0/24").unwrap();
        root.split_in_place(1).unwrap();
        let lower = &mut root.children.as_mut().unwrap()[0];
        lower.split_in_place(3).unwrap();
        root
    }

    #[test]
    fn test_count_single() {
        let root = calculate_subnet("10.0.0.0/24").unwrap();
        assert_eq!(count_subnet_nodes(&root), 1);
        assert_eq!(cidrs(&collect_all_subnets(&root)), vec!["10.0.0.0/24"]);
        assert_eq!(
            cidrs(&collect_visible_subnets(&root, true)),
            vec!["10.0.0.0/24"]
        );
    }

    #[test]
    fn test_collect_all_preorder() {
        let root = sample_tree();
        assert_eq!(count_subnet_nodes(&root), 5);
        assert_eq!(
            cidrs(&collect_all_subnets(&root)),
            vec![
                "10.0.0.0/24",
                "10.0.0.0/25",
                "10.0.0.0/26",
                "10.0.0.64/26",
                "10.0.0.128/25"
            ]
        );
        assert_eq!(
            collect_visible_subnets(&root, false),
            collect_all_subnets(&root)
        );
    }

    #[test]
    fn test_collect_visible_leaves() {
        let root = sample_tree();
        assert_eq!(
            cidrs(&collect_visible_subnets(&root, true)),
            vec!["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/25"]
        );
    }

    #[test]
    fn test_collapsed_node_counts_once() {
        let mut root = sample_tree();
        root.children.as_mut().unwrap()[0].toggle_expanded();
        assert_eq!(count_subnet_nodes(&root), 3);
        assert_eq!(
            cidrs(&collect_visible_subnets(&root, true)),
            vec!["10.0.0.0/25", "10.0.0.128/25"]
        );

        root.toggle_expanded();
        assert_eq!(count_subnet_nodes(&root), 1);
        assert_eq!(collect_all_subnets(&root).len(), 1);
    }

    #[test]
    fn test_toggle_without_children() {
        let mut leaf = calculate_subnet("10.0.0.0/30").unwrap();
        assert!(!leaf.toggle_expanded());
        assert!(!leaf.is_expanded);
    }

    #[test]
    fn test_split_in_place_twice() {
        let mut root = calculate_subnet("10.0.0.0/24").unwrap();
        assert_eq!(root.split_in_place(1).unwrap(), 2);
        root.toggle_expanded();
        assert_eq!(root.split_in_place(3).unwrap(), 0);
        assert!(root.is_expanded);
    }

    #[test]
    fn test_join() {
        let mut root = sample_tree();
        assert_eq!(root.join(), 4);
        assert!(root.children.is_none());
        assert!(!root.is_expanded);
        assert_eq!(count_subnet_nodes(&root), 1);
    }

    #[test]
    fn test_find_subnet_mut() {
        let mut root = sample_tree();
        root.children.as_mut().unwrap()[0].toggle_expanded();
        let target = root.children.as_ref().unwrap()[0].children.as_ref().unwrap()[1]
            .id
            .clone();
        let node = find_subnet_mut(&mut root, &target).unwrap();
        assert_eq!(node.cidr, "10.0.0.64/26");
        node.split_in_place(5).unwrap();
        assert!(find_subnet_mut(&mut root, "missing").is_none());
    }
}
