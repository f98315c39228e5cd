//! Flatten/rebuild and ancestry queries over flat node lists.

use std::collections::{HashMap, HashSet};

use tracing::{instrument, trace};

use crate::domain::builder::ForestBuilder;
use crate::domain::entities::{FlatNode, NodeId, OrgNode};

/// Lowest accepted ceiling for ancestor walks.
///
/// Flatten, rebuild and rendering walk with explicit stacks, so depth is not
/// bounded by the call stack there. Serializing and dropping a nested
/// `OrgNode` still recurse once per level, so those are bounded by the
/// thread's stack size.
pub const MIN_DEPTH_CEILING: usize = 100;

/// Depth-first flattening: roots first, each subtree right after its parent.
pub fn flatten(forest: &[OrgNode]) -> Vec<FlatNode> {
    let mut flat = Vec::new();
    let mut stack: Vec<(&OrgNode, usize)> = forest.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, level)) = stack.pop() {
        flat.push(FlatNode::from_node(node, level));
        stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
    }
    flat
}

/// Rebuild the nested forest from flat records.
///
/// Children keep the relative order they have in `flat_nodes`. Nodes whose
/// parent is missing become roots.
#[instrument(level = "debug", skip_all, fields(nodes = flat_nodes.len()))]
pub fn rebuild(flat_nodes: &[FlatNode]) -> Vec<OrgNode> {
    ForestBuilder::new().build(flat_nodes).to_forest()
}

/// `id` followed by all of its transitive reports, in depth-first order.
///
/// Empty when `id` is not present.
pub fn descendant_closure(flat_nodes: &[FlatNode], id: &NodeId) -> Vec<NodeId> {
    if !flat_nodes.iter().any(|n| &n.id == id) {
        return Vec::new();
    }

    let mut children: HashMap<&NodeId, Vec<&NodeId>> = HashMap::new();
    for node in flat_nodes {
        if let Some(parent) = &node.parent_id {
            children.entry(parent).or_default().push(&node.id);
        }
    }

    let mut seen: HashSet<&NodeId> = HashSet::new();
    let mut closure = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        if !seen.insert(current) {
            continue;
        }
        closure.push(current.clone());
        if let Some(kids) = children.get(current) {
            stack.extend(kids.iter().rev());
        }
    }
    closure
}

/// Number of transitive reports of `id`, excluding `id` itself.
pub fn count_descendants(flat_nodes: &[FlatNode], id: &NodeId) -> usize {
    descendant_closure(flat_nodes, id).len().saturating_sub(1)
}

/// Parent lookup keyed by node id.
pub fn parent_map(flat_nodes: &[FlatNode]) -> HashMap<&NodeId, Option<&NodeId>> {
    flat_nodes
        .iter()
        .map(|n| (&n.id, n.parent_id.as_ref()))
        .collect()
}

/// True when `candidate` is `ancestor` itself or sits below it.
///
/// Walks the parent chain upward from `candidate`. A chain longer than
/// `max_depth` counts as a descendant.
pub fn is_same_or_descendant(
    parents: &HashMap<&NodeId, Option<&NodeId>>,
    ancestor: &NodeId,
    candidate: &NodeId,
    max_depth: usize,
) -> bool {
    let mut current = Some(candidate);
    let mut steps = 0;
    while let Some(id) = current {
        if id == ancestor {
            return true;
        }
        if steps >= max_depth {
            trace!("Ancestor walk from {} exceeded {} steps", candidate, max_depth);
            return true;
        }
        current = parents.get(id).copied().flatten();
        steps += 1;
    }
    false
}

/// Recompute every node's level from its ancestor chain.
///
/// Walks stop at a root, at a missing parent, at a repeated node, or at the
/// `max_depth` ceiling.
#[instrument(level = "trace", skip_all)]
pub fn recompute_levels(flat_nodes: &mut [FlatNode], max_depth: usize) {
    let levels: Vec<usize> = {
        let parents = parent_map(flat_nodes);
        flat_nodes
            .iter()
            .map(|node| {
                let mut visited: HashSet<&NodeId> = HashSet::from([&node.id]);
                let mut level = 0;
                let mut current = node.parent_id.as_ref();
                while let Some(parent) = current {
                    if level >= max_depth || !parents.contains_key(parent) || !visited.insert(parent)
                    {
                        break;
                    }
                    level += 1;
                    current = parents.get(parent).copied().flatten();
                }
                level
            })
            .collect()
    };
    for (node, level) in flat_nodes.iter_mut().zip(levels) {
        node.level = level;
    }
}

/// Level of the node with `id`, if present.
pub fn level_of(flat_nodes: &[FlatNode], id: &NodeId) -> Option<usize> {
    flat_nodes.iter().find(|n| &n.id == id).map(|n| n.level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<OrgNode> {
        vec![OrgNode::new("1", "A", "CEO", None).with_children(vec![OrgNode::new(
            "2",
            "B",
            "CTO",
            Some("1".into()),
        )
        .with_children(vec![OrgNode::new("3", "C", "Engineer", Some("2".into()))])])]
    }

    #[test]
    fn test_flatten_assigns_levels_in_preorder() {
        let flat = flatten(&chain());
        let summary: Vec<(&str, usize)> = flat.iter().map(|n| (n.id.as_str(), n.level)).collect();
        assert_eq!(summary, vec![("1", 0), ("2", 1), ("3", 2)]);
    }

    #[test]
    fn test_is_same_or_descendant_respects_ceiling() {
        let flat = flatten(&chain());
        let parents = parent_map(&flat);
        let root = NodeId::from("1");
        let leaf = NodeId::from("3");
        assert!(is_same_or_descendant(&parents, &root, &leaf, 100));
        assert!(!is_same_or_descendant(&parents, &leaf, &root, 100));
        // Ceiling reached before the root is found: treated as a descendant
        assert!(is_same_or_descendant(&parents, &NodeId::from("x"), &leaf, 1));
    }

    #[test]
    fn test_recompute_levels_stops_on_cycle() {
        let mut flat = vec![
            FlatNode {
                id: "a".into(),
                name: "A".into(),
                title: "T".into(),
                parent_id: Some("b".into()),
                level: 0,
            },
            FlatNode {
                id: "b".into(),
                name: "B".into(),
                title: "T".into(),
                parent_id: Some("a".into()),
                level: 0,
            },
        ];
        recompute_levels(&mut flat, 100);
        assert_eq!(flat[0].level, 1);
        assert_eq!(flat[1].level, 1);
    }
}
