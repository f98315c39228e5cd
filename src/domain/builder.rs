//! Forest builder: links flat node records into an arena-backed forest.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{ForestArena, NodeData};
use crate::domain::entities::FlatNode;

/// Constructs a `ForestArena` from flat node records.
///
/// Orphans (declared parent missing from the input) become roots with their
/// parent reference cleared. Nodes caught in a parent cycle are promoted the
/// same way, first one in input order, so every input node ends up in the
/// output exactly once.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    reachable: HashSet<Index>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip_all, fields(nodes = flat_nodes.len()))]
    pub fn build(&mut self, flat_nodes: &[FlatNode]) -> ForestArena {
        self.reachable.clear();
        let mut forest = ForestArena::new();

        let indices: Vec<Index> = flat_nodes
            .iter()
            .enumerate()
            .map(|entry| forest.insert_detached(NodeData::from(entry)))
            .collect();

        // Second pass so children keep input order regardless of where the parent appears
        for (&idx, flat) in indices.iter().zip(flat_nodes) {
            let parent = flat
                .parent_id
                .as_ref()
                .and_then(|pid| forest.find(pid))
                .filter(|&parent_idx| parent_idx != idx);
            if parent.is_none() {
                if let Some(pid) = &flat.parent_id {
                    debug!("Promoting orphan {} (missing parent {}) to root", flat.id, pid);
                    self.clear_parent_id(&mut forest, idx);
                }
            }
            forest.attach(idx, parent);
        }

        self.mark_reachable(&forest);
        for &idx in &indices {
            if self.reachable.contains(&idx) {
                continue;
            }
            if let Some(node) = forest.get_node(idx) {
                debug!("Breaking parent cycle at {}", node.data.id);
            }
            forest.detach(idx);
            self.clear_parent_id(&mut forest, idx);
            forest.attach(idx, None);
            self.mark_subtree(&forest, idx);
        }
        forest.sort_roots_by_position();

        forest
    }

    fn clear_parent_id(&self, forest: &mut ForestArena, idx: Index) {
        if let Some(node) = forest.get_node_mut(idx) {
            node.data.parent_id = None;
        }
    }

    fn mark_reachable(&mut self, forest: &ForestArena) {
        for &root in forest.roots() {
            self.mark_subtree(forest, root);
        }
    }

    fn mark_subtree(&mut self, forest: &ForestArena, start: Index) {
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if !self.reachable.insert(idx) {
                continue;
            }
            if let Some(node) = forest.get_node(idx) {
                stack.extend(node.children.iter().copied());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NodeId;

    fn flat(id: &str, parent: Option<&str>) -> FlatNode {
        FlatNode {
            id: NodeId::from(id),
            name: format!("name-{}", id),
            title: format!("title-{}", id),
            parent_id: parent.map(NodeId::from),
            level: 0,
        }
    }

    #[test]
    fn test_child_listed_before_parent_is_linked() {
        let nodes = vec![flat("2", Some("1")), flat("1", None)];
        let forest = ForestBuilder::new().build(&nodes);
        assert_eq!(forest.roots().len(), 1);
        assert_eq!(forest.depth(), 2);
    }

    #[test]
    fn test_parent_cycle_is_broken_without_losing_nodes() {
        let nodes = vec![flat("a", Some("b")), flat("b", Some("a")), flat("r", None)];
        let forest = ForestBuilder::new().build(&nodes);
        let trees = forest.to_forest();

        assert_eq!(forest.iter().count(), 3);
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[0].id.as_str(), "a");
        assert_eq!(trees[0].parent_id, None);
        assert_eq!(trees[0].children[0].id.as_str(), "b");
        assert_eq!(trees[1].id.as_str(), "r");
    }

    #[test]
    fn test_self_parent_becomes_root() {
        let nodes = vec![flat("x", Some("x"))];
        let trees = ForestBuilder::new().build(&nodes).to_forest();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].parent_id, None);
    }
}
