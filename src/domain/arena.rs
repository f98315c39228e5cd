use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::entities::{FlatNode, NodeId, OrgNode};

/// Data payload for forest nodes.
#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: NodeId,
    pub name: String,
    pub title: String,
    /// Declared manager id, None for roots
    pub parent_id: Option<NodeId>,
    /// Position in the input the arena was built from
    pub position: usize,
}

impl From<(usize, &FlatNode)> for NodeData {
    fn from((position, flat): (usize, &FlatNode)) -> Self {
        Self {
            id: flat.id.clone(),
            name: flat.name.clone(),
            title: flat.title.clone(),
            parent_id: flat.parent_id.clone(),
            position,
        }
    }
}

/// Tree node in the arena-based forest.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for roots and detached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena
    pub children: Vec<Index>,
}

/// Arena-based forest with O(1) lookups by index and by node id.
///
/// Nodes are inserted detached and linked afterwards, so input order
/// does not have to list parents before children.
#[derive(Debug, Default)]
pub struct ForestArena {
    arena: Arena<TreeNode>,
    roots: Vec<Index>,
    by_id: HashMap<NodeId, Index>,
}

impl ForestArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node that is neither a root nor anyone's child yet.
    ///
    /// A node with an id already present replaces the lookup entry; the
    /// earlier node stays in the arena.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_detached(&mut self, data: NodeData) -> Index {
        let id = data.id.clone();
        let position = data.position;
        let idx = self.arena.insert(TreeNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        if let Some(previous) = self.by_id.insert(id.clone(), idx) {
            let earlier = self.arena.get(previous).map(|n| n.data.position);
            debug!(
                "Duplicate id {} at position {} shadows the node at position {:?}",
                id, position, earlier
            );
        }
        idx
    }

    /// Link `idx` below `parent`, or make it a root when `parent` is None.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, idx: Index, parent: Option<Index>) {
        match parent {
            Some(parent_idx) => {
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    parent_node.children.push(idx);
                }
            }
            None => self.roots.push(idx),
        }
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = parent;
        }
    }

    /// Unlink `idx` from its parent (or from the root list).
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, idx: Index) {
        let parent = self.arena.get(idx).and_then(|n| n.parent);
        match parent {
            Some(parent_idx) => {
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    parent_node.children.retain(|&c| c != idx);
                }
            }
            None => self.roots.retain(|&r| r != idx),
        }
        if let Some(node) = self.arena.get_mut(idx) {
            node.parent = None;
        }
    }

    pub fn sort_roots_by_position(&mut self) {
        let arena = &self.arena;
        self.roots
            .sort_by_key(|&idx| arena.get(idx).map(|n| n.data.position).unwrap_or(usize::MAX));
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn find(&self, id: &NodeId) -> Option<Index> {
        self.by_id.get(id).copied()
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Preorder traversal over all roots, yielding each node with its level.
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 for an empty forest.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, _, level)| level + 1).max().unwrap_or(0)
    }

    /// Ids of all nodes without reports, in preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node, _)| node.children.is_empty())
            .map(|(_, node, _)| node.data.id.clone())
            .collect()
    }

    /// Materialize the nested forest, roots in arena order.
    #[instrument(level = "debug", skip(self))]
    pub fn to_forest(&self) -> Vec<OrgNode> {
        let mut forest = Vec::new();
        // Open ancestors of the current node; path[level] is at that level
        let mut path: Vec<OrgNode> = Vec::new();
        for (_, node, level) in self.iter() {
            while path.len() > level {
                close_last(&mut path, &mut forest);
            }
            path.push(OrgNode::new(
                node.data.id.clone(),
                node.data.name.clone(),
                node.data.title.clone(),
                node.data.parent_id.clone(),
            ));
        }
        while !path.is_empty() {
            close_last(&mut path, &mut forest);
        }
        forest
    }
}

/// Pop the deepest open node and hand it to its parent, or to `forest` at the top.
fn close_last(path: &mut Vec<OrgNode>, forest: &mut Vec<OrgNode>) {
    if let Some(done) = path.pop() {
        match path.last_mut() {
            Some(parent) => parent.children.push(done),
            None => forest.push(done),
        }
    }
}

pub struct ForestIterator<'a> {
    arena: &'a ForestArena,
    stack: Vec<(Index, usize)>,
}

impl<'a> ForestIterator<'a> {
    fn new(arena: &'a ForestArena) -> Self {
        // Roots in reverse so the first root is visited first
        let stack = arena.roots().iter().rev().map(|&r| (r, 0)).collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a TreeNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, level)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, level + 1));
                }
                return Some((current_idx, node, level));
            }
        }
        None
    }
}
