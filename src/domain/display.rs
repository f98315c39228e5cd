//! Terminal rendering of org-chart forests.

use itertools::Itertools;
use termtree::Tree;

use crate::domain::entities::{FlatNode, OrgNode};

/// Shown instead of a tree when the org chart has no members.
pub const EMPTY_CHART_MESSAGE: &str =
    "No organization chart yet. Add your first team member to get started.";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for OrgNode {
    fn to_tree_string(&self) -> Tree<String> {
        // Preorder walk; `path` holds the open ancestors of the next node
        let mut stack = vec![(self, 0usize)];
        let mut path: Vec<Tree<String>> = Vec::new();
        while let Some((node, level)) = stack.pop() {
            while path.len() > level {
                close_last(&mut path);
            }
            path.push(Tree::new(node.to_string()));
            stack.extend(node.children.iter().rev().map(|c| (c, level + 1)));
        }
        while path.len() > 1 {
            close_last(&mut path);
        }
        path.pop().unwrap_or_else(|| Tree::new(self.to_string()))
    }
}

fn close_last(path: &mut Vec<Tree<String>>) {
    if path.len() < 2 {
        return;
    }
    if let (Some(done), Some(parent)) = (path.pop(), path.last_mut()) {
        parent.push(done);
    }
}

/// Render a forest under a single `header` node, one branch per root.
pub fn render_tree(forest: &[OrgNode], header: &str) -> Tree<String> {
    if forest.is_empty() {
        return Tree::new(EMPTY_CHART_MESSAGE.to_string());
    }
    Tree::new(header.to_string()).with_leaves(forest.iter().map(|root| root.to_tree_string()))
}

/// One line per node, indented two spaces per level.
pub fn render_flat(flat: &[FlatNode]) -> String {
    flat.iter()
        .map(|n| {
            format!(
                "{}{}  {} ({})  [{}]",
                "  ".repeat(n.level),
                n.level,
                n.name,
                n.title,
                n.id
            )
        })
        .join("\n")
}
