//! Org-chart editor operations.
//!
//! Each operation borrows the committed forest and returns a new one. On any
//! error the caller keeps its forest as it was.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::entities::{DeletePlan, FlatNode, NodeDraft, NodeId, OrgNode, DEFAULT_MAX_FIELD_LEN};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::forest::{
    descendant_closure, flatten, is_same_or_descendant, parent_map, rebuild, recompute_levels,
    MIN_DEPTH_CEILING,
};
use crate::domain::ids::IdGenerator;

/// Attempts at drawing an unused id before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Applies add/edit/delete/move to an org-chart forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgTreeEditor {
    max_depth: usize,
    max_field_len: usize,
}

impl Default for OrgTreeEditor {
    fn default() -> Self {
        Self::new(MIN_DEPTH_CEILING, DEFAULT_MAX_FIELD_LEN)
    }
}

impl OrgTreeEditor {
    /// `max_depth` is raised to `MIN_DEPTH_CEILING` if lower.
    pub fn new(max_depth: usize, max_field_len: usize) -> Self {
        Self {
            max_depth: max_depth.max(MIN_DEPTH_CEILING),
            max_field_len,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn max_field_len(&self) -> usize {
        self.max_field_len
    }

    /// Add a node described by `draft`, returning its new id and the new forest.
    ///
    /// A parent id that is not in the forest yields a new root.
    #[instrument(level = "debug", skip(self, forest, ids))]
    pub fn add_node(
        &self,
        forest: &[OrgNode],
        draft: &NodeDraft,
        ids: &dyn IdGenerator,
    ) -> DomainResult<(NodeId, Vec<OrgNode>)> {
        let fields = draft.validate(self.max_field_len)?;
        let mut flat = flatten(forest);

        let id = self.fresh_id(&flat, ids)?;
        let level = draft
            .parent_id
            .as_ref()
            .and_then(|pid| flat.iter().find(|n| &n.id == pid))
            .map(|parent| parent.level + 1)
            .unwrap_or(0);

        debug!("Adding {} at level {}", id, level);
        flat.push(FlatNode {
            id: id.clone(),
            name: fields.name,
            title: fields.title,
            parent_id: draft.parent_id.clone(),
            level,
        });
        Ok((id, rebuild(&flat)))
    }

    /// Replace name and title of `id`. The draft's parent is ignored.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn edit_node(
        &self,
        forest: &[OrgNode],
        id: &NodeId,
        draft: &NodeDraft,
    ) -> DomainResult<Vec<OrgNode>> {
        let fields = draft.validate(self.max_field_len)?;
        let mut flat = flatten(forest);

        let node = flat
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound(id.clone()))?;
        node.name = fields.name;
        node.title = fields.title;

        Ok(rebuild(&flat))
    }

    /// Number of transitive reports of `id`.
    pub fn count_descendants(&self, forest: &[OrgNode], id: &NodeId) -> DomainResult<usize> {
        Ok(self.plan_delete(forest, id)?.descendant_count)
    }

    /// Describe what deleting `id` would remove, without removing anything.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn plan_delete(&self, forest: &[OrgNode], id: &NodeId) -> DomainResult<DeletePlan> {
        let flat = flatten(forest);
        let node = flat
            .iter()
            .find(|n| &n.id == id)
            .ok_or_else(|| DomainError::NodeNotFound(id.clone()))?;
        let removed = descendant_closure(&flat, id);

        Ok(DeletePlan {
            node_id: id.clone(),
            name: node.name.clone(),
            title: node.title.clone(),
            descendant_count: removed.len().saturating_sub(1),
            removed,
        })
    }

    /// Remove `id` and its whole reporting subtree.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn delete_subtree(&self, forest: &[OrgNode], id: &NodeId) -> DomainResult<Vec<OrgNode>> {
        let plan = self.plan_delete(forest, id)?;
        Ok(self.apply_delete(forest, &plan))
    }

    /// Commit a previously computed plan.
    pub fn apply_delete(&self, forest: &[OrgNode], plan: &DeletePlan) -> Vec<OrgNode> {
        let doomed: HashSet<&NodeId> = plan.removed.iter().collect();
        let remaining: Vec<FlatNode> = flatten(forest)
            .into_iter()
            .filter(|n| !doomed.contains(&n.id))
            .collect();
        debug!(
            "Deleted {} node(s), {} remaining",
            plan.removed.len(),
            remaining.len()
        );
        rebuild(&remaining)
    }

    /// Reparent `id` under `new_parent`, or make it a root when `new_parent` is None.
    ///
    /// Rejected with `CyclicMove` when `new_parent` is `id` or one of its reports.
    #[instrument(level = "debug", skip(self, forest))]
    pub fn move_node(
        &self,
        forest: &[OrgNode],
        id: &NodeId,
        new_parent: Option<&NodeId>,
    ) -> DomainResult<Vec<OrgNode>> {
        let mut flat = flatten(forest);
        if !flat.iter().any(|n| &n.id == id) {
            return Err(DomainError::NodeNotFound(id.clone()));
        }

        if let Some(target) = new_parent {
            if !flat.iter().any(|n| &n.id == target) {
                return Err(DomainError::NodeNotFound(target.clone()));
            }
            let parents = parent_map(&flat);
            if is_same_or_descendant(&parents, id, target, self.max_depth) {
                debug!("Rejecting move of {} under {}", id, target);
                return Err(DomainError::CyclicMove {
                    node: id.clone(),
                    new_parent: target.clone(),
                });
            }
        }

        if let Some(node) = flat.iter_mut().find(|n| &n.id == id) {
            node.parent_id = new_parent.cloned();
        }
        recompute_levels(&mut flat, self.max_depth);

        Ok(rebuild(&flat))
    }

    fn fresh_id(&self, flat: &[FlatNode], ids: &dyn IdGenerator) -> DomainResult<NodeId> {
        let mut candidate = ids.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !flat.iter().any(|n| n.id == candidate) {
                return Ok(candidate);
            }
            candidate = ids.next_id();
        }
        if flat.iter().any(|n| n.id == candidate) {
            return Err(DomainError::IdCollision(candidate));
        }
        Ok(candidate)
    }
}
