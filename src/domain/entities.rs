//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Maximum length of a name or title (the dashboard's input `maxLength`).
pub const DEFAULT_MAX_FIELD_LEN: usize = 100;

/// Unique identifier of a node in the org chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A person in the org chart, with their direct reports nested below.
///
/// Serialized with camelCase keys (`parentId`); `children` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgNode {
    pub id: NodeId,
    pub name: String,
    pub title: String,
    /// Manager's id, None for top-level nodes
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        title: impl Into<String>,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            title: title.into(),
            parent_id,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OrgNode>) -> Self {
        self.children = children;
        self
    }
}

impl fmt::Display for OrgNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.title)
    }
}

/// An `OrgNode` without children, annotated with its depth below the nearest root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    pub id: NodeId,
    pub name: String,
    pub title: String,
    pub parent_id: Option<NodeId>,
    pub level: usize,
}

impl FlatNode {
    pub fn from_node(node: &OrgNode, level: usize) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            title: node.title.clone(),
            parent_id: node.parent_id.clone(),
            level,
        }
    }

    /// Fresh node record without children.
    pub fn to_node(&self) -> OrgNode {
        OrgNode::new(
            self.id.clone(),
            self.name.clone(),
            self.title.clone(),
            self.parent_id.clone(),
        )
    }
}

/// Name and title that passed validation, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFields {
    pub name: String,
    pub title: String,
}

/// Pending add/edit input, staged separately from the committed forest.
///
/// Dropping or clearing a draft never touches the forest.
///
/// ```
/// use orgtree::domain::NodeDraft;
///
/// let draft = NodeDraft::new().name("Eve").title("Designer").parent("1");
/// assert_eq!(draft.parent_id.as_ref().map(|p| p.as_str()), Some("1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDraft {
    pub name: String,
    pub title: String,
    pub parent_id: Option<NodeId>,
}

impl NodeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft prefilled from an existing node, as when opening the edit form.
    pub fn for_edit(node: &FlatNode) -> Self {
        Self {
            name: node.name.clone(),
            title: node.title.clone(),
            parent_id: node.parent_id.clone(),
        }
    }

    /// Empty draft that will be added below `parent_id`.
    pub fn under(parent_id: Option<NodeId>) -> Self {
        Self {
            parent_id,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn parent(mut self, parent_id: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Trim name and title and check them against `max_len`.
    pub fn validate(&self, max_len: usize) -> DomainResult<ValidFields> {
        Ok(ValidFields {
            name: check_field("name", &self.name, max_len)?,
            title: check_field("title", &self.title, max_len)?,
        })
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    let actual = trimmed.chars().count();
    if actual > max {
        return Err(DomainError::FieldTooLong { field, max, actual });
    }
    Ok(trimmed.to_string())
}

/// What a subtree deletion would remove, for the confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan {
    pub node_id: NodeId,
    pub name: String,
    pub title: String,
    /// Number of transitive reports removed along with the node
    pub descendant_count: usize,
    /// The node itself followed by all of its descendants
    pub removed: Vec<NodeId>,
}

impl DeletePlan {
    /// Warning line for the confirmation prompt, None when the node has no reports.
    pub fn warning(&self) -> Option<String> {
        match self.descendant_count {
            0 => None,
            1 => Some("This will also delete 1 subordinate".to_string()),
            n => Some(format!("This will also delete {} subordinates", n)),
        }
    }
}
