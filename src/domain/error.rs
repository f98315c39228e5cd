//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::NodeId;

/// Domain errors represent rejected editor operations.
///
/// Every variant leaves the forest untouched: operations take the forest by
/// reference and only hand back a new one on success.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} is too long: {actual} characters (max {max})")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("cannot move {node} under {new_parent}: would create a cycle")]
    CyclicMove { node: NodeId, new_parent: NodeId },

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("id generator produced an id already in use: {0}")]
    IdCollision(NodeId),
}

impl DomainError {
    /// True for rejected user input (empty or over-long fields).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyField { .. } | DomainError::FieldTooLong { .. }
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
