//! Domain layer: entities and editor logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod editor;
pub mod entities;
pub mod error;
pub mod forest;
pub mod ids;

pub use arena::{ForestArena, NodeData, TreeNode};
pub use builder::ForestBuilder;
pub use display::{render_flat, render_tree, TreeNodeConvert, EMPTY_CHART_MESSAGE};
pub use editor::OrgTreeEditor;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use forest::{count_descendants, descendant_closure, flatten, rebuild, MIN_DEPTH_CEILING};
pub use ids::{IdGenerator, UuidGenerator};
