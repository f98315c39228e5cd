//! Node id generation

use uuid::Uuid;

use crate::domain::entities::NodeId;

/// Source of fresh node ids, supplied by the caller of the editor.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> NodeId;
}

/// Random UUID v4 ids.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> NodeId {
        NodeId::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_yields_distinct_ids() {
        let ids = UuidGenerator;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
