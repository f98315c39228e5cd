//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use orgtree::domain::{flatten, rebuild, DeletePlan, FlatNode, IdGenerator, NodeId, OrgNode};
use orgtree::infrastructure::traits::Confirmer;

/// Alice (CEO) -> Bob (CTO) -> Charlie (Engineer), Alice -> Diana (CFO)
pub fn sample_forest() -> Vec<OrgNode> {
    vec![OrgNode::new("node-1", "Alice", "CEO", None).with_children(vec![
        OrgNode::new("node-2", "Bob", "CTO", Some("node-1".into())).with_children(vec![
            OrgNode::new("node-3", "Charlie", "Engineer", Some("node-2".into())),
        ]),
        OrgNode::new("node-4", "Diana", "CFO", Some("node-1".into())),
    ])]
}

/// A(1) -> B(2) -> C(3)
pub fn chain_forest() -> Vec<OrgNode> {
    vec![OrgNode::new("1", "A", "CEO", None).with_children(vec![OrgNode::new(
        "2",
        "B",
        "VP",
        Some("1".into()),
    )
    .with_children(vec![OrgNode::new("3", "C", "Engineer", Some("2".into()))])])]
}

/// Two independent trees plus a lone root.
pub fn wide_forest() -> Vec<OrgNode> {
    vec![
        OrgNode::new("a", "Ann", "Director", None).with_children(vec![
            OrgNode::new("a1", "Abe", "Manager", Some("a".into())).with_children(vec![
                OrgNode::new("a11", "Ada", "Analyst", Some("a1".into())),
                OrgNode::new("a12", "Al", "Analyst", Some("a1".into())),
            ]),
            OrgNode::new("a2", "Amy", "Manager", Some("a".into())),
        ]),
        OrgNode::new("b", "Ben", "Director", None).with_children(vec![OrgNode::new(
            "b1",
            "Bea",
            "Lead",
            Some("b".into()),
        )]),
        OrgNode::new("c", "Cid", "Advisor", None),
    ]
}

/// Single chain "0" -> "1" -> ... -> "<depth - 1>".
pub fn deep_chain(depth: usize) -> Vec<OrgNode> {
    let flat: Vec<FlatNode> = (0..depth)
        .map(|i| FlatNode {
            id: NodeId::new(i.to_string()),
            name: format!("N{}", i),
            title: "T".into(),
            parent_id: i.checked_sub(1).map(|p| NodeId::new(p.to_string())),
            level: i,
        })
        .collect();
    rebuild(&flat)
}

/// (id, parent, name, title) for every node, sorted by id.
pub fn signature(forest: &[OrgNode]) -> Vec<(String, Option<String>, String, String)> {
    let mut sig: Vec<_> = flatten(forest)
        .into_iter()
        .map(|n| {
            (
                n.id.to_string(),
                n.parent_id.map(|p| p.to_string()),
                n.name,
                n.title,
            )
        })
        .collect();
    sig.sort();
    sig
}

pub fn ids(forest: &[OrgNode]) -> Vec<String> {
    flatten(forest).into_iter().map(|n| n.id.to_string()).collect()
}

pub fn level(forest: &[OrgNode], id: &str) -> Option<usize> {
    flatten(forest)
        .into_iter()
        .find(|n| n.id.as_str() == id)
        .map(|n| n.level)
}

/// Ids "node-new-1", "node-new-2", ...
#[derive(Default)]
pub struct SequentialIds {
    counter: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> NodeId {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        NodeId::new(format!("node-new-{}", n))
    }
}

/// Always hands out the same id.
pub struct FixedId(pub &'static str);

impl IdGenerator for FixedId {
    fn next_id(&self) -> NodeId {
        NodeId::from(self.0)
    }
}

/// Answers with a fixed decision and records every plan it was shown.
pub struct MockConfirmer {
    answer: bool,
    pub seen: Mutex<Vec<DeletePlan>>,
}

impl MockConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Confirmer for MockConfirmer {
    fn confirm_delete(&self, plan: &DeletePlan) -> std::io::Result<bool> {
        self.seen.lock().unwrap().push(plan.clone());
        Ok(self.answer)
    }
}
