//! Reachability certification for a finished layout.
//!
//! Traversal is read-only: `Node::visited` belongs to gameplay and is never touched here.

use std::collections::{BTreeSet, VecDeque};

use crate::types::NodeId;

use super::model::Layout;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityReport {
    pub visited: BTreeSet<NodeId>,
    /// Nodes (and the boss) that no path from start reaches, in layout order.
    pub unreachable: Vec<NodeId>,
    /// Edges whose destination does not exist in the layout, as `(source, target)`.
    pub dangling: Vec<(NodeId, NodeId)>,
}

impl ReachabilityReport {
    pub fn is_fully_reachable(&self) -> bool {
        self.unreachable.is_empty()
    }
}

pub fn inspect_reachability(layout: &Layout) -> ReachabilityReport {
    let mut visited = BTreeSet::from([layout.start.id.clone()]);
    let mut open = VecDeque::from([&layout.start]);
    let mut dangling = Vec::new();

    while let Some(node) = open.pop_front() {
        for target in &node.paths {
            let Some(next) = layout.node(target.as_str()) else {
                dangling.push((node.id.clone(), target.clone()));
                continue;
            };
            if visited.insert(next.id.clone()) {
                open.push_back(next);
            }
        }
    }

    let unreachable = layout
        .nodes
        .keys()
        .chain(layout.boss.as_ref().map(|boss| &boss.id))
        .filter(|id| !visited.contains(*id))
        .cloned()
        .collect();

    ReachabilityReport { visited, unreachable, dangling }
}

/// True when start reaches every node and, if present, the boss.
pub fn is_fully_reachable(layout: &Layout) -> bool {
    inspect_reachability(layout).is_fully_reachable()
}
