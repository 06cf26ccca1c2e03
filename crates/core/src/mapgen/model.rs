//! Public data models for generated floors: nodes, layouts, and generation outcomes.

use std::collections::BTreeMap;
use std::iter;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{NodeCategory, NodeId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub category: NodeCategory,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub difficulty: u32,
    pub row: usize,
    /// Horizontal slot used for proximity ranking, spread across `[0, 2]`.
    pub column: f64,
    pub paths: Vec<NodeId>,
    pub visited: bool,
}

impl Node {
    /// Appends an edge unless the destination is already present.
    pub fn link(&mut self, target: &NodeId) -> bool {
        if self.paths.contains(target) {
            return false;
        }
        self.paths.push(target.clone());
        true
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub floor: u32,
    pub start: Node,
    pub nodes: BTreeMap<NodeId, Node>,
    pub boss: Option<Node>,
}

impl Layout {
    /// Looks an id up across start, intermediate nodes, and boss.
    pub fn node(&self, id: &str) -> Option<&Node> {
        if self.start.id.as_str() == id {
            return Some(&self.start);
        }
        if let Some(node) = self.nodes.get(id) {
            return Some(node);
        }
        self.boss.as_ref().filter(|boss| boss.id.as_str() == id)
    }

    /// Number of intermediate rows, excluding start and boss.
    pub fn row_count(&self) -> usize {
        self.nodes.values().map(|node| node.row).max().unwrap_or(0)
    }

    /// Nodes of one intermediate row ordered by column.
    pub fn row(&self, row: usize) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().filter(|node| node.row == row).collect();
        nodes.sort_by(|left, right| left.column.total_cmp(&right.column));
        nodes
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        iter::once(&self.start).chain(self.nodes.values()).chain(self.boss.iter())
    }

    pub fn edge_count(&self) -> usize {
        self.all_nodes().map(|node| node.paths.len()).sum()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.floor.to_le_bytes());
        bytes.extend((self.nodes.len() as u32).to_le_bytes());
        bytes.push(u8::from(self.boss.is_some()));
        for node in self.all_nodes() {
            push_str(&mut bytes, node.id.as_str());
            push_str(&mut bytes, node.category.as_str());
            push_str(&mut bytes, &node.title);
            push_str(&mut bytes, node.description.as_deref().unwrap_or(""));
            bytes.extend(node.difficulty.to_le_bytes());
            bytes.extend((node.row as u32).to_le_bytes());
            bytes.extend(node.column.to_bits().to_le_bytes());
            bytes.push(u8::from(node.visited));
            bytes.extend((node.paths.len() as u32).to_le_bytes());
            for target in &node.paths {
                push_str(&mut bytes, target.as_str());
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_str(bytes: &mut Vec<u8>, value: &str) {
    bytes.extend((value.len() as u32).to_le_bytes());
    bytes.extend(value.as_bytes());
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// An attempt passed reachability validation unaided.
    Validated,
    /// Attempts ran out; start was linked directly to each listed node.
    Repaired { reconnected: Vec<NodeId> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedFloor {
    pub layout: Layout,
    pub attempts: u32,
    pub outcome: GenerationOutcome,
}

impl GeneratedFloor {
    pub fn was_repaired(&self) -> bool {
        matches!(self.outcome, GenerationOutcome::Repaired { .. })
    }
}
