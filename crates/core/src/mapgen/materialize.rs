//! Turns a row plan into concrete, still unconnected, node records.

use rand_chacha::rand_core::Rng;

use crate::config::{BossConfig, NodeTypeTable};
use crate::types::{NodeCategory, NodeId};

use super::model::Node;
use super::sampler::{CategorySampler, assign_difficulty};
use super::titles::pick_title;

/// Nominal width the columns of every row are spread across.
const COLUMN_SPAN: f64 = 2.0;
const CENTER_COLUMN: f64 = COLUMN_SPAN / 2.0;

pub(super) fn column_for(slot: usize, row_width: usize) -> f64 {
    if row_width <= 1 {
        return slot as f64;
    }
    slot as f64 * (COLUMN_SPAN / (row_width - 1) as f64)
}

/// Builds rows `1..=plan.len()`; the returned vector is indexed from zero.
pub(super) fn materialize_rows<R: Rng + ?Sized>(
    rng: &mut R,
    plan: &[usize],
    node_types: &NodeTypeTable,
    sampler: &CategorySampler,
) -> Vec<Vec<Node>> {
    plan.iter()
        .enumerate()
        .map(|(index, &row_width)| {
            let row = index + 1;
            (0..row_width)
                .map(|slot| {
                    let category = sampler.sample(rng);
                    let difficulty = assign_difficulty(rng, &category, node_types.get(&category));
                    let title = pick_title(rng, &category);
                    Node {
                        id: NodeId::grid(row, slot),
                        category,
                        title,
                        description: None,
                        difficulty,
                        row,
                        column: column_for(slot, row_width),
                        paths: Vec::new(),
                        visited: false,
                    }
                })
                .collect()
        })
        .collect()
}

pub(super) fn start_node() -> Node {
    Node {
        id: NodeId::start(),
        category: NodeCategory::Start,
        title: "Start".to_string(),
        description: None,
        difficulty: 0,
        row: 0,
        column: CENTER_COLUMN,
        paths: Vec::new(),
        visited: false,
    }
}

pub(super) fn boss_node(config: &BossConfig, row: usize) -> Node {
    Node {
        id: NodeId::boss(),
        category: NodeCategory::Boss,
        title: config.name.clone(),
        description: Some(config.description.clone()).filter(|text| !text.is_empty()),
        difficulty: config.difficulty,
        row,
        column: CENTER_COLUMN,
        paths: Vec::new(),
        visited: false,
    }
}
