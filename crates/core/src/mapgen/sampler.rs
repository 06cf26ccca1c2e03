//! Category roulette and per-category difficulty draws.

use rand_chacha::rand_core::Rng;

use crate::config::{NodeTypeConfig, NodeTypeTable};
use crate::error::GenerationError;
use crate::types::NodeCategory;

use super::seed::{random_u32, unit_f64};

/// Returned when every configured weight is zero.
pub const FALLBACK_CATEGORY: NodeCategory = NodeCategory::Question;

/// Cumulative-weight sampler over a category table, in table order.
#[derive(Clone, Debug)]
pub struct CategorySampler {
    entries: Vec<(NodeCategory, f64)>,
    total_weight: f64,
}

impl CategorySampler {
    /// Fails only when the table is empty; negative or non-finite weights count as zero.
    pub fn new(table: &NodeTypeTable) -> Result<Self, GenerationError> {
        if table.is_empty() {
            return Err(GenerationError::EmptyCategoryTable);
        }

        let entries: Vec<(NodeCategory, f64)> = table
            .iter()
            .map(|(category, config)| (category.clone(), sanitized_weight(category, config)))
            .collect();
        let total_weight: f64 = entries.iter().map(|(_, weight)| weight).sum();
        if total_weight <= 0.0 {
            tracing::warn!(
                fallback = %FALLBACK_CATEGORY,
                "all category weights are zero; sampling falls back to the default category"
            );
        }

        Ok(Self { entries, total_weight })
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NodeCategory {
        if self.total_weight <= 0.0 {
            return FALLBACK_CATEGORY;
        }

        let draw = unit_f64(rng) * self.total_weight;
        let mut cumulative = 0.0_f64;
        let mut last_positive = None;
        for (category, weight) in &self.entries {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += *weight;
            last_positive = Some(category);
            if draw <= cumulative {
                return category.clone();
            }
        }

        // Rounding can leave the draw a hair above the final cumulative sum.
        last_positive.cloned().unwrap_or(FALLBACK_CATEGORY)
    }
}

fn sanitized_weight(category: &NodeCategory, config: &NodeTypeConfig) -> f64 {
    let weight = config.weight;
    if weight.is_finite() && weight >= 0.0 {
        return weight;
    }
    tracing::warn!(%category, weight, "invalid category weight treated as zero");
    0.0
}

/// Draws a difficulty from the category's configured range, or its default.
pub fn assign_difficulty<R: Rng + ?Sized>(
    rng: &mut R,
    category: &NodeCategory,
    config: Option<&NodeTypeConfig>,
) -> u32 {
    match config.and_then(|config| config.difficulty_range) {
        Some(range) => {
            let (min, max) = range.normalized();
            random_u32(rng, min, max)
        }
        None => category.default_difficulty(),
    }
}
