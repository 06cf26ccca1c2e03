//! Regeneration controller: builds, validates, and retries floors until one
//! passes reachability or the attempt budget runs out.

use rand_chacha::rand_core::Rng;

use crate::config::{FloorConfig, GeneratorSettings};
use crate::error::GenerationError;
use crate::types::NodeId;

use super::connect::{ConnectorTuning, connect_floor};
use super::layout::plan_rows;
use super::materialize::{boss_node, materialize_rows, start_node};
use super::model::{GeneratedFloor, GenerationOutcome, Layout};
use super::sampler::CategorySampler;
use super::seed::random_usize;
use super::validate::{inspect_reachability, is_fully_reachable};

#[derive(Clone, Debug, Default)]
pub struct FloorGenerator {
    settings: GeneratorSettings,
}

enum Phase {
    Attempting { attempt: u32 },
    Retrying { attempt: u32, layout: Layout, unreachable: Vec<NodeId> },
}

impl FloorGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings: settings.validated() }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generates one floor, drawing all randomness from `rng`.
    ///
    /// Configuration errors fail immediately. An unreachable layout is rebuilt
    /// from scratch up to `max_attempts` times; after that the last layout is
    /// repaired by linking start to every unreachable node, which the returned
    /// [`GenerationOutcome`] reports.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        floor: u32,
        config: &FloorConfig,
        rng: &mut R,
    ) -> Result<GeneratedFloor, GenerationError> {
        let _span = tracing::debug_span!("generate_floor", floor).entered();

        let sampler = CategorySampler::new(&config.node_types)?;
        let node_count = config.node_count.normalized();
        if node_count.1 > self.settings.max_floor_nodes {
            return Err(GenerationError::NodeCountTooLarge {
                requested: node_count.1,
                ceiling: self.settings.max_floor_nodes,
            });
        }

        let mut phase = Phase::Attempting { attempt: 1 };
        loop {
            phase = match phase {
                Phase::Attempting { attempt } => {
                    tracing::debug!(attempt, "building floor layout");
                    let layout = self.build_layout(rng, floor, config, &sampler, node_count)?;
                    let report = inspect_reachability(&layout);
                    if report.is_fully_reachable() {
                        tracing::info!(
                            floor,
                            attempt,
                            nodes = layout.nodes.len(),
                            edges = layout.edge_count(),
                            "floor layout validated"
                        );
                        return Ok(GeneratedFloor {
                            layout,
                            attempts: attempt,
                            outcome: GenerationOutcome::Validated,
                        });
                    }
                    Phase::Retrying { attempt, layout, unreachable: report.unreachable }
                }
                Phase::Retrying { attempt, layout, unreachable } => {
                    if attempt < self.settings.max_attempts {
                        tracing::warn!(
                            floor,
                            attempt,
                            unreachable = unreachable.len(),
                            "floor layout failed reachability; regenerating"
                        );
                        Phase::Attempting { attempt: attempt + 1 }
                    } else {
                        return self.finish_exhausted(floor, attempt, layout, unreachable);
                    }
                }
            };
        }
    }

    fn build_layout<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        floor: u32,
        config: &FloorConfig,
        sampler: &CategorySampler,
        (min_nodes, max_nodes): (usize, usize),
    ) -> Result<Layout, GenerationError> {
        let node_count = random_usize(rng, min_nodes, max_nodes);
        let plan = plan_rows(
            node_count,
            self.settings.min_rows,
            self.settings.max_nodes_per_row,
            self.settings.max_floor_nodes,
        )?;
        tracing::trace!(node_count, ?plan, "row plan");

        let mut rows = materialize_rows(rng, &plan, &config.node_types, sampler);
        let mut start = start_node();
        let boss = config.boss.as_ref().map(|boss| boss_node(boss, plan.len() + 1));
        connect_floor(
            rng,
            &mut start,
            &mut rows,
            boss.as_ref(),
            ConnectorTuning::from(&self.settings),
        );

        let nodes = rows.into_iter().flatten().map(|node| (node.id.clone(), node)).collect();
        Ok(Layout { floor, start, nodes, boss })
    }

    fn finish_exhausted(
        &self,
        floor: u32,
        attempts: u32,
        mut layout: Layout,
        unreachable: Vec<NodeId>,
    ) -> Result<GeneratedFloor, GenerationError> {
        if !self.settings.repair_unreachable {
            tracing::error!(floor, attempts, unreachable = ?unreachable, "floor layout unreachable");
            return Err(GenerationError::UnreachableAfterRetries { attempts, unreachable });
        }

        repair_from_start(&mut layout, &unreachable);
        tracing::warn!(
            floor,
            attempts,
            repaired = ?unreachable,
            "attempts exhausted; linked unreachable nodes directly from start"
        );
        debug_assert!(is_fully_reachable(&layout));
        Ok(GeneratedFloor {
            layout,
            attempts,
            outcome: GenerationOutcome::Repaired { reconnected: unreachable },
        })
    }
}

/// Appends a `start -> id` edge for each id, skipping ones start already links.
pub fn repair_from_start(layout: &mut Layout, unreachable: &[NodeId]) {
    for id in unreachable {
        layout.start.link(id);
    }
}
