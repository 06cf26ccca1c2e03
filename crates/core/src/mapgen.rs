//! Floor map generation split into coherent submodules.
//!
//! The pipeline runs row planning, node materialization, connection, and
//! reachability validation, wrapped in a bounded regenerate-or-repair loop.

pub mod model;

mod connect;
mod generator;
mod layout;
mod materialize;
mod sampler;
mod seed;
mod titles;
mod validate;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::config::{FloorConfig, GeneratorSettings};
use crate::error::GenerationError;

pub use generator::{FloorGenerator, repair_from_start};
pub use layout::plan_rows;
pub use model::{GeneratedFloor, GenerationOutcome, Layout, Node};
pub use sampler::{CategorySampler, FALLBACK_CATEGORY, assign_difficulty};
pub use seed::derive_floor_seed;
pub use titles::{UNKNOWN_TITLE, pick_title, title_pool};
pub use validate::{ReachabilityReport, inspect_reachability, is_fully_reachable};

/// Generates `floor` of a run from a seeded ChaCha8 stream, so the same
/// `(run_seed, floor, config, settings)` always yields the same layout.
pub fn generate_floor(
    run_seed: u64,
    floor: u32,
    config: &FloorConfig,
    settings: &GeneratorSettings,
) -> Result<GeneratedFloor, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(derive_floor_seed(run_seed, floor));
    FloorGenerator::new(settings.clone()).generate(floor, config, &mut rng)
}
