use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use floorgen::config::{NodeCountRange, NodeTypeConfig, NodeTypeTable};
use floorgen::logging::{LogLevel, TracingConfig, init_tracing};
use floorgen::mapgen::inspect_reachability;
use floorgen::{FloorCatalog, FloorConfig, FloorGenerator, GeneratorSettings, NodeCategory};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sweep seeds and check every floor stays reachable",
    long_about = None
)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    /// Draw floors from this catalog instead of randomized configs
    #[arg(short, long)]
    catalog: Option<PathBuf>,
    /// Disable orphan adoption to exercise the retry and repair paths
    #[arg(long)]
    no_adopt: bool,
}

const CATEGORIES: [NodeCategory; 6] = [
    NodeCategory::Question,
    NodeCategory::Elite,
    NodeCategory::Rest,
    NodeCategory::Treasure,
    NodeCategory::Shop,
    NodeCategory::Event,
];

fn random_config(rng: &mut ChaCha8Rng) -> FloorConfig {
    let min = 1 + (rng.next_u64() % 20) as usize;
    let max = min + (rng.next_u64() % 6) as usize;
    let mut node_types = NodeTypeTable::new();
    for category in CATEGORIES {
        // Roughly a third of categories are switched off.
        let weight = if rng.next_u64() % 3 == 0 { 0.0 } else { (rng.next_u64() % 50) as f64 };
        node_types.insert(category, NodeTypeConfig::weighted(weight).with_difficulty(1, 3));
    }
    FloorConfig { node_count: NodeCountRange { min, max }, node_types, ..FloorConfig::default() }
}

fn random_settings(rng: &mut ChaCha8Rng, adopt_orphans: bool) -> GeneratorSettings {
    GeneratorSettings {
        min_rows: 1 + (rng.next_u64() % 12) as usize,
        max_nodes_per_row: 1 + (rng.next_u64() % 5) as usize,
        cross_link_chance: (rng.next_u64() % 100) as f64 / 100.0,
        adopt_orphans,
        ..GeneratorSettings::default()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&TracingConfig::with_level(LogLevel::Error));

    let catalog = match &args.catalog {
        Some(path) => Some(
            FloorCatalog::load(path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
        ),
        None => None,
    };

    println!("Starting floor fuzz on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut retried = 0_u32;
    let mut repaired = 0_u32;
    let mut total_nodes = 0_usize;

    for run in 0..args.runs {
        let (floor, config) = match &catalog {
            Some(catalog) if !catalog.floors.is_empty() => {
                let entry = &catalog.floors[run as usize % catalog.floors.len()];
                (entry.id, entry.config.clone())
            }
            _ => (run + 1, random_config(&mut rng)),
        };
        let settings = random_settings(&mut rng, !args.no_adopt);
        let mut floor_rng = ChaCha8Rng::seed_from_u64(rng.next_u64());

        let generated = FloorGenerator::new(settings)
            .generate(floor, &config, &mut floor_rng)
            .with_context(|| format!("Run {run} failed on floor {floor}"))?;
        let report = inspect_reachability(&generated.layout);
        if !report.is_fully_reachable() {
            bail!("Invariant failed: run {run} left {:?} unreachable", report.unreachable);
        }
        if !report.dangling.is_empty() {
            bail!("Invariant failed: run {run} produced dangling edges {:?}", report.dangling);
        }

        total_nodes += generated.layout.nodes.len();
        if generated.attempts > 1 {
            retried += 1;
        }
        if generated.was_repaired() {
            repaired += 1;
        }
    }

    println!("Fuzz complete.");
    println!("Floors: {}", args.runs);
    println!("Nodes generated: {}", total_nodes);
    println!("Needed a retry: {}", retried);
    println!("Repaired: {}", repaired);

    Ok(())
}
