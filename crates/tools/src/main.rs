use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use floorgen::logging::{LogLevel, TracingConfig, init_tracing};
use floorgen::{
    FloorCatalog, FloorConfig, GeneratedFloor, GeneratorSettings, NodeCategory, generate_floor,
};

#[derive(Parser)]
#[command(author, version, about = "Generate and tune floor maps", long_about = None)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one floor and print it as JSON
    Generate {
        #[arg(short, long, default_value_t = 1)]
        floor: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Floor catalog JSON; floors it lacks use the built-in defaults
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Generator settings TOML
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
        /// Print a row-by-row outline instead of JSON
        #[arg(long, conflicts_with = "pretty")]
        outline: bool,
    },
    /// Show or edit the category weights of a catalog floor
    Weights {
        #[arg(short, long)]
        catalog: PathBuf,
        #[arg(short, long)]
        floor: u32,
        /// Weight assignment such as `rest=20`; repeatable
        #[arg(long = "set", value_parser = parse_weight_assignment)]
        assignments: Vec<(NodeCategory, f64)>,
        /// Save assignments back to the catalog file
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TracingConfig::with_level(LogLevel::from_verbosity(cli.verbose)));

    match cli.command {
        Command::Generate { floor, seed, catalog, settings, pretty, outline } => {
            let config = load_floor_config(catalog.as_deref(), floor)?;
            let settings = match settings {
                Some(path) => GeneratorSettings::load(&path)
                    .with_context(|| format!("Failed to load settings: {}", path.display()))?,
                None => GeneratorSettings::default(),
            };
            let generated = generate_floor(seed, floor, &config, &settings)
                .with_context(|| format!("Failed to generate floor {floor} from seed {seed}"))?;

            if outline {
                print_outline(&generated);
            } else if pretty {
                println!("{}", serde_json::to_string_pretty(&generated)?);
            } else {
                println!("{}", serde_json::to_string(&generated)?);
            }
        }
        Command::Weights { catalog: path, floor, assignments, write } => {
            let mut catalog = FloorCatalog::load(&path)
                .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
            for (category, weight) in &assignments {
                catalog
                    .set_weight(floor, category.clone(), *weight)
                    .with_context(|| format!("Failed to set weight for {category}"))?;
            }

            for row in catalog.weight_summary(floor)? {
                let state = if row.enabled { "enabled" } else { "disabled" };
                println!("{:<14} {:>8.2}  {state}", row.category.as_str(), row.weight);
            }

            if write && !assignments.is_empty() {
                catalog
                    .save(&path)
                    .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
                println!("Saved {} change(s) to {}", assignments.len(), path.display());
            } else if !assignments.is_empty() {
                println!("Dry run; pass --write to save.");
            }
        }
    }

    Ok(())
}

fn load_floor_config(catalog: Option<&Path>, floor: u32) -> Result<FloorConfig> {
    let Some(path) = catalog else {
        return Ok(FloorConfig::default());
    };
    let catalog = FloorCatalog::load(path)
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
    Ok(catalog.config_for(floor))
}

fn print_outline(generated: &GeneratedFloor) {
    let layout = &generated.layout;
    println!(
        "Floor {} ({} nodes, {} edges, {} attempt(s), fingerprint {:016x})",
        layout.floor,
        layout.nodes.len(),
        layout.edge_count(),
        generated.attempts,
        layout.fingerprint()
    );
    for row in 1..=layout.row_count() {
        let cells: Vec<String> = layout
            .row(row)
            .iter()
            .map(|node| format!("{}[{}]", node.category, node.difficulty))
            .collect();
        println!("{row:>3}: {}", cells.join("  "));
    }
    if let Some(boss) = &layout.boss {
        println!("{:>3}: boss \"{}\" [{}]", boss.row, boss.title, boss.difficulty);
    }
    if generated.was_repaired() {
        println!("note: layout was repaired after exhausting regeneration attempts");
    }
}

fn parse_weight_assignment(raw: &str) -> Result<(NodeCategory, f64), String> {
    let (name, weight) =
        raw.split_once('=').ok_or_else(|| format!("expected CATEGORY=WEIGHT, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category in `{raw}`"));
    }
    let weight: f64 =
        weight.trim().parse().map_err(|_| format!("`{}` is not a number", weight.trim()))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("weight must be a non-negative number, got {weight}"));
    }
    Ok((NodeCategory::parse(name), weight))
}
