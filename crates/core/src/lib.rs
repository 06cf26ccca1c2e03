pub mod config;
pub mod error;
pub mod logging;
pub mod mapgen;
pub mod types;

pub use config::{FloorCatalog, FloorConfig, GeneratorSettings};
pub use error::{ConfigError, GenerationError};
pub use mapgen::{FloorGenerator, GeneratedFloor, GenerationOutcome, Layout, Node, generate_floor};
pub use types::*;
