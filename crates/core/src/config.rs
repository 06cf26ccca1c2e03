//! Floor configuration records, the per-floor catalog, and generator tunables.

mod catalog;
mod floor;
mod settings;

pub use catalog::{FloorCatalog, FloorEntry, WeightSummaryRow};
pub use floor::{
    BossConfig, DifficultyRange, FloorConfig, NodeCountRange, NodeTypeConfig, NodeTypeTable,
};
pub use settings::GeneratorSettings;
