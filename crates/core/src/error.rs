//! Error types for configuration loading and floor generation.
//!
//! Malformed-but-playable configuration is clamped where it is read and never
//! surfaces here. These variants are the cases retrying cannot fix.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::NodeId;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("floor config defines no node categories")]
    EmptyCategoryTable,
    #[error("row layout would contain zero rows (min_rows = 0 and no nodes requested)")]
    NoRows,
    #[error("max_nodes_per_row must be at least 1")]
    ZeroRowCapacity,
    #[error("floor would hold {requested} nodes but the ceiling is {ceiling}")]
    NodeCountTooLarge { requested: usize, ceiling: usize },
    #[error("{} node(s) still unreachable after {attempts} attempt(s) and repair is disabled", unreachable.len())]
    UnreachableAfterRetries { attempts: u32, unreachable: Vec<NodeId> },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid floor catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid generator settings TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),
    #[error("floor {0} is not present in the catalog")]
    UnknownFloor(u32),
}
