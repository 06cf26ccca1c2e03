//! Tunables for the generator pipeline, loadable from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Lower bound on the number of rows between start and boss.
    pub min_rows: usize,
    /// Width of the widest row in the diamond profile.
    pub max_nodes_per_row: usize,
    /// Chance per node of one extra edge into a row wider than two.
    pub cross_link_chance: f64,
    pub max_attempts: u32,
    /// Force-connect unreachable nodes from start once attempts run out.
    pub repair_unreachable: bool,
    /// Give nodes left without an incoming edge one from the nearest node above.
    pub adopt_orphans: bool,
    /// Number of centered final-row nodes linked to the boss; `None` links all of them.
    pub boss_entry_width: Option<usize>,
    pub max_floor_nodes: usize,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            min_rows: 10,
            max_nodes_per_row: 3,
            cross_link_chance: 0.2,
            max_attempts: 5,
            repair_unreachable: true,
            adopt_orphans: true,
            boss_entry_width: None,
            max_floor_nodes: 512,
        }
    }
}

impl GeneratorSettings {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(raw)?;
        if settings.cross_link_chance.is_nan() {
            return Err(ConfigError::InvalidSettings("cross_link_chance is NaN".to_string()));
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    /// Copy with out-of-range tunables pulled back into their usable domain.
    pub fn validated(&self) -> Self {
        let mut settings = self.clone();
        let chance =
            if settings.cross_link_chance.is_nan() { 0.0 } else { settings.cross_link_chance };
        settings.cross_link_chance = chance.clamp(0.0, 1.0);
        settings.max_attempts = settings.max_attempts.max(1);
        if settings.boss_entry_width == Some(0) {
            settings.boss_entry_width = None;
        }
        settings
    }
}
