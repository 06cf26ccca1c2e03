//! File-backed per-floor configuration store.
//!
//! The on-disk shape is `{ "floors": [ { "id": 1, "name": ..., "node_count": ..., ... } ] }`.
//! Floors missing from the catalog fall back to [`FloorConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::NodeCategory;

use super::floor::{FloorConfig, NodeTypeConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorEntry {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub config: FloorConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorCatalog {
    #[serde(default)]
    pub floors: Vec<FloorEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeightSummaryRow {
    pub category: NodeCategory,
    pub weight: f64,
    pub enabled: bool,
}

impl FloorCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|source| ConfigError::Io { path: parent.to_path_buf(), source })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }

    pub fn entry(&self, floor: u32) -> Option<&FloorEntry> {
        self.floors.iter().find(|entry| entry.id == floor)
    }

    /// Config for `floor`, or the documented default when the catalog has no entry.
    pub fn config_for(&self, floor: u32) -> FloorConfig {
        match self.entry(floor) {
            Some(entry) => entry.config.clone(),
            None => {
                tracing::debug!(floor, "no catalog entry; using default floor config");
                FloorConfig::default()
            }
        }
    }

    pub fn weight_summary(&self, floor: u32) -> Result<Vec<WeightSummaryRow>, ConfigError> {
        let entry = self.entry(floor).ok_or(ConfigError::UnknownFloor(floor))?;
        Ok(entry
            .config
            .node_types
            .iter()
            .map(|(category, config)| WeightSummaryRow {
                category: category.clone(),
                weight: config.weight,
                enabled: config.weight > 0.0,
            })
            .collect())
    }

    /// Sets one category's weight, appending the category if the floor lacks it.
    pub fn set_weight(
        &mut self,
        floor: u32,
        category: NodeCategory,
        weight: f64,
    ) -> Result<(), ConfigError> {
        let entry = self
            .floors
            .iter_mut()
            .find(|entry| entry.id == floor)
            .ok_or(ConfigError::UnknownFloor(floor))?;
        match entry.config.node_types.get_mut(&category) {
            Some(existing) => existing.weight = weight,
            None => entry.config.node_types.insert(category, NodeTypeConfig::weighted(weight)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "floors": [
            {
                "id": 1,
                "name": "Orientation",
                "description": "First day on the wards",
                "node_count": {"min": 5, "max": 6},
                "node_types": {
                    "question": {"weight": 60, "difficulty_range": [1, 1]},
                    "rest": {"weight": 25},
                    "shop": {"weight": 0}
                },
                "boss": {"name": "Chief Resident", "difficulty": 2}
            },
            {
                "id": 2,
                "name": "Night Shift",
                "node_types": {"elite": {"weight": 10}}
            }
        ]
    }"#;

    #[test]
    fn catalog_resolves_configured_floor() {
        let catalog = FloorCatalog::from_json_str(CATALOG).expect("catalog should parse");
        let config = catalog.config_for(1);
        assert_eq!(config.node_count.max, 6);
        assert_eq!(config.boss.as_ref().map(|boss| boss.name.as_str()), Some("Chief Resident"));
        assert_eq!(catalog.entry(1).map(|entry| entry.name.as_str()), Some("Orientation"));
    }

    #[test]
    fn missing_floor_falls_back_to_default_config() {
        let catalog = FloorCatalog::from_json_str(CATALOG).expect("catalog should parse");
        assert_eq!(catalog.config_for(99), FloorConfig::default());
    }

    #[test]
    fn weight_summary_marks_zero_weight_categories_disabled() {
        let catalog = FloorCatalog::from_json_str(CATALOG).expect("catalog should parse");
        let summary = catalog.weight_summary(1).expect("floor 1 exists");
        let enabled: Vec<(&str, bool)> =
            summary.iter().map(|row| (row.category.as_str(), row.enabled)).collect();
        assert_eq!(enabled, [("question", true), ("rest", true), ("shop", false)]);
    }

    #[test]
    fn set_weight_updates_existing_and_appends_new_categories() {
        let mut catalog = FloorCatalog::from_json_str(CATALOG).expect("catalog should parse");
        catalog.set_weight(2, NodeCategory::Elite, 40.0).expect("floor 2 exists");
        catalog.set_weight(2, NodeCategory::Gamble, 5.0).expect("floor 2 exists");

        let config = catalog.config_for(2);
        assert_eq!(config.node_types.get(&NodeCategory::Elite).map(|c| c.weight), Some(40.0));
        assert_eq!(config.node_types.get(&NodeCategory::Gamble).map(|c| c.weight), Some(5.0));
        assert_eq!(config.node_types.len(), 2);
    }

    #[test]
    fn unknown_floor_is_reported() {
        let mut catalog = FloorCatalog::default();
        assert!(matches!(
            catalog.set_weight(3, NodeCategory::Rest, 1.0),
            Err(ConfigError::UnknownFloor(3))
        ));
        assert!(matches!(catalog.weight_summary(3), Err(ConfigError::UnknownFloor(3))));
    }
}
