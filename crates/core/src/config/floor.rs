//! Per-floor generation inputs as stored by the content team.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::NodeCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCountRange {
    pub min: usize,
    pub max: usize,
}

impl Default for NodeCountRange {
    fn default() -> Self {
        Self { min: 5, max: 8 }
    }
}

impl NodeCountRange {
    /// Inclusive bounds with `max` raised to `min` when the store has them reversed.
    pub fn normalized(self) -> (usize, usize) {
        if self.min > self.max {
            tracing::warn!(min = self.min, max = self.max, "node_count min exceeds max; clamping");
            (self.min, self.min)
        } else {
            (self.min, self.max)
        }
    }
}

/// Inclusive `[min, max]` difficulty bounds, stored as a two element array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRange(pub u32, pub u32);

impl DifficultyRange {
    pub fn normalized(self) -> (u32, u32) {
        let DifficultyRange(min, max) = self;
        if min > max {
            tracing::warn!(min, max, "difficulty_range min exceeds max; clamping");
            (min, min)
        } else {
            (min, max)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTypeConfig {
    #[serde(default)]
    pub weight: f64,
    #[serde(default, alias = "difficultyRange", skip_serializing_if = "Option::is_none")]
    pub difficulty_range: Option<DifficultyRange>,
}

impl NodeTypeConfig {
    pub fn weighted(weight: f64) -> Self {
        Self { weight, difficulty_range: None }
    }

    pub fn with_difficulty(mut self, min: u32, max: u32) -> Self {
        self.difficulty_range = Some(DifficultyRange(min, max));
        self
    }
}

/// Category table that keeps the order categories were written in.
///
/// Roulette sampling walks this order, so it has to be stable across runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeTypeTable {
    entries: Vec<(NodeCategory, NodeTypeConfig)>,
}

impl NodeTypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, category: NodeCategory, config: NodeTypeConfig) -> Self {
        self.insert(category, config);
        self
    }

    /// Replaces an existing entry in place or appends a new one.
    pub fn insert(&mut self, category: NodeCategory, config: NodeTypeConfig) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == category) {
            Some((_, slot)) => *slot = config,
            None => self.entries.push((category, config)),
        }
    }

    pub fn get(&self, category: &NodeCategory) -> Option<&NodeTypeConfig> {
        self.entries.iter().find(|(existing, _)| existing == category).map(|(_, config)| config)
    }

    pub fn get_mut(&mut self, category: &NodeCategory) -> Option<&mut NodeTypeConfig> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == category)
            .map(|(_, config)| config)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeCategory, &NodeTypeConfig)> {
        self.entries.iter().map(|(category, config)| (category, config))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(NodeCategory, NodeTypeConfig)> for NodeTypeTable {
    fn from_iter<I: IntoIterator<Item = (NodeCategory, NodeTypeConfig)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (category, config) in iter {
            table.insert(category, config);
        }
        table
    }
}

impl Serialize for NodeTypeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, config) in &self.entries {
            map.serialize_entry(category.as_str(), config)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NodeTypeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = NodeTypeTable;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of category name to node type config")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = NodeTypeTable::new();
                while let Some((name, config)) = access.next_entry::<String, NodeTypeConfig>()? {
                    table.insert(NodeCategory::parse(&name), config);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossConfig {
    #[serde(default = "default_boss_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_boss_difficulty")]
    pub difficulty: u32,
}

fn default_boss_name() -> String {
    "Boss".to_string()
}

fn default_boss_difficulty() -> u32 {
    3
}

impl Default for BossConfig {
    fn default() -> Self {
        Self { name: default_boss_name(), description: String::new(), difficulty: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    #[serde(default, alias = "nodeCountRange")]
    pub node_count: NodeCountRange,
    #[serde(default, alias = "nodeTypeWeights")]
    pub node_types: NodeTypeTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<BossConfig>,
}

impl Default for FloorConfig {
    fn default() -> Self {
        let node_types = NodeTypeTable::new()
            .with(NodeCategory::Question, NodeTypeConfig::weighted(50.0).with_difficulty(1, 2))
            .with(NodeCategory::Elite, NodeTypeConfig::weighted(10.0).with_difficulty(2, 3))
            .with(NodeCategory::Rest, NodeTypeConfig::weighted(15.0))
            .with(NodeCategory::Treasure, NodeTypeConfig::weighted(10.0))
            .with(NodeCategory::Shop, NodeTypeConfig::weighted(5.0))
            .with(NodeCategory::Event, NodeTypeConfig::weighted(10.0));
        Self {
            node_count: NodeCountRange::default(),
            node_types,
            boss: Some(BossConfig {
                name: "Floor Guardian".to_string(),
                description: "Clear the floor to face the guardian.".to_string(),
                difficulty: 3,
            }),
        }
    }
}
