use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub const START: &'static str = "start";
    pub const BOSS: &'static str = "boss";

    pub fn start() -> Self {
        Self(Self::START.to_string())
    }

    pub fn boss() -> Self {
        Self(Self::BOSS.to_string())
    }

    pub fn grid(row: usize, slot: usize) -> Self {
        Self(format!("node_{row}_{slot}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Gameplay type of a node. Names outside the known set survive as `Custom`
/// so floor stores can introduce new categories without a code change.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeCategory {
    Start,
    Question,
    Elite,
    Shop,
    Rest,
    Treasure,
    Event,
    Gamble,
    PatientCase,
    Boss,
    Custom(String),
}

impl NodeCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Question => "question",
            Self::Elite => "elite",
            Self::Shop => "shop",
            Self::Rest => "rest",
            Self::Treasure => "treasure",
            Self::Event => "event",
            Self::Gamble => "gamble",
            Self::PatientCase => "patient_case",
            Self::Boss => "boss",
            Self::Custom(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "start" => Self::Start,
            "question" => Self::Question,
            "elite" => Self::Elite,
            "shop" => Self::Shop,
            "rest" => Self::Rest,
            "treasure" => Self::Treasure,
            "event" => Self::Event,
            "gamble" => Self::Gamble,
            "patient_case" => Self::PatientCase,
            "boss" => Self::Boss,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Difficulty used when the floor config carries no range for this category.
    pub fn default_difficulty(&self) -> u32 {
        match self {
            Self::Question | Self::Elite => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for NodeCategory {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<NodeCategory> for String {
    fn from(value: NodeCategory) -> Self {
        match value {
            NodeCategory::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}
