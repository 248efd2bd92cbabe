//! Node types and the immutable map plan.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::battle::EncounterKind;

/// What a node on the map holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[default]
    Battle,
    Shop,
    Rest,
    Boss,
}

impl NodeType {
    pub const ALL: [NodeType; 4] = [NodeType::Battle, NodeType::Shop, NodeType::Rest, NodeType::Boss];

    /// Integer form used in saves.
    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            NodeType::Battle => 0,
            NodeType::Shop => 1,
            NodeType::Rest => 2,
            NodeType::Boss => 3,
        }
    }

    /// Parse the save integer, clamping out-of-range values into the enum.
    #[must_use]
    pub const fn from_raw_clamped(raw: i32) -> Self {
        match raw {
            i32::MIN..=0 => NodeType::Battle,
            1 => NodeType::Shop,
            2 => NodeType::Rest,
            _ => NodeType::Boss,
        }
    }

    /// Whether clearing this node counts as a cleared battle.
    #[must_use]
    pub const fn is_combat(self) -> bool {
        matches!(self, NodeType::Battle | NodeType::Boss)
    }

    /// Encounter kind for combat nodes.
    #[must_use]
    pub const fn encounter(self) -> Option<EncounterKind> {
        match self {
            NodeType::Battle => Some(EncounterKind::Normal),
            NodeType::Boss => Some(EncounterKind::Boss),
            NodeType::Shop | NodeType::Rest => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            NodeType::Battle => "battle",
            NodeType::Shop => "shop",
            NodeType::Rest => "rest",
            NodeType::Boss => "boss",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered node sequence for one run.
///
/// Backed by a persistent vector so cloning a plan (for saves or snapshots)
/// shares structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPlan {
    nodes: Vector<NodeType>,
}

impl MapPlan {
    #[must_use]
    pub fn new(nodes: impl IntoIterator<Item = NodeType>) -> Self {
        Self {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Rebuild a plan from saved integers.
    #[must_use]
    pub fn from_raw(raw: &[i32]) -> Self {
        Self::new(raw.iter().map(|&r| NodeType::from_raw_clamped(r)))
    }

    #[must_use]
    pub fn to_raw(&self) -> Vec<i32> {
        self.nodes.iter().map(|n| n.to_raw()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeType> {
        self.nodes.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeType> + '_ {
        self.nodes.iter().copied()
    }

    #[must_use]
    pub fn count(&self, node: NodeType) -> usize {
        self.iter().filter(|&n| n == node).count()
    }

    #[must_use]
    pub fn contains(&self, node: NodeType) -> bool {
        self.iter().any(|n| n == node)
    }
}

/// A named plan template. Only its length is used for generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTemplate {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeType>,
}

impl MapTemplate {
    /// Length used when a template has no nodes.
    pub const DEFAULT_LENGTH: usize = 6;

    #[must_use]
    pub fn new(name: impl Into<String>, nodes: Vec<NodeType>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }

    /// A template of `len` nodes, all battles except the closing boss.
    #[must_use]
    pub fn with_length(name: impl Into<String>, len: usize) -> Self {
        let mut nodes = vec![NodeType::Battle; len];
        if let Some(last) = nodes.last_mut() {
            *last = NodeType::Boss;
        }
        Self::new(name, nodes)
    }

    #[must_use]
    pub fn length(&self) -> usize {
        if self.nodes.is_empty() {
            Self::DEFAULT_LENGTH
        } else {
            self.nodes.len()
        }
    }
}

impl Default for MapTemplate {
    fn default() -> Self {
        Self::new(
            "default",
            vec![
                NodeType::Battle,
                NodeType::Battle,
                NodeType::Shop,
                NodeType::Battle,
                NodeType::Rest,
                NodeType::Boss,
            ],
        )
    }
}
