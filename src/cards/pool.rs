//! Weighted card pools.
//!
//! A pool is a catalog entry listing cards (by ID) with a positive weight,
//! tagged with where it may be used: post-battle rewards, the shop, or both.

use serde::{Deserialize, Serialize};

use super::definition::CardId;

/// Where a pool may supply candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolUsage {
    Reward,
    Shop,
    #[default]
    Both,
}

/// The context a roll happens in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolContext {
    Reward,
    Shop,
}

impl PoolUsage {
    /// Whether a pool with this usage may be used in `context`.
    #[must_use]
    pub const fn allows(self, context: PoolContext) -> bool {
        matches!(
            (self, context),
            (PoolUsage::Both, _)
                | (PoolUsage::Reward, PoolContext::Reward)
                | (PoolUsage::Shop, PoolContext::Shop)
        )
    }
}

/// One weighted card reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub card: CardId,
    pub weight: f64,
}

impl PoolEntry {
    #[must_use]
    pub fn new(card: impl Into<String>, weight: f64) -> Self {
        Self {
            card: CardId::new(card),
            weight,
        }
    }

    /// Entries with a blank card or a non-positive weight never roll.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.card.is_blank() && self.weight > 0.0 && self.weight.is_finite()
    }
}

/// Immutable pool definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardPoolDefinition {
    /// Stable ID referenced by oaths and meta unlocks.
    pub pool_id: String,

    #[serde(default)]
    pub display_name: String,

    pub entries: Vec<PoolEntry>,

    #[serde(default)]
    pub usage: PoolUsage,
}

impl CardPoolDefinition {
    #[must_use]
    pub fn new(pool_id: impl Into<String>, usage: PoolUsage) -> Self {
        let pool_id = pool_id.into();
        Self {
            display_name: pool_id.clone(),
            pool_id,
            entries: Vec::new(),
            usage,
        }
    }

    /// Add an entry (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, card: impl Into<String>, weight: f64) -> Self {
        self.entries.push(PoolEntry::new(card, weight));
        self
    }

    #[must_use]
    pub fn allows(&self, context: PoolContext) -> bool {
        self.usage.allows(context)
    }

    /// Entries that can actually be rolled.
    pub fn valid_entries(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter().filter(|e| e.is_valid())
    }

    /// Check the whole definition, reporting the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.pool_id.trim().is_empty() {
            return Err(format!("{}: pool_id is empty", self.display_name));
        }
        if self.entries.is_empty() {
            return Err(format!("{}: entries is empty", self.pool_id));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.card.is_blank() {
                return Err(format!("{}: entry[{}] card id is blank", self.pool_id, i));
            }
            if !entry.is_valid() {
                return Err(format!("{}: entry[{}] weight must be > 0", self.pool_id, i));
            }
        }
        Ok(())
    }
}
