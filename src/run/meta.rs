//! Persistent progression across runs.
//!
//! Pool unlocks and run-start bonuses. Stored as JSON under [`META_KEY`];
//! a missing or unreadable record loads as the default.

use serde::{Deserialize, Serialize};

use super::state::RunState;
use super::store::KeyValueStore;
use crate::cards::{CardId, CardResolver};

/// Store key for the meta progression record.
pub const META_KEY: &str = "dungeon_deck.meta_progress.v1";

/// Current record version.
pub const META_VERSION: u32 = 2;

/// Unlocks and permanent bonuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaProgress {
    pub version: u32,
    /// Pool IDs unlocked for reward/shop rolls.
    pub unlocked_pool_ids: Vec<String>,
    pub start_gold_bonus: i32,
    pub start_max_hp_bonus: i32,
    pub start_bonus_card_ids: Vec<CardId>,
}

impl Default for MetaProgress {
    fn default() -> Self {
        Self {
            version: META_VERSION,
            unlocked_pool_ids: Vec::new(),
            start_gold_bonus: 0,
            start_max_hp_bonus: 0,
            start_bonus_card_ids: Vec::new(),
        }
    }
}

impl MetaProgress {
    /// Load from `store`, falling back to the default record.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(json) = store.get(META_KEY).filter(|j| !j.trim().is_empty()) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(mut meta) => {
                meta.version = meta.version.max(META_VERSION);
                meta
            }
            Err(err) => {
                tracing::warn!(%err, "meta progression unreadable; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => store.set(META_KEY, json),
            Err(err) => tracing::warn!(%err, "failed to serialize meta progression"),
        }
    }

    #[must_use]
    pub fn is_unlocked(&self, pool_id: &str) -> bool {
        !pool_id.trim().is_empty() && self.unlocked_pool_ids.iter().any(|p| p == pool_id)
    }

    /// Unlock a pool. Returns `false` if blank or already unlocked.
    pub fn unlock_pool(&mut self, pool_id: impl Into<String>) -> bool {
        let pool_id = pool_id.into();
        if pool_id.trim().is_empty() || self.is_unlocked(&pool_id) {
            return false;
        }
        self.unlocked_pool_ids.push(pool_id);
        true
    }

    /// Apply run-start bonuses to a fresh run.
    ///
    /// A max-HP bonus also refills HP. Bonus cards that do not resolve are
    /// skipped.
    pub fn apply_start_bonuses(&self, run: &mut RunState, resolver: &dyn CardResolver) {
        if self.start_gold_bonus != 0 {
            run.gold = run.gold.saturating_add_signed(self.start_gold_bonus);
        }
        if self.start_max_hp_bonus != 0 {
            run.max_hp = (run.max_hp + self.start_max_hp_bonus).max(1);
            run.hp = run.max_hp;
        }
        for card in resolver.resolve_all(&self.start_bonus_card_ids) {
            run.deck.push(card.id);
        }
    }
}
