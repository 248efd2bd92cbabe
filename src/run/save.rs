//! Versioned save record.
//!
//! Cards persist by ID only and the map persists as raw node values, so a
//! save stays readable when content changes. Node values outside the known
//! range clamp on load.

use serde::{Deserialize, Serialize};

use super::state::{RunOutcome, RunState};
use crate::cards::CardId;
use crate::core::{Result, SaveError};
use crate::map::{generate, MapPlan};
use crate::shop::ShopState;

/// Store key for the current run save.
pub const SAVE_KEY: &str = "dungeon_deck.run_save.v1";

/// Newest save layout this crate reads and writes.
pub const SAVE_VERSION: u32 = 1;

/// Top-level save record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSaveData {
    pub version: u32,
    pub oath_id: String,
    pub balance_name: String,
    pub plan_template_name: String,
    pub map_seed: u64,
    /// Node types as raw integers. Empty means "regenerate from template".
    pub plan_nodes: Vec<i32>,
    pub state: RunStateSave,
}

impl Default for RunSaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            oath_id: String::new(),
            balance_name: String::new(),
            plan_template_name: String::new(),
            map_seed: 0,
            plan_nodes: Vec::new(),
            state: RunStateSave::default(),
        }
    }
}

/// Flattened [`RunState`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStateSave {
    pub oath_id: String,
    pub seed: u64,
    pub max_hp: i32,
    pub hp: i32,
    pub gold: u32,
    pub node_index: usize,
    pub cleared_battles: u32,
    pub reward_roll_count: u32,
    pub last_outcome: i32,
    pub deck_card_ids: Vec<String>,
    pub shop_node_index: Option<usize>,
    pub shop_seed: u64,
    pub shop_offer_ids: Vec<String>,
    pub shop_offer_sold: Vec<bool>,
    pub shop_reroll_count: u32,
    pub shop_remove_used: bool,
}

/// What a "continue" button shows without loading the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub oath_id: String,
    pub node_index: usize,
    pub hp: i32,
    pub max_hp: i32,
    pub gold: u32,
}

impl RunSaveData {
    /// Snapshot a live run.
    #[must_use]
    pub fn capture(
        run: &RunState,
        balance_name: &str,
        plan_template_name: &str,
        map_seed: u64,
        plan: &MapPlan,
    ) -> Self {
        Self {
            version: SAVE_VERSION,
            oath_id: run.oath_id.clone(),
            balance_name: balance_name.to_string(),
            plan_template_name: plan_template_name.to_string(),
            map_seed,
            plan_nodes: plan.to_raw(),
            state: RunStateSave::capture(run),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a save, rejecting layouts newer than [`SAVE_VERSION`].
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        if data.version > SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion(data.version));
        }
        Ok(data)
    }

    /// The saved plan, or a fresh one from `template_length` and `map_seed`
    /// when the snapshot is empty.
    #[must_use]
    pub fn restore_plan(&self, template_length: usize, map_seed: u64) -> MapPlan {
        if self.plan_nodes.is_empty() {
            tracing::debug!(map_seed, "save has no plan snapshot; regenerating");
            generate(template_length, map_seed)
        } else {
            MapPlan::from_raw(&self.plan_nodes)
        }
    }

    #[must_use]
    pub fn summary(&self) -> SaveSummary {
        SaveSummary {
            oath_id: self.oath_id.clone(),
            node_index: self.state.node_index,
            hp: self.state.hp,
            max_hp: self.state.max_hp,
            gold: self.state.gold,
        }
    }
}

impl RunStateSave {
    #[must_use]
    pub fn capture(run: &RunState) -> Self {
        let shop = &run.shop;
        Self {
            oath_id: run.oath_id.clone(),
            seed: run.seed,
            max_hp: run.max_hp,
            hp: run.hp,
            gold: run.gold,
            node_index: run.node_index,
            cleared_battles: run.cleared_battles,
            reward_roll_count: run.reward_roll_count,
            last_outcome: run.last_outcome.to_raw(),
            deck_card_ids: run
                .deck
                .iter()
                .filter(|id| !id.is_blank())
                .map(|id| id.as_str().to_string())
                .collect(),
            shop_node_index: shop.node_index,
            shop_seed: shop.seed,
            shop_offer_ids: shop.offer_ids.iter().map(|id| id.as_str().to_string()).collect(),
            shop_offer_sold: shop.offer_sold.clone(),
            shop_reroll_count: shop.reroll_count,
            shop_remove_used: shop.remove_used,
        }
    }

    /// Rebuild the run state. A blank saved oath takes `fallback_oath_id`.
    ///
    /// Blank deck IDs are dropped; the rest are kept for the caller to resolve.
    #[must_use]
    pub fn restore(&self, fallback_oath_id: &str) -> RunState {
        let oath_id = if self.oath_id.trim().is_empty() {
            fallback_oath_id
        } else {
            &self.oath_id
        };

        let mut run = RunState::new(oath_id, self.seed, self.max_hp, self.gold);
        run.set_hp(self.hp);
        run.node_index = self.node_index;
        run.cleared_battles = self.cleared_battles;
        run.reward_roll_count = self.reward_roll_count;
        run.last_outcome = RunOutcome::from_raw(self.last_outcome);
        run.deck = self
            .deck_card_ids
            .iter()
            .filter(|id| !id.trim().is_empty())
            .map(CardId::new)
            .collect();

        let mut sold = self.shop_offer_sold.clone();
        sold.resize(self.shop_offer_ids.len(), false);
        run.shop = ShopState {
            node_index: self.shop_node_index,
            seed: self.shop_seed,
            offer_ids: self.shop_offer_ids.iter().map(CardId::new).collect(),
            offer_sold: sold,
            reroll_count: self.shop_reroll_count,
            remove_used: self.shop_remove_used,
        };
        run
    }
}
