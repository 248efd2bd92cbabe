//! Mutable run state.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::shop::ShopState;

/// How a run ended. `None` while the run is live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    #[default]
    None,
    Victory,
    Defeat,
    Aborted,
}

impl RunOutcome {
    #[must_use]
    pub const fn is_ended(self) -> bool {
        !matches!(self, RunOutcome::None)
    }

    #[must_use]
    pub const fn to_raw(self) -> i32 {
        match self {
            RunOutcome::None => 0,
            RunOutcome::Victory => 1,
            RunOutcome::Defeat => 2,
            RunOutcome::Aborted => 3,
        }
    }

    /// Unknown values read back as `None`.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => RunOutcome::Victory,
            2 => RunOutcome::Defeat,
            3 => RunOutcome::Aborted,
            _ => RunOutcome::None,
        }
    }
}

/// Everything that persists between nodes of a run.
///
/// The deck holds card IDs only; definitions are resolved on demand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub oath_id: String,
    pub seed: u64,
    pub max_hp: i32,
    pub hp: i32,
    pub gold: u32,
    pub node_index: usize,
    pub cleared_battles: u32,
    pub reward_roll_count: u32,
    pub last_outcome: RunOutcome,
    pub deck: Vec<CardId>,
    pub shop: ShopState,
}

impl RunState {
    /// A fresh run at full HP on node 0.
    #[must_use]
    pub fn new(oath_id: impl Into<String>, seed: u64, max_hp: i32, gold: u32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            oath_id: oath_id.into(),
            seed,
            max_hp,
            hp: max_hp,
            gold,
            node_index: 0,
            cleared_battles: 0,
            reward_roll_count: 0,
            last_outcome: RunOutcome::None,
            deck: Vec::new(),
            shop: ShopState::default(),
        }
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.last_outcome.is_ended()
    }

    /// Record the run's outcome. Only the first outcome sticks.
    ///
    /// Returns whether this call set it.
    pub fn record_outcome(&mut self, outcome: RunOutcome) -> bool {
        if self.is_ended() || !outcome.is_ended() {
            return false;
        }
        self.last_outcome = outcome;
        true
    }

    /// Set HP, clamped into `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Heal up to max HP. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.set_hp(self.hp.saturating_add(amount.max(0)));
        self.hp - before
    }

    /// Copies of `card` in the deck.
    #[must_use]
    pub fn copies_of(&self, card: &CardId) -> usize {
        self.deck.iter().filter(|id| *id == card).count()
    }
}
