//! Persisted shop visit state.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Offer slots and one-time flags of the current (or last) shop visit.
///
/// Lives inside the run state so a save taken mid-visit restores the same
/// offers and sold marks. An empty [`CardId`] marks a slot nothing could
/// fill.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopState {
    /// Node index of the visit these slots belong to.
    #[serde(default)]
    pub node_index: Option<usize>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub offer_ids: Vec<CardId>,
    #[serde(default)]
    pub offer_sold: Vec<bool>,
    #[serde(default)]
    pub reroll_count: u32,
    #[serde(default)]
    pub remove_used: bool,
}

impl ShopState {
    /// Whether these slots belong to a visit of `node_index` with `slots` offers.
    #[must_use]
    pub fn is_visit(&self, node_index: usize, slots: usize) -> bool {
        self.node_index == Some(node_index)
            && self.offer_ids.len() == slots
            && self.offer_sold.len() == slots
    }

    /// Reset for a new visit with every slot empty and unsold.
    pub fn begin_visit(&mut self, node_index: usize, seed: u64, slots: usize) {
        self.node_index = Some(node_index);
        self.seed = seed;
        self.reroll_count = 0;
        self.remove_used = false;
        self.offer_ids = vec![CardId::default(); slots];
        self.offer_sold = vec![false; slots];
    }

    #[must_use]
    pub fn is_sold(&self, slot: usize) -> bool {
        self.offer_sold.get(slot).copied().unwrap_or(false)
    }

    /// Slot indices not yet sold.
    pub fn unsold_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.offer_sold
            .iter()
            .enumerate()
            .filter_map(|(i, &sold)| (!sold).then_some(i))
    }

    #[must_use]
    pub fn unsold_count(&self) -> usize {
        self.unsold_slots().count()
    }

    /// Forget the visit entirely.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
