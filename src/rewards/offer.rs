//! Post-battle reward offer.

use serde::{Deserialize, Serialize};

use super::roller::{roll, Weighted};
use crate::cards::{CardDefinition, CardId};
use crate::core::{GameRng, RewardConfig};

/// The cards offered after a won battle.
///
/// An offer is consumed by value when the player picks or skips, so a
/// reward can only be granted once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardOffer {
    seed: u64,
    options: Vec<CardDefinition>,
}

impl RewardOffer {
    /// Roll `config.option_count` distinct options from `candidates`.
    #[must_use]
    pub fn roll(candidates: &[Weighted<CardDefinition>], config: &RewardConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let options = roll(candidates, config.option_count, true, &mut rng);
        tracing::debug!(
            seed,
            candidates = candidates.len(),
            options = options.len(),
            "rolled reward offer"
        );
        Self { seed, options }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn options(&self) -> &[CardDefinition] {
        &self.options
    }

    /// IDs of the offered cards, in slot order.
    pub fn option_ids(&self) -> impl Iterator<Item = &CardId> {
        self.options.iter().map(|c| &c.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Consume the offer, returning the chosen card.
    ///
    /// An out-of-range index hands the offer back unchanged.
    pub fn choose(self, index: usize) -> Result<CardDefinition, Self> {
        if index >= self.options.len() {
            return Err(self);
        }
        let mut options = self.options;
        Ok(options.swap_remove(index))
    }
}
