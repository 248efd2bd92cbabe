//! Slot-stable shop.
//!
//! Offers are stored by card ID in the run's [`ShopState`](super::ShopState). Entering a shop
//! node that differs from the stored visit starts a new visit: fresh seed,
//! reroll count 0, removal available, every slot unsold and rolled. Within a
//! visit a slot only changes through [`ShopEngine::reroll`], and a sold slot
//! never changes again.
//!
//! Normal slots are rolled together without replacement. The premium slot
//! (if configured) rolls on its own from the premium candidates, or the
//! normal ones when there are none, retrying up to [`PREMIUM_RETRY_LIMIT`]
//! times to avoid a card already offered or sold.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::pricing::slot_price;
use crate::cards::{CardDefinition, CardId, CardResolver};
use crate::core::{
    premium_attempt_seed, reroll_seed, shop_visit_seed, GameRng, RollConfig, ShopConfig,
    ShopRejection, PREMIUM_RETRY_LIMIT,
};
use crate::rewards::{apply_roll_weights, flat_candidates, roll, Weighted};
use crate::run::RunState;

/// One slot as presented to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopOffer {
    pub slot: usize,
    /// `None` when the slot is empty or its ID did not resolve.
    pub card: Option<CardDefinition>,
    pub price: Option<u32>,
    pub sold: bool,
    pub premium: bool,
}

/// Shop rules over a fixed set of candidates.
#[derive(Clone, Debug)]
pub struct ShopEngine {
    config: ShopConfig,
    roll: RollConfig,
    /// Normal slot candidates with base weights.
    candidates: Vec<Weighted<CardDefinition>>,
    /// Premium slot candidates with base weights; may be empty.
    premium: Vec<Weighted<CardDefinition>>,
}

impl ShopEngine {
    #[must_use]
    pub fn new(config: ShopConfig, roll: RollConfig, candidates: Vec<Weighted<CardDefinition>>) -> Self {
        Self {
            config,
            roll,
            candidates,
            premium: Vec::new(),
        }
    }

    /// Candidates with equal base weight.
    #[must_use]
    pub fn from_cards(config: ShopConfig, roll: RollConfig, cards: &[CardDefinition]) -> Self {
        Self::new(config, roll, flat_candidates(cards))
    }

    /// Set the premium slot candidates (builder pattern).
    #[must_use]
    pub fn with_premium(mut self, premium: Vec<Weighted<CardDefinition>>) -> Self {
        self.premium = premium;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Normal candidates, for the resolution chain.
    #[must_use]
    pub fn candidates(&self) -> &[Weighted<CardDefinition>] {
        &self.candidates
    }

    #[must_use]
    pub fn premium_candidates(&self) -> &[Weighted<CardDefinition>] {
        &self.premium
    }

    #[must_use]
    pub fn is_premium_slot(&self, slot: usize) -> bool {
        self.config.active_premium_slot() == Some(slot)
    }

    /// Whether `run` is inside the visit of its current node.
    #[must_use]
    pub fn is_active(&self, run: &RunState) -> bool {
        run.shop.is_visit(run.node_index, self.config.offer_count)
    }

    /// Enter the shop at the run's current node.
    ///
    /// Starts and rolls a new visit unless the stored slots already belong
    /// to this node. Returns `true` when a new visit began.
    pub fn enter(&self, run: &mut RunState) -> bool {
        if self.is_active(run) {
            return false;
        }

        let seed = shop_visit_seed(run.seed, run.node_index);
        run.shop.begin_visit(run.node_index, seed, self.config.offer_count);
        self.fill_unsold(run, seed);

        tracing::info!(node = run.node_index, seed, offers = ?run.shop.offer_ids, "shop visit started");
        true
    }

    /// Redraw every unsold slot from `seed`.
    fn fill_unsold(&self, run: &mut RunState, seed: u64) {
        let premium_slot = self.config.active_premium_slot();
        let normal_slots: Vec<usize> = run
            .shop
            .unsold_slots()
            .filter(|&slot| Some(slot) != premium_slot)
            .collect();

        let weighted = apply_roll_weights(&self.candidates, &run.deck, &self.roll);
        let mut rng = GameRng::new(seed);
        let mut picks = roll(&weighted, normal_slots.len(), true, &mut rng).into_iter();
        for slot in normal_slots {
            run.shop.offer_ids[slot] = picks.next().map(|c| c.id).unwrap_or_default();
        }

        if let Some(slot) = premium_slot.filter(|&s| !run.shop.is_sold(s)) {
            let id = self.roll_premium(run, slot, seed);
            run.shop.offer_ids[slot] = id;
        }
    }

    fn roll_premium(&self, run: &RunState, slot: usize, seed: u64) -> CardId {
        let source = if self.premium.is_empty() {
            tracing::debug!("premium pool empty; using normal candidates");
            &self.candidates
        } else {
            &self.premium
        };
        let weighted = apply_roll_weights(source, &run.deck, &self.roll);

        let taken: FxHashSet<&CardId> = run
            .shop
            .offer_ids
            .iter()
            .enumerate()
            .filter(|&(i, id)| i != slot && !id.is_blank())
            .map(|(_, id)| id)
            .collect();

        let mut last = CardId::default();
        for attempt in 0..PREMIUM_RETRY_LIMIT {
            let mut rng = GameRng::new(premium_attempt_seed(seed, attempt));
            let Some(card) = roll(&weighted, 1, true, &mut rng).pop() else {
                return CardId::default();
            };
            if !taken.contains(&card.id) {
                return card.id;
            }
            last = card.id;
        }

        tracing::debug!(card = %last, "premium retries exhausted; keeping duplicate");
        last
    }

    /// Current slots, resolved through `resolver`.
    pub fn offers(&self, run: &RunState, resolver: &dyn CardResolver) -> Vec<ShopOffer> {
        run.shop
            .offer_ids
            .iter()
            .enumerate()
            .map(|(slot, id)| {
                let premium = self.is_premium_slot(slot);
                let card = resolver.resolve(id).cloned();
                ShopOffer {
                    slot,
                    price: card.as_ref().map(|c| slot_price(&self.config, c.rarity, premium)),
                    card,
                    sold: run.shop.is_sold(slot),
                    premium,
                }
            })
            .collect()
    }

    /// Price of `card` in `slot`.
    #[must_use]
    pub fn price(&self, card: &CardDefinition, slot: usize) -> u32 {
        slot_price(&self.config, card.rarity, self.is_premium_slot(slot))
    }

    fn ensure_active(&self, run: &RunState) -> Result<(), ShopRejection> {
        if self.is_active(run) {
            Ok(())
        } else {
            Err(ShopRejection::NotInShop)
        }
    }

    /// Buy the card in `slot`: pay, add it to the deck, mark the slot sold.
    pub fn buy(
        &self,
        run: &mut RunState,
        slot: usize,
        resolver: &dyn CardResolver,
    ) -> Result<CardId, ShopRejection> {
        self.ensure_active(run)?;
        if slot >= self.config.offer_count {
            return Err(ShopRejection::InvalidSlot(slot));
        }
        if run.shop.is_sold(slot) {
            return Err(ShopRejection::SlotSold(slot));
        }
        let card = resolver
            .resolve(&run.shop.offer_ids[slot])
            .ok_or(ShopRejection::Unresolved(slot))?;

        let price = self.price(card, slot);
        if run.gold < price {
            return Err(ShopRejection::NotEnoughGold {
                required: price,
                available: run.gold,
            });
        }

        let id = card.id.clone();
        run.gold -= price;
        run.deck.push(id.clone());
        run.shop.offer_sold[slot] = true;

        tracing::info!(card = %id, slot, price, gold = run.gold, "shop purchase");
        Ok(id)
    }

    /// Whether [`reroll`](Self::reroll) would currently succeed.
    #[must_use]
    pub fn can_reroll(&self, run: &RunState) -> bool {
        self.is_active(run) && run.shop.unsold_count() > 0 && run.gold >= self.config.reroll_cost
    }

    /// Pay the reroll cost and redraw every unsold slot.
    ///
    /// The seed comes from the visit seed and the new reroll count, so the
    /// n-th reroll of a visit always produces the same offers.
    pub fn reroll(&self, run: &mut RunState) -> Result<(), ShopRejection> {
        self.ensure_active(run)?;
        if run.shop.unsold_count() == 0 {
            return Err(ShopRejection::NothingToReroll);
        }
        let cost = self.config.reroll_cost;
        if run.gold < cost {
            return Err(ShopRejection::NotEnoughGold {
                required: cost,
                available: run.gold,
            });
        }

        run.gold -= cost;
        run.shop.reroll_count += 1;
        let seed = reroll_seed(run.shop.seed, run.shop.reroll_count);
        self.fill_unsold(run, seed);

        tracing::debug!(count = run.shop.reroll_count, seed, offers = ?run.shop.offer_ids, "shop reroll");
        Ok(())
    }

    /// Whether card removal is still available and affordable.
    #[must_use]
    pub fn can_remove(&self, run: &RunState) -> bool {
        self.is_active(run)
            && !run.shop.remove_used
            && run.gold >= self.config.remove_cost
            && !run.deck.is_empty()
    }

    /// Pay to remove one copy of `card` from the deck. Once per visit.
    pub fn remove_card(&self, run: &mut RunState, card: &CardId) -> Result<(), ShopRejection> {
        self.ensure_active(run)?;
        if run.shop.remove_used {
            return Err(ShopRejection::RemoveUsed);
        }
        let cost = self.config.remove_cost;
        if run.gold < cost {
            return Err(ShopRejection::NotEnoughGold {
                required: cost,
                available: run.gold,
            });
        }
        let index = run
            .deck
            .iter()
            .position(|id| id == card)
            .ok_or_else(|| ShopRejection::CardNotInDeck(card.to_string()))?;

        run.gold -= cost;
        run.deck.remove(index);
        run.shop.remove_used = true;

        tracing::info!(card = %card, cost, gold = run.gold, "card removed");
        Ok(())
    }
}

/// Normal candidates first, then premium.
impl CardResolver for ShopEngine {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        self.candidates.resolve(id).or_else(|| self.premium.resolve(id))
    }
}
