//! Card pool composition.
//!
//! Turns a set of pools into one weighted candidate list for a roll:
//!
//! 1. Pools not allowed in the current [`PoolContext`] are skipped.
//! 2. Valid entries are merged by card ID; weights of repeated IDs are summed.
//! 3. Each ID is resolved through a [`CardResolver`]. Misses are logged and dropped.
//! 4. The base weight is multiplied by the rarity weight and by the
//!    duplicate-ownership penalty for copies already in the deck.
//! 5. If nothing ends up with a positive weight, every candidate gets weight 1.
//!
//! Candidate order follows first appearance across the pools, which keeps
//! rolls reproducible for a given seed.

use rustc_hash::{FxHashMap, FxHashSet};

use super::roller::Weighted;
use crate::cards::{CardDefinition, CardId, CardPoolDefinition, CardResolver, PoolContext};
use crate::core::RollConfig;

/// Count copies of each card ID in a deck.
#[must_use]
pub fn owned_counts(deck: &[CardId]) -> FxHashMap<&CardId, u32> {
    let mut counts = FxHashMap::default();
    for id in deck {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Weight factor for a candidate the deck owns `copies` of.
#[must_use]
pub fn duplicate_factor(copies: u32, config: &RollConfig) -> f64 {
    if copies == 0 {
        return 1.0;
    }
    let multiplier = config.duplicate_multiplier.clamp(0.0001, 1.0);
    if config.scale_by_copies {
        let exponent = copies.min(config.max_copy_exponent.max(1));
        multiplier.powi(exponent as i32)
    } else {
        multiplier
    }
}

/// Merge pool entries allowed in `context` by card ID, summing weights.
///
/// Returns `(id, summed weight)` in first-seen order.
pub fn merge_pools<'a>(
    pools: impl IntoIterator<Item = &'a CardPoolDefinition>,
    context: PoolContext,
) -> Vec<(CardId, f64)> {
    let mut merged: Vec<(CardId, f64)> = Vec::new();
    let mut index: FxHashMap<CardId, usize> = FxHashMap::default();

    for pool in pools {
        if !pool.allows(context) {
            continue;
        }
        for entry in pool.valid_entries() {
            match index.get(&entry.card) {
                Some(&i) => merged[i].1 += entry.weight,
                None => {
                    index.insert(entry.card.clone(), merged.len());
                    merged.push((entry.card.clone(), entry.weight));
                }
            }
        }
    }
    merged
}

/// Resolve merged pool entries into cards carrying their summed base weight.
pub fn resolve_pools<'a>(
    pools: impl IntoIterator<Item = &'a CardPoolDefinition>,
    context: PoolContext,
    resolver: &dyn CardResolver,
) -> Vec<Weighted<CardDefinition>> {
    merge_pools(pools, context)
        .into_iter()
        .filter_map(|(id, base)| match resolver.resolve(&id) {
            Some(card) => Some(Weighted::new(card.clone(), base)),
            None => {
                tracing::warn!(card = %id, ?context, "pool entry did not resolve; skipped");
                None
            }
        })
        .collect()
}

/// Base weight 1 for each distinct card, in order.
#[must_use]
pub fn flat_candidates(cards: &[CardDefinition]) -> Vec<Weighted<CardDefinition>> {
    let mut seen: FxHashSet<&CardId> = FxHashSet::default();
    cards
        .iter()
        .filter(|card| !card.id.is_blank() && seen.insert(&card.id))
        .map(|card| Weighted::new(card.clone(), 1.0))
        .collect()
}

/// Multiply base weights by the rarity weight and the duplicate penalty.
///
/// Falls back to uniform weights when nothing stays positive.
#[must_use]
pub fn apply_roll_weights(
    base: &[Weighted<CardDefinition>],
    deck: &[CardId],
    config: &RollConfig,
) -> Vec<Weighted<CardDefinition>> {
    let owned = owned_counts(deck);

    let mut candidates: Vec<Weighted<CardDefinition>> = base
        .iter()
        .map(|candidate| {
            let card = &candidate.value;
            let copies = owned.get(&card.id).copied().unwrap_or(0);
            let weight = candidate.effective_weight()
                * config.rarity_weights.get(card.rarity)
                * duplicate_factor(copies, config);
            Weighted::new(card.clone(), weight)
        })
        .collect();

    uniform_if_exhausted(&mut candidates);
    candidates
}

/// Compose the weighted candidate list for a roll from a set of pools.
pub fn compose_pools<'a>(
    pools: impl IntoIterator<Item = &'a CardPoolDefinition>,
    context: PoolContext,
    resolver: &dyn CardResolver,
    deck: &[CardId],
    config: &RollConfig,
) -> Vec<Weighted<CardDefinition>> {
    apply_roll_weights(&resolve_pools(pools, context, resolver), deck, config)
}

/// Weigh a flat candidate list by rarity and ownership.
///
/// Used when no pool is available and candidates come straight from the
/// registry or the deck. Repeated IDs in `cards` are collapsed.
#[must_use]
pub fn weigh_candidates(
    cards: &[CardDefinition],
    deck: &[CardId],
    config: &RollConfig,
) -> Vec<Weighted<CardDefinition>> {
    apply_roll_weights(&flat_candidates(cards), deck, config)
}

impl CardResolver for [Weighted<CardDefinition>] {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        if id.is_blank() {
            return None;
        }
        self.iter().map(|c| &c.value).find(|c| &c.id == id)
    }
}

impl CardResolver for Vec<Weighted<CardDefinition>> {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        self.as_slice().resolve(id)
    }
}

fn uniform_if_exhausted(candidates: &mut [Weighted<CardDefinition>]) {
    if !candidates.is_empty() && candidates.iter().all(|c| c.effective_weight() <= 0.0) {
        tracing::debug!(count = candidates.len(), "composed weights exhausted; using uniform weights");
        for candidate in candidates.iter_mut() {
            candidate.weight = 1.0;
        }
    }
}
