//! Weighted rolling with optional sampling without replacement.
//!
//! Picks are made by a cumulative-weight scan against `rng.next_f64() * total`.
//! With `unique = true`, each pick is removed before the next draw. When the
//! total weight is not positive the same item set is sampled uniformly, so a
//! non-empty item set never yields an empty roll.
//!
//! Given the same seed and the same candidate ordering the output is
//! identical; rewards and the shop depend on that.

use crate::core::GameRng;

/// A candidate value with its roll weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Weighted<T> {
    pub value: T,
    pub weight: f64,
}

impl<T> Weighted<T> {
    pub fn new(value: T, weight: f64) -> Self {
        Self { value, weight }
    }

    /// Weight as used by the scan: negative and non-finite weights count as 0.
    #[must_use]
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }
}

/// Roll `count` values from `items`.
///
/// - `count` larger than the available items returns as many as available
/// - an empty item set returns an empty list
/// - zero-weight items are only eligible when every weight is zero
pub fn roll<T: Clone>(
    items: &[Weighted<T>],
    count: usize,
    unique: bool,
    rng: &mut GameRng,
) -> Vec<T> {
    if items.is_empty() || count == 0 {
        return Vec::new();
    }

    let total: f64 = items.iter().map(Weighted::effective_weight).sum();
    let uniform = total <= 0.0;

    // (item index, weight) pairs still eligible
    let mut remaining: Vec<(usize, f64)> = if uniform {
        tracing::debug!(items = items.len(), "all weights non-positive; rolling uniformly");
        (0..items.len()).map(|i| (i, 1.0)).collect()
    } else {
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let w = item.effective_weight();
                (w > 0.0).then_some((i, w))
            })
            .collect()
    };

    let mut picked = Vec::with_capacity(count.min(remaining.len()));
    while picked.len() < count && !remaining.is_empty() {
        let slot = pick_slot(&remaining, rng);
        let (item_index, _) = remaining[slot];
        picked.push(items[item_index].value.clone());
        if unique {
            remaining.remove(slot);
        }
    }
    picked
}

/// Cumulative scan over `(index, weight)` pairs; returns a position in `remaining`.
fn pick_slot(remaining: &[(usize, f64)], rng: &mut GameRng) -> usize {
    let total: f64 = remaining.iter().map(|&(_, w)| w).sum();
    let threshold = rng.next_f64() * total;

    let mut acc = 0.0;
    for (slot, &(_, weight)) in remaining.iter().enumerate() {
        acc += weight;
        if threshold < acc {
            return slot;
        }
    }

    // Floating point edge case
    remaining.len() - 1
}
