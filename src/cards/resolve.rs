//! Turning persisted card IDs back into card values.
//!
//! Lookups go through a fixed chain: the primary registry first, then the
//! active reward candidates, then the active shop candidates. The first hit
//! wins. An ID that no link resolves is logged and skipped; it is never an
//! error for the caller.

use super::definition::{CardDefinition, CardId};

/// Anything that can look a card up by ID.
pub trait CardResolver {
    /// Find the definition for `id`, or `None` if this source doesn't know it.
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition>;

    /// Resolve a list of IDs in order, skipping (and logging) the misses.
    fn resolve_all(&self, ids: &[CardId]) -> Vec<CardDefinition> {
        ids.iter()
            .filter_map(|id| {
                let found = self.resolve(id).cloned();
                if found.is_none() {
                    tracing::warn!(card = %id, "unresolved card id skipped");
                }
                found
            })
            .collect()
    }
}

impl CardResolver for [CardDefinition] {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        if id.is_blank() {
            return None;
        }
        self.iter().find(|c| &c.id == id)
    }
}

impl CardResolver for Vec<CardDefinition> {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        self.as_slice().resolve(id)
    }
}

/// Registry -> reward candidates -> shop candidates.
#[derive(Clone, Copy)]
pub struct ResolutionChain<'a> {
    registry: &'a dyn CardResolver,
    reward: &'a dyn CardResolver,
    shop: &'a dyn CardResolver,
}

impl<'a> ResolutionChain<'a> {
    #[must_use]
    pub fn new(
        registry: &'a dyn CardResolver,
        reward: &'a dyn CardResolver,
        shop: &'a dyn CardResolver,
    ) -> Self {
        Self {
            registry,
            reward,
            shop,
        }
    }
}

impl CardResolver for ResolutionChain<'_> {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        if id.is_blank() {
            return None;
        }
        self.registry
            .resolve(id)
            .or_else(|| self.reward.resolve(id))
            .or_else(|| self.shop.resolve(id))
    }
}
