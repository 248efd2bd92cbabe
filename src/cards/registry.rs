//! Card registry for definition lookup.
//!
//! The `CardRegistry` is the primary arena of card definitions. Everything
//! else (decks, pools, shop slots, saves) refers to cards by [`CardId`].

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use super::resolve::CardResolver;

/// Registry of card definitions.
///
/// Keeps insertion order so that anything iterating the registry (fallback
/// candidate lists, for example) is deterministic.
///
/// ## Example
///
/// ```
/// use dungeon_deck::cards::{CardRegistry, CardDefinition, CardEffectKind, CardId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new("strike", CardEffectKind::Attack, 6));
///
/// let found = registry.get(&CardId::new("strike")).unwrap();
/// assert_eq!(found.value, 6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
    index: FxHashMap<CardId, usize>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions.
    pub fn from_cards(cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card);
        }
        registry
    }

    /// Register a card definition.
    ///
    /// The first definition for an ID wins; blank IDs and later duplicates
    /// are ignored. Returns whether the card was added.
    pub fn register(&mut self, card: CardDefinition) -> bool {
        if card.id.is_blank() || self.index.contains_key(&card.id) {
            tracing::debug!(id = %card.id, "ignoring blank or duplicate card registration");
            return false;
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        true
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardDefinition> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// All definitions in registration order.
    #[must_use]
    pub fn as_slice(&self) -> &[CardDefinition] {
        &self.cards
    }
}

impl CardResolver for CardRegistry {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardEffectKind;

    fn card(id: &str) -> CardDefinition {
        CardDefinition::new(id, CardEffectKind::Attack, 6)
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        assert!(registry.register(card("strike")));

        let found = registry.get(&CardId::new("strike"));
        assert!(found.is_some());
        assert_eq!(found.unwrap().value, 6);

        assert!(registry.get(&CardId::new("missing")).is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = CardRegistry::new();
        registry.register(card("strike"));
        assert!(!registry.register(
            CardDefinition::new("strike", CardEffectKind::Block, 99)
        ));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&CardId::new("strike")).unwrap().value, 6);
    }

    #[test]
    fn test_blank_ids_ignored() {
        let mut registry = CardRegistry::new();
        assert!(!registry.register(card("   ")));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iteration_keeps_order() {
        let registry = CardRegistry::from_cards(vec![card("c"), card("a"), card("b")]);
        let ids: Vec<_> = registry.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_contains() {
        let registry = CardRegistry::from_cards(vec![card("strike")]);
        assert!(registry.contains(&CardId::new("strike")));
        assert!(!registry.contains(&CardId::new("defend")));
    }
}
