//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: cost, effect,
//! magnitude and rarity. Runs and saves only ever hold a [`CardId`]; the
//! definition is looked up on demand through a resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable string identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "strike"), not a copy in a deck.
/// It is the only form in which cards are persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Blank IDs never resolve and are never registered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Rarity tier. Drives roll weights and shop prices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl CardRarity {
    /// Zero-based tier index (Common = 0).
    #[must_use]
    pub const fn tier(self) -> usize {
        match self {
            CardRarity::Common => 0,
            CardRarity::Uncommon => 1,
            CardRarity::Rare => 2,
            CardRarity::Epic => 3,
            CardRarity::Legendary => 4,
        }
    }
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardEffectKind {
    /// Damage the selected enemy.
    Attack,
    /// Gain block.
    Block,
    /// Draw cards.
    Draw,
    /// Gain energy this turn.
    GainEnergy,
    /// Add vulnerable turns to the selected enemy.
    ApplyVulnerable,
}

impl CardEffectKind {
    /// Whether the effect lands on the selected enemy.
    #[must_use]
    pub const fn targets_enemy(self) -> bool {
        matches!(self, CardEffectKind::Attack | CardEffectKind::ApplyVulnerable)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use dungeon_deck::cards::{CardDefinition, CardEffectKind, CardRarity};
///
/// let bash = CardDefinition::new("bash", CardEffectKind::Attack, 8)
///     .with_cost(2)
///     .with_rarity(CardRarity::Uncommon);
///
/// assert_eq!(bash.cost, 2);
/// assert_eq!(bash.id.as_str(), "bash");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging). Defaults to the ID.
    pub name: String,

    /// Energy cost.
    pub cost: i32,

    pub effect: CardEffectKind,

    /// Effect magnitude (damage, block, cards, energy or turns).
    pub value: i32,

    #[serde(default)]
    pub rarity: CardRarity,

    /// Played copies go to the exhaust pile instead of discard.
    #[serde(default)]
    pub exhaust_on_play: bool,
}

impl CardDefinition {
    /// Create a common, cost-1 card.
    #[must_use]
    pub fn new(id: impl Into<String>, effect: CardEffectKind, value: i32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id: CardId(id),
            cost: 1,
            effect,
            value,
            rarity: CardRarity::Common,
            exhaust_on_play: false,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost.max(0);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: CardRarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn exhausting(mut self) -> Self {
        self.exhaust_on_play = true;
        self
    }
}
