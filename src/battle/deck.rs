//! Per-battle deck piles.
//!
//! Every card sits in exactly one of four piles: draw, hand, discard,
//! exhaust. The draw pile's top is the end of its `Vec`. When the draw pile
//! runs dry mid-draw the discard pile is shuffled back in; exhausted cards
//! never return.

use serde::{Deserialize, Serialize};

use crate::cards::CardDefinition;
use crate::core::GameRng;

/// The four card piles of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
    Exhaust,
}

/// Draw/hand/discard/exhaust piles with a seeded shuffle.
#[derive(Clone, Debug)]
pub struct DeckRuntime {
    draw: Vec<CardDefinition>,
    hand: Vec<CardDefinition>,
    discard: Vec<CardDefinition>,
    exhaust: Vec<CardDefinition>,
    rng: GameRng,
    reshuffles: u32,
}

impl DeckRuntime {
    /// Put `cards` into a freshly shuffled draw pile.
    #[must_use]
    pub fn new(cards: Vec<CardDefinition>, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let mut draw = cards;
        rng.shuffle(&mut draw);
        Self {
            draw,
            hand: Vec::new(),
            discard: Vec::new(),
            exhaust: Vec::new(),
            rng,
            reshuffles: 0,
        }
    }

    /// Move up to `n` cards into the hand. Returns how many were drawn.
    pub fn draw(&mut self, n: usize) -> usize {
        let mut drawn = 0;
        while drawn < n {
            if self.draw.is_empty() && !self.reshuffle_discard() {
                break;
            }
            let Some(card) = self.draw.pop() else {
                break;
            };
            self.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    fn reshuffle_discard(&mut self) -> bool {
        if self.discard.is_empty() {
            return false;
        }
        self.draw.append(&mut self.discard);
        self.rng.shuffle(&mut self.draw);
        self.reshuffles += 1;
        tracing::debug!(cards = self.draw.len(), "reshuffled discard into draw pile");
        true
    }

    /// Move the hand card at `index` to the discard pile.
    pub fn play_from_hand(&mut self, index: usize) -> Option<CardDefinition> {
        self.move_from_hand(index, Pile::Discard)
    }

    /// Move the hand card at `index` to the exhaust pile.
    pub fn exhaust_from_hand(&mut self, index: usize) -> Option<CardDefinition> {
        self.move_from_hand(index, Pile::Exhaust)
    }

    fn move_from_hand(&mut self, index: usize, to: Pile) -> Option<CardDefinition> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        match to {
            Pile::Exhaust => self.exhaust.push(card.clone()),
            _ => self.discard.push(card.clone()),
        }
        Some(card)
    }

    /// Discard the whole hand. Returns the number of cards moved.
    pub fn discard_hand(&mut self) -> usize {
        let count = self.hand.len();
        self.discard.append(&mut self.hand);
        count
    }

    #[must_use]
    pub fn hand(&self) -> &[CardDefinition] {
        &self.hand
    }

    #[must_use]
    pub fn card_in_hand(&self, index: usize) -> Option<&CardDefinition> {
        self.hand.get(index)
    }

    #[must_use]
    pub fn pile(&self, pile: Pile) -> &[CardDefinition] {
        match pile {
            Pile::Draw => &self.draw,
            Pile::Hand => &self.hand,
            Pile::Discard => &self.discard,
            Pile::Exhaust => &self.exhaust,
        }
    }

    #[must_use]
    pub fn pile_len(&self, pile: Pile) -> usize {
        self.pile(pile).len()
    }

    /// Cards across all four piles.
    #[must_use]
    pub fn total(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len() + self.exhaust.len()
    }

    #[must_use]
    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffles
    }
}
