//! Shop engine tests.
//!
//! Slot stability across visits and rerolls, premium slot fallback, and
//! the gold checks on reroll, buy and removal.

use dungeon_deck::cards::{CardDefinition, CardEffectKind, CardId, CardRarity};
use dungeon_deck::core::{RollConfig, ShopConfig, ShopRejection};
use dungeon_deck::run::RunState;
use dungeon_deck::shop::ShopEngine;
use proptest::prelude::*;

fn catalog(n: usize) -> Vec<CardDefinition> {
    (0..n)
        .map(|i| CardDefinition::new(format!("card_{i}"), CardEffectKind::Attack, 5))
        .collect()
}

fn engine() -> ShopEngine {
    ShopEngine::from_cards(ShopConfig::default(), RollConfig::default(), &catalog(10))
}

fn run_at_shop(gold: u32) -> RunState {
    let mut run = RunState::new("knight", 99, 60, gold);
    run.node_index = 2;
    run
}

// =============================================================================
// Scenarios
// =============================================================================

/// Test that a reroll costing 25 is refused at 20 gold, leaving slots alone.
#[test]
fn test_reroll_rejected_without_gold() {
    let shop = engine();
    let mut run = run_at_shop(20);
    assert!(shop.enter(&mut run));
    assert_eq!(run.shop.offer_ids.len(), 4);

    let before = run.shop.clone();
    assert!(!shop.can_reroll(&run));
    assert_eq!(
        shop.reroll(&mut run),
        Err(ShopRejection::NotEnoughGold {
            required: 25,
            available: 20
        })
    );
    assert_eq!(run.shop, before);
    assert_eq!(run.gold, 20);
}

/// Test that an empty premium pool falls back to the normal candidates.
#[test]
fn test_premium_falls_back_to_normal_pool() {
    let shop = engine();
    assert!(shop.premium_candidates().is_empty());

    let mut run = run_at_shop(100);
    shop.enter(&mut run);

    let offers = shop.offers(&run, &shop);
    let premium = offers.iter().find(|o| o.premium).unwrap();
    assert_eq!(premium.slot, 3);
    assert!(premium.card.is_some());
    // Common base 25 * 1.5, rounded up.
    assert_eq!(premium.price, Some(38));
}

/// Test that a one-card pool leaves normal slots blank and the premium slot duplicates.
#[test]
fn test_premium_duplicate_when_pool_is_tiny() {
    let shop = ShopEngine::from_cards(
        ShopConfig::default().with_reroll_cost(0),
        RollConfig::default(),
        &catalog(1),
    );
    let mut run = run_at_shop(0);
    shop.enter(&mut run);

    // One candidate: a single normal slot fills, the premium slot keeps the duplicate.
    let filled: Vec<_> = run.shop.offer_ids.iter().filter(|id| !id.is_blank()).collect();
    assert_eq!(filled.len(), 2);
    assert_eq!(filled[0], filled[1]);
    shop.reroll(&mut run).unwrap();
}

// =============================================================================
// Visits
// =============================================================================

/// Test that re-entering the same node keeps the offers, and a new node rolls fresh ones.
#[test]
fn test_visit_persistence() {
    let shop = engine();
    let mut run = run_at_shop(200);
    assert!(shop.enter(&mut run));
    let first = run.shop.offer_ids.clone();

    assert!(!shop.enter(&mut run));
    assert_eq!(run.shop.offer_ids, first);

    shop.buy(&mut run, 0, &shop).unwrap();
    shop.remove_card(&mut run, &first[0]).unwrap();
    assert!(run.shop.remove_used);

    run.node_index = 4;
    assert!(shop.enter(&mut run));
    assert!(!run.shop.remove_used);
    assert!(run.shop.offer_sold.iter().all(|sold| !sold));
    assert_eq!(run.shop.reroll_count, 0);
}

/// Test that the n-th reroll of a visit is reproducible.
#[test]
fn test_reroll_is_reproducible() {
    let shop = engine();
    let mut a = run_at_shop(500);
    let mut b = run_at_shop(500);
    shop.enter(&mut a);
    shop.enter(&mut b);

    for _ in 0..3 {
        shop.reroll(&mut a).unwrap();
        shop.reroll(&mut b).unwrap();
        assert_eq!(a.shop.offer_ids, b.shop.offer_ids);
    }
    assert_eq!(a.shop.reroll_count, 3);
    assert_eq!(a.gold, 500 - 3 * 25);
}

/// Test buy rejections and the premium markup.
#[test]
fn test_buy_rules() {
    let cards: Vec<_> = catalog(8)
        .into_iter()
        .map(|c| c.with_rarity(CardRarity::Rare))
        .collect();
    let shop = ShopEngine::from_cards(ShopConfig::default(), RollConfig::default(), &cards);
    let mut run = run_at_shop(100);

    assert_eq!(shop.buy(&mut run, 0, &shop), Err(ShopRejection::NotInShop));
    shop.enter(&mut run);

    assert_eq!(shop.buy(&mut run, 9, &shop), Err(ShopRejection::InvalidSlot(9)));
    assert_eq!(
        shop.buy(&mut run, 3, &shop),
        Err(ShopRejection::NotEnoughGold {
            required: 120,
            available: 100
        })
    );

    let bought = shop.buy(&mut run, 0, &shop).unwrap();
    assert_eq!(run.gold, 20);
    assert_eq!(run.deck, vec![bought]);
    assert_eq!(shop.buy(&mut run, 0, &shop), Err(ShopRejection::SlotSold(0)));
}

/// Test that removal works once per visit and needs the card in the deck.
#[test]
fn test_remove_once_per_visit() {
    let shop = engine();
    let mut run = run_at_shop(200);
    run.deck = vec![CardId::new("strike"), CardId::new("strike")];
    shop.enter(&mut run);

    assert_eq!(
        shop.remove_card(&mut run, &CardId::new("ghost")),
        Err(ShopRejection::CardNotInDeck("ghost".to_string()))
    );
    shop.remove_card(&mut run, &CardId::new("strike")).unwrap();
    assert_eq!(run.deck.len(), 1);
    assert_eq!(run.gold, 125);
    assert_eq!(
        shop.remove_card(&mut run, &CardId::new("strike")),
        Err(ShopRejection::RemoveUsed)
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Sold slots never change or un-sell, whatever rerolls follow.
    #[test]
    fn test_sold_slots_are_permanent(
        seed in 1u64..u64::MAX,
        sold in proptest::collection::vec(any::<bool>(), 4),
        rerolls in 0usize..8,
    ) {
        let shop = ShopEngine::from_cards(
            ShopConfig::default().with_reroll_cost(0),
            RollConfig::default(),
            &catalog(12),
        );
        let mut run = RunState::new("knight", seed, 60, 10_000);
        shop.enter(&mut run);
        for (slot, &sell) in sold.iter().enumerate() {
            if sell {
                shop.buy(&mut run, slot, &shop).unwrap();
            }
        }
        let frozen: Vec<(usize, CardId)> = run
            .shop
            .offer_ids
            .iter()
            .cloned()
            .enumerate()
            .filter(|&(slot, _)| run.shop.is_sold(slot))
            .collect();

        for _ in 0..rerolls {
            if shop.reroll(&mut run).is_err() {
                break;
            }
        }
        for (slot, id) in frozen {
            prop_assert!(run.shop.is_sold(slot));
            prop_assert_eq!(&run.shop.offer_ids[slot], &id);
        }
    }

    /// Normal slots never repeat a card within one roll.
    #[test]
    fn test_normal_slots_unique(seed in 1u64..u64::MAX) {
        let shop = engine();
        let mut run = RunState::new("knight", seed, 60, 0);
        shop.enter(&mut run);
        let normal = &run.shop.offer_ids[..3];
        prop_assert!(normal[0] != normal[1] && normal[1] != normal[2] && normal[0] != normal[2]);
    }
}
