//! Run session tests.
//!
//! Whole runs through the public API:
//! - Node-by-node progression to victory and defeat
//! - Outcome latching
//! - Save/continue through a shared key-value store
//! - Meta progression bonuses and unlocks

use std::cell::RefCell;
use std::rc::Rc;

use dungeon_deck::cards::{CardDefinition, CardEffectKind, CardId, CardPoolDefinition, PoolUsage};
use dungeon_deck::core::{EnemyBalance, RunBalance, RunRejection, SaveError, SessionConfig};
use dungeon_deck::map::{MapTemplate, NodeType};
use dungeon_deck::run::{
    ContentCatalog, ContinueFallback, KeyValueStore, MemoryStore, MetaProgress, OathDefinition,
    RunOutcome, RunSaveData, RunSession, META_KEY, SAVE_KEY,
};
use proptest::prelude::*;

/// Store handle that outlives a session.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<MemoryStore>>);

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        self.0.borrow_mut().set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

fn content() -> ContentCatalog {
    ContentCatalog::new()
        .with_library(vec![
            CardDefinition::new("strike", CardEffectKind::Attack, 6),
            CardDefinition::new("defend", CardEffectKind::Block, 5),
        ])
        .with_pool_cards(vec![
            CardDefinition::new("cleave", CardEffectKind::Attack, 8),
            CardDefinition::new("smite", CardEffectKind::Attack, 12),
            CardDefinition::new("hidden_blade", CardEffectKind::Attack, 4),
        ])
        .with_pool(
            CardPoolDefinition::new("knight_attacks", PoolUsage::Both)
                .with_entry("strike", 2.0)
                .with_entry("cleave", 1.0)
                .with_entry("smite", 1.0),
        )
        .with_pool(CardPoolDefinition::new("secrets", PoolUsage::Reward).with_entry("hidden_blade", 1.0))
        .with_oath(
            OathDefinition::new("knight")
                .with_start_cards("strike", 5)
                .with_base_pool("knight_attacks"),
        )
        .with_balance(RunBalance::named("easy").with_enemies(EnemyBalance {
            normal_hp: 6,
            boss_hp: 6,
            normal_damage: 1,
            boss_damage: 1,
            ..EnemyBalance::default()
        }))
        .with_balance(RunBalance::named("brutal").with_enemies(EnemyBalance {
            normal_damage: 500,
            ..EnemyBalance::default()
        }))
        .with_template(MapTemplate::with_length("long", 8))
}

fn session_with(store: SharedStore, seed: u64) -> RunSession {
    RunSession::new(content(), SessionConfig::default(), Box::new(store)).with_seed(seed)
}

fn session(seed: u64) -> RunSession {
    RunSession::new(content(), SessionConfig::default(), Box::new(MemoryStore::new())).with_seed(seed)
}

/// Clear the current node the way a player would.
fn clear_current_node(session: &mut RunSession) {
    let index = session.state().unwrap().node_index;
    match session.enter_node(index).unwrap() {
        NodeType::Battle | NodeType::Boss => {
            // Every card in this content is an attack that one-shots a 6 HP enemy.
            session.play_card(0).unwrap();
            assert!(session.pending_reward().is_some());
            session.choose_reward(0).unwrap();
        }
        NodeType::Shop => session.leave_shop().unwrap(),
        NodeType::Rest => {
            session.rest().unwrap();
        }
    }
}

// =============================================================================
// Progression
// =============================================================================

/// Test a whole run from the first node to victory.
#[test]
fn test_run_to_victory() {
    let mut session = session(11);
    session.start_new_run("knight", "easy", "long").unwrap();
    assert_eq!(session.plan().len(), 8);
    assert_eq!(session.get_node_type(0), NodeType::Battle);
    assert_eq!(session.get_node_type(100), NodeType::Boss);

    let combat_nodes = session.plan().iter().filter(|n| n.is_combat()).count() as u32;
    while !session.is_run_finished() {
        clear_current_node(&mut session);
    }

    let run = session.state().unwrap();
    assert_eq!(run.last_outcome, RunOutcome::Victory);
    assert_eq!(run.cleared_battles, combat_nodes);
    assert_eq!(run.reward_roll_count, combat_nodes);
    assert_eq!(run.deck.len(), 5 + combat_nodes as usize);
    assert!(session.is_node_cleared(7));
    assert_eq!(session.enter_node(7), Err(RunRejection::RunEnded));
}

/// Test that nodes must be entered in order and actions match the node type.
#[test]
fn test_node_order_and_type_checks() {
    let mut session = session(3);
    assert_eq!(session.enter_node(0), Err(RunRejection::NoActiveRun));
    session.start_new_run("knight", "easy", "").unwrap();

    assert_eq!(
        session.enter_node(1),
        Err(RunRejection::NotCurrentNode { index: 1, current: 0 })
    );
    assert_eq!(session.enter_node(99), Err(RunRejection::InvalidNode(99)));
    assert_eq!(session.rest(), Err(RunRejection::WrongNodeType { expected: "rest" }));

    session.enter_node(0).unwrap();
    assert_eq!(session.enter_node(0), Err(RunRejection::BattleInProgress));
    assert_eq!(
        session.mark_node_cleared_and_advance(),
        Err(RunRejection::BattleInProgress)
    );
    assert_eq!(session.buy(0), Err(RunRejection::BattleInProgress));
}

/// Test that losing a battle ends the run in defeat.
#[test]
fn test_defeat() {
    let mut session = session(5);
    session.start_new_run("knight", "brutal", "").unwrap();
    session.enter_node(0).unwrap();

    session.end_turn().unwrap();
    assert_eq!(session.play_card(0), Err(RunRejection::Battle(dungeon_deck::BattleRejection::Resolving)));
    // Abort is refused mid-resolution.
    assert_eq!(session.abort(), Err(RunRejection::TurnResolving));

    while session.resume_battle().is_some() {}
    let run = session.state().unwrap();
    assert_eq!(run.last_outcome, RunOutcome::Defeat);
    assert_eq!(run.hp, 0);
    assert!(session.pending_reward().is_none());
}

/// Test that restart keeps the oath and balance but reseeds the map.
#[test]
fn test_restart() {
    let mut session = session(8);
    session.start_new_run("knight", "easy", "long").unwrap();
    let first_seed = session.map_seed();
    session.abort().unwrap();

    session.restart().unwrap();
    let run = session.state().unwrap();
    assert_eq!(run.last_outcome, RunOutcome::None);
    assert_eq!(run.oath_id, "knight");
    assert_eq!(run.node_index, 0);
    assert_eq!(session.balance().name, "easy");
    assert_eq!(session.plan().len(), 8);
    assert_ne!(session.map_seed(), first_seed);
}

/// Test that the same master seed replays the same run.
#[test]
fn test_seeded_sessions_match() {
    let mut a = session(42);
    let mut b = session(42);
    a.start_new_run("knight", "easy", "long").unwrap();
    b.start_new_run("knight", "easy", "long").unwrap();
    assert_eq!(a.plan(), b.plan());

    clear_current_node(&mut a);
    clear_current_node(&mut b);
    assert_eq!(a.state(), b.state());
}

// =============================================================================
// Outcome latch
// =============================================================================

proptest! {
    /// The first recorded outcome wins, whatever follows.
    #[test]
    fn test_end_run_keeps_first_outcome(first in 1i32..4, second in 1i32..4) {
        let mut session = session(1);
        session.start_new_run("knight", "easy", "").unwrap();
        let first = RunOutcome::from_raw(first);
        let second = RunOutcome::from_raw(second);

        prop_assert!(session.end_run(first));
        prop_assert!(!session.end_run(second));
        prop_assert_eq!(session.state().unwrap().last_outcome, first);
    }
}

/// Test that a run ended mid-battle accepts no more battle input.
#[test]
fn test_ended_run_rejects_battle_input() {
    let mut session = session(6);
    session.start_new_run("knight", "easy", "").unwrap();
    session.enter_node(0).unwrap();
    let gold = session.state().unwrap().gold;

    assert!(session.end_run(RunOutcome::Aborted));
    assert!(session.battle().is_none());

    assert_eq!(session.play_card(0), Err(RunRejection::RunEnded));
    assert_eq!(session.select_enemy(0), Err(RunRejection::RunEnded));
    assert_eq!(session.end_turn(), Err(RunRejection::RunEnded));
    assert_eq!(session.resolve_turn(), Err(RunRejection::RunEnded));
    assert!(session.resume_battle().is_none());

    let run = session.state().unwrap();
    assert_eq!(run.gold, gold);
    assert_eq!(run.last_outcome, RunOutcome::Aborted);
    assert!(session.pending_reward().is_none());
}

/// Test that a lost battle stays readable after the run ends.
#[test]
fn test_defeat_keeps_finished_battle() {
    let mut session = session(5);
    session.start_new_run("knight", "brutal", "").unwrap();
    session.enter_node(0).unwrap();
    session.end_turn().unwrap();
    session.resolve_turn().unwrap();

    assert_eq!(session.state().unwrap().last_outcome, RunOutcome::Defeat);
    assert!(session.battle().is_some_and(|b| b.is_over()));
    assert_eq!(session.resolve_turn(), Err(RunRejection::RunEnded));
}

// =============================================================================
// Save and continue
// =============================================================================

/// Test that a saved run continues with the same state and map.
#[test]
fn test_save_and_continue() {
    let store = SharedStore::default();
    let mut first = session_with(store.clone(), 17);
    first.start_new_run("knight", "easy", "long").unwrap();
    clear_current_node(&mut first);
    first.save_run().unwrap();
    assert!(first.has_save());

    let summary = first.peek_summary().unwrap();
    assert_eq!(summary.oath_id, "knight");
    assert_eq!(summary.node_index, 1);

    let mut second = session_with(store.clone(), 99);
    assert!(second.try_continue(&ContinueFallback::default()));
    assert_eq!(second.state(), first.state());
    assert_eq!(second.plan(), first.plan());
    assert_eq!(second.map_seed(), first.map_seed());
    assert_eq!(second.template().name, "long");
    assert_eq!(second.deck_cards().len(), 6);
}

/// Test that a shop visit survives a save mid-visit.
#[test]
fn test_shop_slots_survive_continue() {
    let store = SharedStore::default();
    let mut first = session_with(store.clone(), 23);
    first.start_new_run("knight", "easy", "long").unwrap();
    while first.get_node_type(first.state().unwrap().node_index) != NodeType::Shop {
        clear_current_node(&mut first);
    }
    let index = first.state().unwrap().node_index;
    first.enter_node(index).unwrap();
    let offers = first.shop_offers();
    assert_eq!(offers.len(), 4);
    first.save_run().unwrap();

    let mut second = session_with(store, 1);
    assert!(second.try_continue(&ContinueFallback::default()));
    second.enter_node(index).unwrap();
    assert_eq!(second.shop_offers(), offers);
}

/// Test that unknown deck IDs are dropped on continue and the rest load.
#[test]
fn test_unresolved_ids_skipped() {
    let mut store = SharedStore::default();
    let mut data = RunSaveData::default();
    data.oath_id = "knight".into();
    data.balance_name = "easy".into();
    data.map_seed = 7;
    data.state.seed = 7;
    data.state.max_hp = 60;
    data.state.hp = 33;
    data.state.deck_card_ids = vec!["strike".into(), "removed_card".into(), "cleave".into()];
    store.set(SAVE_KEY, data.to_json().unwrap());

    let mut session = session_with(store, 2);
    session.continue_from_save(&ContinueFallback::default()).unwrap();

    let run = session.state().unwrap();
    assert_eq!(run.deck, vec![CardId::new("strike"), CardId::new("cleave")]);
    assert_eq!(run.hp, 33);
    // No plan snapshot: regenerated from the default template and the saved seed.
    assert_eq!(session.plan(), &dungeon_deck::map::generate(6, 7));
}

/// Test the oath fallback chain and clearing of unusable saves.
#[test]
fn test_continue_fallbacks() {
    let mut store = SharedStore::default();
    let mut data = RunSaveData::default();
    data.oath_id = "retired_oath".into();
    data.balance_name = "easy".into();
    data.state.max_hp = 60;
    store.set(SAVE_KEY, data.to_json().unwrap());

    let mut session = session_with(store.clone(), 2);
    assert!(matches!(
        session.continue_from_save(&ContinueFallback::default()),
        Err(SaveError::MissingOath(_))
    ));
    assert!(session.has_save());

    session
        .continue_from_save(&ContinueFallback::new("knight", "easy"))
        .unwrap();
    // The saved state has no oath of its own, so it takes the fallback's.
    assert_eq!(session.state().unwrap().oath_id, "knight");
    // Zero map seed was replaced.
    assert_ne!(session.map_seed(), 0);

    assert!(!session.try_continue(&ContinueFallback::default()));
    assert!(!session.has_save());
    assert!(!session.try_continue(&ContinueFallback::default()));
}

/// Test that a save whose oath is gone continues as the fallback oath.
#[test]
fn test_continue_adopts_fallback_oath() {
    let mut store = SharedStore::default();
    let mut data = RunSaveData::default();
    data.oath_id = "knight".into();
    data.balance_name = "easy".into();
    data.map_seed = 5;
    data.state.oath_id = "knight".into();
    data.state.seed = 5;
    data.state.max_hp = 60;
    data.state.hp = 40;
    data.state.deck_card_ids = vec!["strike".into(), "strike".into()];
    store.set(SAVE_KEY, data.to_json().unwrap());

    let mage_content = ContentCatalog::new()
        .with_library(vec![CardDefinition::new("strike", CardEffectKind::Attack, 6)])
        .with_pool_cards(vec![CardDefinition::new("fireball", CardEffectKind::Attack, 14)])
        .with_pool(CardPoolDefinition::new("fire", PoolUsage::Both).with_entry("fireball", 1.0))
        .with_oath(
            OathDefinition::new("mage")
                .with_start_cards("strike", 5)
                .with_base_pool("fire"),
        )
        .with_balance(RunBalance::named("easy"));
    let mut session =
        RunSession::new(mage_content, SessionConfig::default(), Box::new(store)).with_seed(3);

    assert!(session.try_continue(&ContinueFallback::new("mage", "easy")));
    let run = session.state().unwrap();
    assert_eq!(run.oath_id, "mage");
    assert_eq!(run.hp, 40);

    let rewards: Vec<_> = session
        .reward_candidates()
        .iter()
        .map(|c| c.value.id.as_str())
        .collect();
    assert_eq!(rewards, vec!["fireball"]);
    assert!(session.shop().candidates().iter().any(|c| c.value.id.as_str() == "fireball"));

    session.restart().unwrap();
    assert_eq!(session.state().unwrap().oath_id, "mage");
}

/// Test that a corrupt save is reported and cleared.
#[test]
fn test_corrupt_save() {
    let mut store = SharedStore::default();
    store.set(SAVE_KEY, "{definitely not a save".to_string());

    let mut session = session_with(store, 4);
    assert!(session.peek_summary().is_none());
    assert!(!session.try_continue(&ContinueFallback::default()));
    assert!(!session.has_save());
    assert!(session.state().is_none());
}

/// Test that saving an ended run clears the save slot.
#[test]
fn test_ended_run_clears_save() {
    let store = SharedStore::default();
    let mut session = session_with(store.clone(), 6);
    session.start_new_run("knight", "easy", "").unwrap();
    session.save_run().unwrap();
    assert!(store.contains(SAVE_KEY));

    session.abort().unwrap();
    session.save_run().unwrap();
    assert!(!store.contains(SAVE_KEY));
}

// =============================================================================
// Meta progression
// =============================================================================

/// Test that stored start bonuses apply to new runs.
#[test]
fn test_meta_start_bonuses() {
    let mut store = SharedStore::default();
    let meta = MetaProgress {
        start_gold_bonus: 25,
        start_max_hp_bonus: 10,
        start_bonus_card_ids: vec![CardId::new("defend"), CardId::new("missing")],
        ..MetaProgress::default()
    };
    meta.save(&mut store);

    let mut session = session_with(store, 9);
    session.start_new_run("knight", "easy", "").unwrap();
    let run = session.state().unwrap();
    assert_eq!(run.gold, 75);
    assert_eq!((run.hp, run.max_hp), (70, 70));
    assert_eq!(run.deck.len(), 6);
    assert_eq!(run.copies_of(&CardId::new("defend")), 1);
}

/// Test that unlocking a pool persists and widens reward candidates.
#[test]
fn test_unlock_pool() {
    let store = SharedStore::default();
    let mut session = session_with(store.clone(), 12);
    session.start_new_run("knight", "easy", "").unwrap();

    let hidden = CardId::new("hidden_blade");
    assert!(session.resolve_card(&hidden).is_none());

    assert!(session.unlock_pool("secrets"));
    assert!(!session.unlock_pool("secrets"));
    assert!(session.resolve_card(&hidden).is_some());
    assert!(session
        .reward_candidates()
        .iter()
        .any(|c| c.value.id == hidden));

    let reloaded = MetaProgress::load(&store);
    assert!(reloaded.is_unlocked("secrets"));
    assert!(store.contains(META_KEY));
}
