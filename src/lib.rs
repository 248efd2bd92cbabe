//! # dungeon-deck
//!
//! Run progression and combat economy for a roguelike deckbuilder.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Every roll comes from a seed derived from the run
//!    seed. The same seed replays the same map, shuffles, rewards and shop.
//!
//! 2. **IDs Across Boundaries**: Decks, shop slots and saves hold `CardId`s.
//!    Definitions are resolved on demand through a `CardResolver` chain, so
//!    a card missing after a content change is skipped, not fatal.
//!
//! 3. **Step-Driven Turns**: Enemy turns are a cursor the host resumes one
//!    step at a time, or all at once. Nothing depends on animation timing.
//!
//! 4. **Rejections, Not Panics**: Invalid actions return a typed rejection
//!    and leave state untouched.
//!
//! ## Modules
//!
//! - `core`: RNG and seed derivation, configuration, state signal, errors
//! - `cards`: Card definitions, registry, pools and ID resolution
//! - `rewards`: Weighted roller, pool composition, post-battle offers
//! - `battle`: Deck piles, damage, battle state machine
//! - `map`: Node types and seeded plan generation
//! - `shop`: Slot-stable shop with premium slot, reroll and removal
//! - `run`: Run state, session orchestrator, meta progression, saves

pub mod battle;
pub mod cards;
pub mod core;
pub mod map;
pub mod rewards;
pub mod run;
pub mod shop;

// Re-export commonly used types
pub use crate::core::{
    BattleRejection, EnemyBalance, GameRng, RewardConfig, RollConfig, RunBalance, RunRejection,
    SaveError, SessionConfig, ShopConfig, ShopRejection, StateSignal, SubscriptionId,
};

pub use crate::cards::{
    CardDefinition, CardEffectKind, CardId, CardPoolDefinition, CardRarity, CardRegistry,
    CardResolver, PoolContext, PoolUsage, ResolutionChain,
};

pub use crate::rewards::{compose_pools, roll, RewardOffer, Weighted};

pub use crate::battle::{
    BattleEngine, BattleEvent, BattlePhase, BattleReport, BattleResult, BattleSetup, DeckRuntime,
    EncounterKind,
};

pub use crate::map::{generate, MapPlan, MapTemplate, NodeType};

pub use crate::shop::{ShopEngine, ShopOffer};

pub use crate::run::{
    ContentCatalog, ContinueFallback, KeyValueStore, MemoryStore, MetaProgress, OathDefinition,
    RunOutcome, RunSaveData, RunSession, RunState,
};
