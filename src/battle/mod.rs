//! Turn-based card battles.
//!
//! ## Key Types
//!
//! - `BattleEngine`: Per-encounter state machine with a resumable turn cursor
//! - `BattleState`: Player and enemy stats plus the selected target
//! - `DeckRuntime`: Draw/hand/discard/exhaust piles
//! - `resolve_damage`: Vulnerable multiplier, block absorption, HP floor

pub mod damage;
pub mod deck;
pub mod engine;
pub mod state;

pub use damage::{resolve_damage, vulnerable_amount, DamageOutcome, MAX_VULNERABLE_TURNS};
pub use deck::{DeckRuntime, Pile};
pub use engine::{BattleEngine, BattleEvent, BattlePhase, BattleReport, BattleResult, TurnStep};
pub use state::{BattleSetup, BattleState, EncounterKind, Enemies, EnemyState, PlayerState, MAX_ENEMIES};
