//! Core building blocks shared by every engine: seeded RNG, tunable
//! configuration, the state-changed signal and error types.

pub mod config;
pub mod error;
pub mod rng;
pub mod signal;

pub use config::{
    EnemyBalance, RarityTable, RewardConfig, RollConfig, RunBalance, SessionConfig, ShopConfig,
    PREMIUM_RETRY_LIMIT,
};
pub use error::{BattleRejection, Result, RunRejection, SaveError, ShopRejection};
pub use rng::{
    battle_seed, nonzero_seed, premium_attempt_seed, reroll_seed, reward_seed, shop_visit_seed,
    GameRng,
};
pub use signal::{StateSignal, SubscriptionId};
