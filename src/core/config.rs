//! Tunable balance and roll configuration.
//!
//! Nothing in the engines hardcodes prices, costs or weights. Hosts supply
//! these structs (or take the defaults, which carry the reference balance):
//! - `RollConfig`: rarity weights and duplicate-ownership penalty
//! - `ShopConfig`: slot count, prices, reroll/remove costs, premium slot
//! - `RewardConfig`: post-battle offer size
//! - `RunBalance`: starting stats, battle economy, enemy stats
//! - `SessionConfig`: everything a `RunSession` needs in one document

use serde::{Deserialize, Serialize};

use crate::cards::CardRarity;

/// Upper bound on premium slot roll attempts before accepting a duplicate.
pub const PREMIUM_RETRY_LIMIT: u32 = 12;

/// One value per rarity tier, indexed by [`CardRarity`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RarityTable<T>(pub [T; 5]);

impl<T: Copy> RarityTable<T> {
    /// Value for a rarity tier.
    #[must_use]
    pub fn get(&self, rarity: CardRarity) -> T {
        self.0[rarity.tier()]
    }
}

/// Weighted rolling configuration shared by rewards and the shop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollConfig {
    /// Weight multiplier per rarity tier (Common..Legendary).
    pub rarity_weights: RarityTable<f64>,

    /// Multiplier applied to candidates the deck already owns.
    pub duplicate_multiplier: f64,

    /// Apply the multiplier once per owned copy instead of once flat.
    pub scale_by_copies: bool,

    /// Cap on the number of copies counted when `scale_by_copies` is set.
    pub max_copy_exponent: u32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            rarity_weights: RarityTable([1.0, 0.55, 0.25, 0.12, 0.06]),
            duplicate_multiplier: 0.35,
            scale_by_copies: true,
            max_copy_exponent: 3,
        }
    }
}

impl RollConfig {
    /// Set the duplicate-ownership multiplier, clamped into `(0, 1]`.
    pub fn with_duplicate_multiplier(mut self, multiplier: f64) -> Self {
        self.duplicate_multiplier = multiplier.clamp(0.0001, 1.0);
        self
    }

    /// Switch between flat and per-copy duplicate penalty.
    pub fn with_scale_by_copies(mut self, scale: bool) -> Self {
        self.scale_by_copies = scale;
        self
    }

    /// Set the copy exponent cap (at least 1).
    pub fn with_max_copy_exponent(mut self, cap: u32) -> Self {
        self.max_copy_exponent = cap.max(1);
        self
    }

    /// Replace the rarity weight table.
    pub fn with_rarity_weights(mut self, weights: [f64; 5]) -> Self {
        self.rarity_weights = RarityTable(weights);
        self
    }
}

/// Shop tuning. All costs are in gold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Number of offer slots per visit.
    pub offer_count: usize,

    /// Cost of one reroll (0 = free).
    pub reroll_cost: u32,

    /// Cost of the once-per-visit card removal.
    pub remove_cost: u32,

    /// Base price per rarity tier.
    pub prices: RarityTable<u32>,

    /// Slot drawn from the premium pool, if any.
    pub premium_slot: Option<usize>,

    /// Price multiplier for the premium slot.
    pub premium_multiplier: f64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            offer_count: 4,
            reroll_cost: 25,
            remove_cost: 75,
            prices: RarityTable([25, 45, 80, 130, 220]),
            premium_slot: Some(3),
            premium_multiplier: 1.5,
        }
    }
}

impl ShopConfig {
    pub fn with_offer_count(mut self, count: usize) -> Self {
        self.offer_count = count;
        self
    }

    pub fn with_reroll_cost(mut self, cost: u32) -> Self {
        self.reroll_cost = cost;
        self
    }

    pub fn with_remove_cost(mut self, cost: u32) -> Self {
        self.remove_cost = cost;
        self
    }

    pub fn with_premium_slot(mut self, slot: Option<usize>) -> Self {
        self.premium_slot = slot;
        self
    }

    pub fn with_premium_multiplier(mut self, multiplier: f64) -> Self {
        self.premium_multiplier = multiplier.max(0.0);
        self
    }

    /// Premium slot index, only if it falls inside the offer row.
    #[must_use]
    pub fn active_premium_slot(&self) -> Option<usize> {
        self.premium_slot.filter(|&slot| slot < self.offer_count)
    }
}

/// Post-battle reward tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Number of distinct options offered.
    pub option_count: usize,

    /// Whether the player may decline every option.
    pub allow_skip: bool,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            option_count: 3,
            allow_skip: false,
        }
    }
}

/// Enemy stats by node type. External balance data, not engine logic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyBalance {
    pub normal_hp: i32,
    pub boss_hp: i32,
    /// HP removed per extra enemy in a normal encounter.
    pub hp_step: i32,
    /// Floor for normal enemy HP after the step is applied.
    pub min_hp: i32,
    pub normal_damage: i32,
    pub boss_damage: i32,
}

impl Default for EnemyBalance {
    fn default() -> Self {
        Self {
            normal_hp: 30,
            boss_hp: 60,
            hp_step: 5,
            min_hp: 10,
            normal_damage: 8,
            boss_damage: 12,
        }
    }
}

/// Named run balance: starting stats and battle economy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunBalance {
    /// Lookup key used by saves.
    pub name: String,
    pub start_max_hp: i32,
    pub start_gold: u32,
    pub energy_per_turn: i32,
    pub draw_per_turn: usize,
    /// Gold granted on every battle win.
    pub win_gold: u32,
    /// HP restored by a Rest node.
    pub rest_heal: i32,
    /// Requested enemies per normal encounter (clamped 1-3 by the engine).
    pub enemy_count: usize,
    pub enemies: EnemyBalance,
}

impl Default for RunBalance {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            start_max_hp: 60,
            start_gold: 50,
            energy_per_turn: 3,
            draw_per_turn: 5,
            win_gold: 20,
            rest_heal: 10,
            enemy_count: 1,
            enemies: EnemyBalance::default(),
        }
    }
}

impl RunBalance {
    /// Create a balance with the reference values under a new name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_start_gold(mut self, gold: u32) -> Self {
        self.start_gold = gold;
        self
    }

    pub fn with_start_max_hp(mut self, hp: i32) -> Self {
        self.start_max_hp = hp.max(1);
        self
    }

    pub fn with_enemy_count(mut self, count: usize) -> Self {
        self.enemy_count = count;
        self
    }

    pub fn with_enemies(mut self, enemies: EnemyBalance) -> Self {
        self.enemies = enemies;
        self
    }
}

/// Everything a run session needs besides content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub roll: RollConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub reward: RewardConfig,
}

impl SessionConfig {
    /// Parse a session config from JSON. Missing sections take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
