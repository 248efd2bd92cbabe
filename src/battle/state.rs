//! Battle participants and encounter setup.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EnemyBalance, RunBalance};

/// Most enemies an encounter may field.
pub const MAX_ENEMIES: usize = 3;

/// Normal or boss encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    #[default]
    Normal,
    Boss,
}

/// The player's side of a battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub energy: i32,
    pub energy_per_turn: i32,
    pub draw_per_turn: usize,
}

impl PlayerState {
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// One enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyState {
    pub hp: i32,
    pub max_hp: i32,
    pub block: i32,
    pub vulnerable_turns: i32,
    /// Raw damage dealt by this enemy's attack.
    pub damage: i32,
}

impl EnemyState {
    #[must_use]
    pub fn new(hp: i32, damage: i32) -> Self {
        let hp = hp.max(1);
        Self {
            hp,
            max_hp: hp,
            block: 0,
            vulnerable_turns: 0,
            damage: damage.max(0),
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Enemy list, inline up to [`MAX_ENEMIES`].
pub type Enemies = SmallVec<[EnemyState; MAX_ENEMIES]>;

/// Everything needed to set up one encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleSetup {
    pub kind: EncounterKind,
    pub player_hp: i32,
    pub player_max_hp: i32,
    pub energy_per_turn: i32,
    pub draw_per_turn: usize,
    /// Requested enemy count; clamped to 1..=3, forced to 1 for bosses.
    pub enemy_count: usize,
    pub enemies: EnemyBalance,
    /// Seed for the deck shuffle.
    pub seed: u64,
}

impl BattleSetup {
    /// Setup from the run's current HP and its balance.
    #[must_use]
    pub fn from_balance(kind: EncounterKind, hp: i32, max_hp: i32, balance: &RunBalance, seed: u64) -> Self {
        Self {
            kind,
            player_hp: hp,
            player_max_hp: max_hp,
            energy_per_turn: balance.energy_per_turn,
            draw_per_turn: balance.draw_per_turn,
            enemy_count: balance.enemy_count,
            enemies: balance.enemies.clone(),
            seed,
        }
    }

    #[must_use]
    pub fn with_enemy_count(mut self, count: usize) -> Self {
        self.enemy_count = count;
        self
    }

    /// Enemy count after clamping.
    #[must_use]
    pub fn effective_enemy_count(&self) -> usize {
        match self.kind {
            EncounterKind::Boss => 1,
            EncounterKind::Normal => self.enemy_count.clamp(1, MAX_ENEMIES),
        }
    }

    /// Build the enemy line-up. Later normal enemies are a little weaker.
    #[must_use]
    pub fn spawn_enemies(&self) -> Enemies {
        let stats = &self.enemies;
        (0..self.effective_enemy_count())
            .map(|i| match self.kind {
                EncounterKind::Boss => EnemyState::new(stats.boss_hp, stats.boss_damage),
                EncounterKind::Normal => {
                    let hp = (stats.normal_hp - i as i32 * stats.hp_step).max(stats.min_hp);
                    EnemyState::new(hp, stats.normal_damage)
                }
            })
            .collect()
    }

    fn initial_player(&self) -> PlayerState {
        let max_hp = self.player_max_hp.max(1);
        PlayerState {
            hp: self.player_hp.clamp(0, max_hp),
            max_hp,
            block: 0,
            energy: 0,
            energy_per_turn: self.energy_per_turn.max(0),
            draw_per_turn: self.draw_per_turn,
        }
    }
}

/// Snapshot of both sides plus targeting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    pub kind: EncounterKind,
    pub player: PlayerState,
    pub enemies: Enemies,
    pub selected_enemy: usize,
    pub turn: u32,
}

impl BattleState {
    #[must_use]
    pub fn from_setup(setup: &BattleSetup) -> Self {
        Self {
            kind: setup.kind,
            player: setup.initial_player(),
            enemies: setup.spawn_enemies(),
            selected_enemy: 0,
            turn: 0,
        }
    }

    #[must_use]
    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|e| !e.is_alive())
    }

    /// Index of the first living enemy at or after `from`, in index order.
    #[must_use]
    pub fn next_living_enemy(&self, from: usize) -> Option<usize> {
        (from..self.enemies.len()).find(|&i| self.enemies[i].is_alive())
    }

    /// Move the selection off a dead enemy: next living one, wrapping, else 0.
    pub fn advance_selection(&mut self) {
        if self
            .enemies
            .get(self.selected_enemy)
            .is_some_and(EnemyState::is_alive)
        {
            return;
        }
        self.selected_enemy = self
            .next_living_enemy(self.selected_enemy + 1)
            .or_else(|| self.next_living_enemy(0))
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(kind: EncounterKind, count: usize) -> BattleSetup {
        BattleSetup::from_balance(kind, 50, 60, &RunBalance::default(), 1).with_enemy_count(count)
    }

    #[test]
    fn test_enemy_count_clamped() {
        assert_eq!(setup(EncounterKind::Normal, 0).spawn_enemies().len(), 1);
        assert_eq!(setup(EncounterKind::Normal, 9).spawn_enemies().len(), 3);
        assert_eq!(setup(EncounterKind::Boss, 3).spawn_enemies().len(), 1);
    }

    #[test]
    fn test_enemy_hp_by_kind() {
        let normal = setup(EncounterKind::Normal, 3).spawn_enemies();
        let hps: Vec<_> = normal.iter().map(|e| e.hp).collect();
        assert_eq!(hps, vec![30, 25, 20]);
        assert!(normal.iter().all(|e| e.damage == 8));

        let boss = setup(EncounterKind::Boss, 1).spawn_enemies();
        assert_eq!((boss[0].hp, boss[0].damage), (60, 12));
    }

    #[test]
    fn test_advance_selection() {
        let mut state = BattleState::from_setup(&setup(EncounterKind::Normal, 3));
        state.selected_enemy = 1;
        state.enemies[1].hp = 0;
        state.advance_selection();
        assert_eq!(state.selected_enemy, 2);

        state.enemies[2].hp = 0;
        state.advance_selection();
        assert_eq!(state.selected_enemy, 0);

        state.enemies[0].hp = 0;
        state.advance_selection();
        assert_eq!(state.selected_enemy, 0);
        assert!(state.all_enemies_dead());
    }

    #[test]
    fn test_player_hp_clamped_to_max() {
        let state = BattleState::from_setup(&BattleSetup::from_balance(
            EncounterKind::Normal,
            500,
            60,
            &RunBalance::default(),
            1,
        ));
        assert_eq!(state.player.hp, 60);
    }
}
