//! Damage and status arithmetic, shared by both sides of a battle.

use serde::{Deserialize, Serialize};

/// Upper bound on stacked vulnerable turns.
pub const MAX_VULNERABLE_TURNS: i32 = 99;

/// Result of one damage application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Damage after the vulnerable multiplier, before block.
    pub effective: i32,
    /// Damage absorbed by block.
    pub blocked: i32,
    /// HP actually removed.
    pub hp_loss: i32,
}

impl DamageOutcome {
    #[must_use]
    pub fn is_lethal(&self, hp_after: i32) -> bool {
        self.hp_loss > 0 && hp_after == 0
    }
}

/// `raw * 1.5` rounded up while the target is vulnerable, `raw` otherwise.
///
/// Saturates at `i32::MAX`.
#[must_use]
pub fn vulnerable_amount(raw: i32, vulnerable_turns: i32) -> i32 {
    let raw = raw.max(0);
    if vulnerable_turns > 0 {
        // ceil(raw * 3 / 2) for non-negative integers
        let scaled = (i64::from(raw) * 3 + 1) / 2;
        i32::try_from(scaled).unwrap_or(i32::MAX)
    } else {
        raw
    }
}

/// Apply `raw` damage to a target, block first, HP floored at 0.
pub fn resolve_damage(hp: &mut i32, block: &mut i32, vulnerable_turns: i32, raw: i32) -> DamageOutcome {
    let effective = vulnerable_amount(raw, vulnerable_turns);

    let blocked = (*block).max(0).min(effective);
    *block = (*block - blocked).max(0);

    let remaining = effective - blocked;
    let before = (*hp).max(0);
    *hp = (before - remaining).max(0);

    DamageOutcome {
        effective,
        blocked,
        hp_loss: before - *hp,
    }
}

/// Add vulnerable turns, clamped into `[0, MAX_VULNERABLE_TURNS]`.
#[must_use]
pub fn add_vulnerable(current: i32, turns: i32) -> i32 {
    current.saturating_add(turns).clamp(0, MAX_VULNERABLE_TURNS)
}

/// One round of status decay.
#[must_use]
pub fn decay_vulnerable(current: i32) -> i32 {
    (current - 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vulnerable_saturates_on_huge_hits() {
        assert_eq!(vulnerable_amount(800_000_000, 1), 1_200_000_000);
        assert_eq!(vulnerable_amount(i32::MAX, 1), i32::MAX);

        let (mut hp, mut block) = (50, 10);
        let out = resolve_damage(&mut hp, &mut block, 2, 1_500_000_000);
        assert_eq!(out.effective, i32::MAX);
        assert_eq!(out.blocked, 10);
        assert_eq!(out.hp_loss, 50);
        assert_eq!((hp, block), (0, 0));
    }

    #[test]
    fn test_block_absorbs_first() {
        let (mut hp, mut block) = (20, 5);
        let out = resolve_damage(&mut hp, &mut block, 0, 8);
        assert_eq!(out.blocked, 5);
        assert_eq!(out.hp_loss, 3);
        assert_eq!((hp, block), (17, 0));
    }

    #[test]
    fn test_block_survives_small_hit() {
        let (mut hp, mut block) = (20, 10);
        let out = resolve_damage(&mut hp, &mut block, 0, 4);
        assert_eq!(out.hp_loss, 0);
        assert_eq!((hp, block), (20, 6));
    }

    #[test]
    fn test_hp_floor_and_reported_loss() {
        let (mut hp, mut block) = (5, 0);
        let out = resolve_damage(&mut hp, &mut block, 0, 12);
        assert_eq!(hp, 0);
        assert_eq!(out.hp_loss, 5);
        assert!(out.is_lethal(hp));
    }

    #[test]
    fn test_vulnerable_rounds_up() {
        assert_eq!(vulnerable_amount(5, 1), 8);
        assert_eq!(vulnerable_amount(6, 2), 9);
        assert_eq!(vulnerable_amount(1, 1), 2);
        assert_eq!(vulnerable_amount(0, 1), 0);
        assert_eq!(vulnerable_amount(7, 0), 7);
    }

    #[test]
    fn test_vulnerable_clamp_and_decay() {
        assert_eq!(add_vulnerable(98, 5), MAX_VULNERABLE_TURNS);
        assert_eq!(add_vulnerable(2, -5), 0);
        assert_eq!(decay_vulnerable(0), 0);
        assert_eq!(decay_vulnerable(3), 2);
    }
}
