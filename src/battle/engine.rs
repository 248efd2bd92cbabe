//! The battle state machine.
//!
//! ```text
//! Setup -> PlayerTurn -> Resolving(DiscardHand -> EnemyAttack(i)* -> StatusDecay -> StartPlayerTurn) -> PlayerTurn ...
//!                  \______________________________________________________/
//!                                  Won / Lost (checked after every hit)
//! ```
//!
//! Turn resolution is a cursor. [`BattleEngine::resume`] performs exactly
//! one step and reports what happened, so a presentation layer can pace
//! the steps (or skip pacing entirely with [`BattleEngine::resolve_turn`]).
//! Each step's state change is applied in full before it returns.
//!
//! The first terminal transition latches: once the battle is won or lost no
//! input is accepted and the report can be taken exactly once.

use serde::{Deserialize, Serialize};

use super::damage::{add_vulnerable, decay_vulnerable, resolve_damage};
use super::deck::DeckRuntime;
use super::state::{BattleSetup, BattleState, EncounterKind};
use crate::cards::{CardDefinition, CardEffectKind, CardId};
use crate::core::BattleRejection;

/// One step of end-of-turn resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStep {
    DiscardHand,
    /// The enemy at this index attacks, if still alive.
    EnemyAttack(usize),
    StatusDecay,
    StartPlayerTurn,
}

/// Where the battle is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    Setup,
    PlayerTurn,
    Resolving(TurnStep),
    Won,
    Lost,
}

impl BattlePhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Won | BattlePhase::Lost)
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    Won,
    Lost,
}

/// Handed to the run once the battle ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub result: BattleResult,
    pub kind: EncounterKind,
    /// Player HP at the end (0 on a loss).
    pub player_hp: i32,
    pub turns: u32,
}

/// What a single action or resolution step did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    TurnStarted { turn: u32, drawn: usize },
    CardPlayed { card: CardId, target: Option<usize>, hp_loss: i32 },
    HandDiscarded { count: usize },
    EnemyAttacked { enemy: usize, hp_loss: i32 },
    StatusDecayed,
    BattleWon,
    BattleLost,
}

/// One encounter: participants, deck piles and the turn cursor.
#[derive(Clone, Debug)]
pub struct BattleEngine {
    state: BattleState,
    deck: DeckRuntime,
    phase: BattlePhase,
    /// Set by the first terminal transition.
    ending: bool,
    report: Option<BattleReport>,
}

impl BattleEngine {
    /// Set up an encounter. Call [`start`](Self::start) to begin the first turn.
    #[must_use]
    pub fn new(setup: &BattleSetup, deck: Vec<CardDefinition>) -> Self {
        tracing::debug!(
            kind = ?setup.kind,
            enemies = setup.effective_enemy_count(),
            deck = deck.len(),
            "battle setup"
        );
        Self {
            state: BattleState::from_setup(setup),
            deck: DeckRuntime::new(deck, setup.seed),
            phase: BattlePhase::Setup,
            ending: false,
            report: None,
        }
    }

    /// Begin the first player turn.
    pub fn start(&mut self) -> Result<BattleEvent, BattleRejection> {
        match self.phase {
            BattlePhase::Setup => Ok(self.start_player_turn()),
            BattlePhase::Won | BattlePhase::Lost => Err(BattleRejection::BattleOver),
            BattlePhase::Resolving(_) => Err(BattleRejection::Resolving),
            BattlePhase::PlayerTurn => Err(BattleRejection::NotPlayerTurn),
        }
    }

    fn ensure_player_turn(&self) -> Result<(), BattleRejection> {
        match self.phase {
            BattlePhase::PlayerTurn if !self.ending => Ok(()),
            BattlePhase::Resolving(_) => Err(BattleRejection::Resolving),
            BattlePhase::Setup => Err(BattleRejection::NotPlayerTurn),
            _ => Err(BattleRejection::BattleOver),
        }
    }

    /// Play the hand card at `hand_index` against the selected enemy.
    ///
    /// Rejected without any state change when it is not the player's turn,
    /// the index is out of range or energy is short.
    pub fn play_card(&mut self, hand_index: usize) -> Result<BattleEvent, BattleRejection> {
        self.ensure_player_turn()?;

        let card = self
            .deck
            .card_in_hand(hand_index)
            .cloned()
            .ok_or(BattleRejection::InvalidHandIndex(hand_index))?;
        if card.cost > self.state.player.energy {
            return Err(BattleRejection::NotEnoughEnergy {
                required: card.cost,
                available: self.state.player.energy,
            });
        }

        self.state.player.energy -= card.cost;
        let (target, hp_loss) = self.apply_effect(&card);

        // The card stays in hand while its effect applies; draws append behind it.
        if card.exhaust_on_play {
            self.deck.exhaust_from_hand(hand_index);
        } else {
            self.deck.play_from_hand(hand_index);
        }

        tracing::debug!(card = %card.id, ?target, hp_loss, "card played");

        if self.state.all_enemies_dead() {
            self.finish(BattleResult::Won);
        } else {
            self.state.advance_selection();
        }

        Ok(BattleEvent::CardPlayed {
            card: card.id,
            target,
            hp_loss,
        })
    }

    fn apply_effect(&mut self, card: &CardDefinition) -> (Option<usize>, i32) {
        let player = &mut self.state.player;
        match card.effect {
            CardEffectKind::Attack => {
                let target = self.state.selected_enemy;
                let Some(enemy) = self.state.enemies.get_mut(target).filter(|e| e.is_alive()) else {
                    return (None, 0);
                };
                let out = resolve_damage(&mut enemy.hp, &mut enemy.block, enemy.vulnerable_turns, card.value);
                (Some(target), out.hp_loss)
            }
            CardEffectKind::ApplyVulnerable => {
                let target = self.state.selected_enemy;
                let Some(enemy) = self.state.enemies.get_mut(target).filter(|e| e.is_alive()) else {
                    return (None, 0);
                };
                enemy.vulnerable_turns = add_vulnerable(enemy.vulnerable_turns, card.value);
                (Some(target), 0)
            }
            CardEffectKind::Block => {
                player.block = player.block.saturating_add(card.value.max(0));
                (None, 0)
            }
            CardEffectKind::GainEnergy => {
                player.energy = player.energy.saturating_add(card.value.max(0));
                (None, 0)
            }
            CardEffectKind::Draw => {
                self.deck.draw(card.value.max(0) as usize);
                (None, 0)
            }
        }
    }

    /// Target a living enemy.
    pub fn select_enemy(&mut self, index: usize) -> Result<(), BattleRejection> {
        if self.phase.is_terminal() || self.ending {
            return Err(BattleRejection::BattleOver);
        }
        match self.state.enemies.get(index) {
            Some(enemy) if enemy.is_alive() => {
                self.state.selected_enemy = index;
                Ok(())
            }
            _ => Err(BattleRejection::InvalidEnemy(index)),
        }
    }

    /// End the player turn. Resolution then proceeds via [`resume`](Self::resume).
    pub fn end_turn(&mut self) -> Result<(), BattleRejection> {
        self.ensure_player_turn()?;
        self.phase = BattlePhase::Resolving(TurnStep::DiscardHand);
        Ok(())
    }

    /// Perform the next resolution step. `None` when nothing is resolving.
    pub fn resume(&mut self) -> Option<BattleEvent> {
        let BattlePhase::Resolving(step) = self.phase else {
            return None;
        };

        let event = match step {
            TurnStep::DiscardHand => {
                let count = self.deck.discard_hand();
                self.phase = self.after_enemy(None);
                BattleEvent::HandDiscarded { count }
            }
            TurnStep::EnemyAttack(index) => {
                let damage = self
                    .state
                    .enemies
                    .get(index)
                    .filter(|e| e.is_alive())
                    .map_or(0, |e| e.damage);
                let player = &mut self.state.player;
                let out = resolve_damage(&mut player.hp, &mut player.block, 0, damage);

                if player.is_dead() {
                    self.finish(BattleResult::Lost);
                } else {
                    self.phase = self.after_enemy(Some(index));
                }
                BattleEvent::EnemyAttacked {
                    enemy: index,
                    hp_loss: out.hp_loss,
                }
            }
            TurnStep::StatusDecay => {
                for enemy in &mut self.state.enemies {
                    enemy.vulnerable_turns = decay_vulnerable(enemy.vulnerable_turns);
                }
                self.phase = BattlePhase::Resolving(TurnStep::StartPlayerTurn);
                BattleEvent::StatusDecayed
            }
            TurnStep::StartPlayerTurn => self.start_player_turn(),
        };

        Some(event)
    }

    /// Run resolution to the next player turn (or the end of the battle).
    pub fn resolve_turn(&mut self) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.resume() {
            events.push(event);
        }
        if let Some(last) = self.terminal_event() {
            events.push(last);
        }
        events
    }

    fn terminal_event(&self) -> Option<BattleEvent> {
        match self.phase {
            BattlePhase::Lost => Some(BattleEvent::BattleLost),
            BattlePhase::Won => Some(BattleEvent::BattleWon),
            _ => None,
        }
    }

    fn after_enemy(&self, previous: Option<usize>) -> BattlePhase {
        let from = previous.map_or(0, |i| i + 1);
        match self.state.next_living_enemy(from) {
            Some(next) => BattlePhase::Resolving(TurnStep::EnemyAttack(next)),
            None => BattlePhase::Resolving(TurnStep::StatusDecay),
        }
    }

    fn start_player_turn(&mut self) -> BattleEvent {
        let player = &mut self.state.player;
        player.block = 0;
        player.energy = player.energy_per_turn;
        let drawn = self.deck.draw(player.draw_per_turn);

        self.state.turn += 1;
        self.phase = BattlePhase::PlayerTurn;
        BattleEvent::TurnStarted {
            turn: self.state.turn,
            drawn,
        }
    }

    fn finish(&mut self, result: BattleResult) {
        if self.ending {
            return;
        }
        self.ending = true;
        self.phase = match result {
            BattleResult::Won => BattlePhase::Won,
            BattleResult::Lost => BattlePhase::Lost,
        };
        self.report = Some(BattleReport {
            result,
            kind: self.state.kind,
            player_hp: self.state.player.hp,
            turns: self.state.turn,
        });
        tracing::info!(?result, turns = self.state.turn, hp = self.state.player.hp, "battle ended");
    }

    /// Take the end-of-battle report. Yields `Some` exactly once.
    pub fn take_report(&mut self) -> Option<BattleReport> {
        self.report.take()
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &DeckRuntime {
        &self.deck
    }

    #[must_use]
    pub fn hand(&self) -> &[CardDefinition] {
        self.deck.hand()
    }

    #[must_use]
    pub fn is_player_turn(&self) -> bool {
        self.phase == BattlePhase::PlayerTurn
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self.phase, BattlePhase::Resolving(_))
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ending
    }

    #[must_use]
    pub fn result(&self) -> Option<BattleResult> {
        match self.phase {
            BattlePhase::Won => Some(BattleResult::Won),
            BattlePhase::Lost => Some(BattleResult::Lost),
            _ => None,
        }
    }
}
