//! The run orchestrator.
//!
//! `RunSession` is the single owner of the live run. Every other engine
//! receives what it needs as arguments: the battle engine gets a setup and
//! a resolved deck, the shop engine gets `&mut RunState`. Presentation code
//! talks to the session only, and re-reads state when the
//! [`StateSignal`] fires.
//!
//! ```text
//! start_new_run -> enter_node(i) -> battle | shop | rest -> mark_node_cleared_and_advance -> ...
//!                                    \-> won -> reward -> choose/skip -> advance
//!                                    \-> lost -> Defeat
//! last node cleared -> Victory
//! ```

use super::content::{ContentCatalog, OathDefinition};
use super::meta::MetaProgress;
use super::save::{RunSaveData, SaveSummary, SAVE_KEY};
use super::state::{RunOutcome, RunState};
use super::store::KeyValueStore;
use crate::battle::{BattleEngine, BattleEvent, BattleReport, BattleResult, BattleSetup};
use crate::cards::{CardDefinition, CardId, CardResolver, PoolContext, ResolutionChain};
use crate::core::{
    battle_seed, nonzero_seed, reward_seed, GameRng, RunBalance, RunRejection, SaveError,
    SessionConfig, StateSignal, SubscriptionId,
};
use crate::map::{generate, MapPlan, MapTemplate, NodeType};
use crate::rewards::{apply_roll_weights, RewardOffer, Weighted};
use crate::shop::{ShopEngine, ShopOffer};

/// Content names tried when a save refers to something no longer registered.
#[derive(Clone, Debug, Default)]
pub struct ContinueFallback {
    pub oath: Option<String>,
    pub balance: Option<String>,
    pub template: Option<String>,
}

impl ContinueFallback {
    #[must_use]
    pub fn new(oath: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            oath: Some(oath.into()),
            balance: Some(balance.into()),
            template: None,
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Registry, then reward candidates, then shop candidates.
fn chain<'a>(
    content: &'a ContentCatalog,
    reward: &'a Vec<Weighted<CardDefinition>>,
    shop: &'a ShopEngine,
) -> ResolutionChain<'a> {
    ResolutionChain::new(content.library(), reward, shop)
}

/// One player's run: state, map, current encounter and persistence.
pub struct RunSession {
    content: ContentCatalog,
    config: SessionConfig,
    store: Box<dyn KeyValueStore>,
    /// Source of run and map seeds.
    rng: GameRng,
    meta: MetaProgress,

    balance: RunBalance,
    template: MapTemplate,
    plan: MapPlan,
    map_seed: u64,
    state: Option<RunState>,

    battle: Option<BattleEngine>,
    pending_reward: Option<RewardOffer>,
    reward_candidates: Vec<Weighted<CardDefinition>>,
    shop: ShopEngine,

    signal: StateSignal,
}

impl RunSession {
    /// Create a session with no active run. Meta progression is loaded
    /// from `store` immediately.
    #[must_use]
    pub fn new(content: ContentCatalog, config: SessionConfig, store: Box<dyn KeyValueStore>) -> Self {
        let meta = MetaProgress::load(&*store);
        let shop = ShopEngine::new(config.shop.clone(), config.roll.clone(), Vec::new());
        Self {
            content,
            config,
            store,
            rng: GameRng::new(nonzero_seed(rand::random())),
            meta,
            balance: RunBalance::default(),
            template: MapTemplate::default(),
            plan: MapPlan::default(),
            map_seed: 0,
            state: None,
            battle: None,
            pending_reward: None,
            reward_candidates: Vec::new(),
            shop,
            signal: StateSignal::new(),
        }
    }

    /// Seed the master RNG so every run seed that follows is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = GameRng::new(nonzero_seed(seed));
        self
    }

    // === Run lifecycle ===

    /// Start a fresh run.
    ///
    /// An unknown template falls back to the default one; an unknown oath
    /// or balance is rejected.
    pub fn start_new_run(
        &mut self,
        oath_id: &str,
        balance_name: &str,
        template_name: &str,
    ) -> Result<(), RunRejection> {
        let oath = self.content.oath(oath_id).cloned().ok_or(RunRejection::MissingContent)?;
        let balance = self
            .content
            .balance(balance_name)
            .cloned()
            .ok_or(RunRejection::MissingContent)?;
        let template = self.content.template(template_name).cloned().unwrap_or_else(|| {
            tracing::debug!(template = template_name, "unknown map template; using default");
            MapTemplate::default()
        });

        self.begin_run(&oath, balance, template);
        Ok(())
    }

    /// Start over with the same oath and balance on a newly seeded map.
    pub fn restart(&mut self) -> Result<(), RunRejection> {
        let oath = self
            .state
            .as_ref()
            .and_then(|run| self.content.oath(&run.oath_id))
            .cloned()
            .ok_or(RunRejection::MissingContent)?;
        let balance = self.balance.clone();
        let template = self.template.clone();

        self.begin_run(&oath, balance, template);
        Ok(())
    }

    fn begin_run(&mut self, oath: &OathDefinition, balance: RunBalance, template: MapTemplate) {
        let seed = self.rng.next_seed();
        self.map_seed = self.rng.next_seed();
        self.plan = generate(template.length(), self.map_seed);

        let mut run = RunState::new(oath.id.clone(), seed, balance.start_max_hp, balance.start_gold);
        run.deck = oath.start_deck.clone();
        self.state = Some(run);
        self.balance = balance;
        self.template = template;
        self.battle = None;
        self.pending_reward = None;
        self.refresh_candidates();

        let resolver = chain(&self.content, &self.reward_candidates, &self.shop);
        if let Some(run) = self.state.as_mut() {
            run.deck = resolver.resolve_all(&run.deck).into_iter().map(|c| c.id).collect();
            self.meta.apply_start_bonuses(run, &resolver);
            tracing::info!(
                oath = %run.oath_id,
                seed,
                map_seed = self.map_seed,
                nodes = self.plan.len(),
                deck = run.deck.len(),
                "run started"
            );
        }
        self.signal.emit();
    }

    /// Rebuild reward and shop candidates for the current oath, unlocks and deck.
    fn refresh_candidates(&mut self) {
        let run = self.state.as_ref();
        let oath = run.and_then(|r| self.content.oath(&r.oath_id));
        let deck = run.map_or(&[][..], |r| r.deck.as_slice());

        let reward = self.content.candidates(oath, &self.meta, PoolContext::Reward, deck);
        let shop = self.content.candidates(oath, &self.meta, PoolContext::Shop, deck);
        let premium = self.content.premium_candidates();

        self.reward_candidates = reward;
        self.shop = ShopEngine::new(self.config.shop.clone(), self.config.roll.clone(), shop)
            .with_premium(premium);
    }

    /// Record how the run ended. Only the first outcome sticks.
    ///
    /// An unfinished battle is dropped with the run; a finished one stays
    /// readable. Returns whether this call ended the run.
    pub fn end_run(&mut self, outcome: RunOutcome) -> bool {
        let Some(run) = self.state.as_mut() else {
            return false;
        };
        if !run.record_outcome(outcome) {
            tracing::debug!(?outcome, current = ?run.last_outcome, "end_run ignored");
            return false;
        }
        tracing::info!(?outcome, node = run.node_index, hp = run.hp, "run ended");
        if self.battle_in_progress() {
            self.battle = None;
        }
        self.pending_reward = None;
        self.signal.emit();
        true
    }

    /// Abort the run. Rejected while a turn is resolving; a no-op when the
    /// run has already ended.
    pub fn abort(&mut self) -> Result<(), RunRejection> {
        if self.state.is_none() {
            return Err(RunRejection::NoActiveRun);
        }
        if self.battle.as_ref().is_some_and(BattleEngine::is_resolving) {
            return Err(RunRejection::TurnResolving);
        }
        self.battle = None;
        self.end_run(RunOutcome::Aborted);
        Ok(())
    }

    // === Map ===

    /// Node type at `index`, clamped into the plan. An empty plan reads as battles.
    #[must_use]
    pub fn get_node_type(&self, index: usize) -> NodeType {
        match self.plan.len() {
            0 => NodeType::Battle,
            len => self.plan.get(index.min(len - 1)).unwrap_or_default(),
        }
    }

    /// Whether the node index has moved past the last node.
    #[must_use]
    pub fn is_run_finished(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|run| run.node_index >= self.plan.len())
    }

    #[must_use]
    pub fn is_node_cleared(&self, index: usize) -> bool {
        self.state.as_ref().is_some_and(|run| index < run.node_index)
    }

    fn live_run(&self) -> Result<&RunState, RunRejection> {
        let run = self.state.as_ref().ok_or(RunRejection::NoActiveRun)?;
        if run.is_ended() {
            return Err(RunRejection::RunEnded);
        }
        Ok(run)
    }

    fn battle_in_progress(&self) -> bool {
        self.battle.as_ref().is_some_and(|b| !b.is_over())
    }

    /// Live run, no open battle or reward, and the current node is `expected`.
    fn ensure_at(&self, expected: NodeType) -> Result<(), RunRejection> {
        let run = self.live_run()?;
        if self.battle_in_progress() {
            return Err(RunRejection::BattleInProgress);
        }
        if self.pending_reward.is_some() {
            return Err(RunRejection::RewardPending);
        }
        match self.plan.get(run.node_index) {
            Some(node) if node == expected => Ok(()),
            _ => Err(RunRejection::WrongNodeType {
                expected: expected.name(),
            }),
        }
    }

    /// Enter the current node. Combat nodes start a battle, shop nodes
    /// open (or resume) the shop visit.
    pub fn enter_node(&mut self, index: usize) -> Result<NodeType, RunRejection> {
        let run = self.live_run()?;
        if index >= self.plan.len() {
            return Err(RunRejection::InvalidNode(index));
        }
        if index != run.node_index {
            return Err(RunRejection::NotCurrentNode {
                index,
                current: run.node_index,
            });
        }
        if self.battle_in_progress() {
            return Err(RunRejection::BattleInProgress);
        }
        if self.pending_reward.is_some() {
            return Err(RunRejection::RewardPending);
        }

        let node = self.get_node_type(index);
        let resolver = chain(&self.content, &self.reward_candidates, &self.shop);
        let Some(run) = self.state.as_mut() else {
            return Err(RunRejection::NoActiveRun);
        };

        match node {
            NodeType::Battle | NodeType::Boss => {
                let kind = node.encounter().unwrap_or_default();
                let setup = BattleSetup::from_balance(
                    kind,
                    run.hp,
                    run.max_hp,
                    &self.balance,
                    battle_seed(run.seed, index),
                );
                let mut battle = BattleEngine::new(&setup, resolver.resolve_all(&run.deck));
                battle.start()?;
                self.battle = Some(battle);
            }
            NodeType::Shop => {
                self.shop.enter(run);
            }
            NodeType::Rest => {}
        }

        tracing::info!(index, %node, "node entered");
        self.signal.emit();
        Ok(node)
    }

    /// Clear the current node and move to the next one.
    ///
    /// Clearing a combat node counts a battle. Clearing the last node ends
    /// the run in victory.
    pub fn mark_node_cleared_and_advance(&mut self) -> Result<(), RunRejection> {
        self.live_run()?;
        if self.battle_in_progress() {
            return Err(RunRejection::BattleInProgress);
        }
        if self.pending_reward.is_some() {
            return Err(RunRejection::RewardPending);
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        let Some(run) = self.state.as_mut() else {
            return;
        };
        let cleared = run.node_index;
        if self.plan.get(cleared).is_some_and(NodeType::is_combat) {
            run.cleared_battles += 1;
        }
        run.node_index = (cleared + 1).min(self.plan.len());
        self.battle = None;
        tracing::debug!(cleared, next = run.node_index, "node cleared");

        if run.node_index >= self.plan.len() {
            self.end_run(RunOutcome::Victory);
        } else {
            self.signal.emit();
        }
    }

    // === Battle ===

    /// The open battle of a live run.
    fn battle_mut(&mut self) -> Result<&mut BattleEngine, RunRejection> {
        self.live_run()?;
        self.battle.as_mut().ok_or(RunRejection::NoBattle)
    }

    /// Play a hand card against the selected enemy.
    pub fn play_card(&mut self, hand_index: usize) -> Result<BattleEvent, RunRejection> {
        let event = self.battle_mut()?.play_card(hand_index)?;
        self.settle_battle();
        self.signal.emit();
        Ok(event)
    }

    pub fn select_enemy(&mut self, index: usize) -> Result<(), RunRejection> {
        self.battle_mut()?.select_enemy(index)?;
        self.signal.emit();
        Ok(())
    }

    /// End the player turn. Resolution then runs through
    /// [`resume_battle`](Self::resume_battle) or
    /// [`resolve_turn`](Self::resolve_turn).
    pub fn end_turn(&mut self) -> Result<(), RunRejection> {
        self.battle_mut()?.end_turn()?;
        self.signal.emit();
        Ok(())
    }

    /// Perform one resolution step.
    pub fn resume_battle(&mut self) -> Option<BattleEvent> {
        let event = self.battle_mut().ok()?.resume()?;
        self.settle_battle();
        self.signal.emit();
        Some(event)
    }

    /// Resolve the rest of the enemy turn at once.
    pub fn resolve_turn(&mut self) -> Result<Vec<BattleEvent>, RunRejection> {
        let events = self.battle_mut()?.resolve_turn();
        self.settle_battle();
        if !events.is_empty() {
            self.signal.emit();
        }
        Ok(events)
    }

    /// Apply a finished battle's report to the run. Runs once per battle.
    fn settle_battle(&mut self) {
        if self.live_run().is_err() {
            return;
        }
        let Some(report) = self.battle.as_mut().and_then(BattleEngine::take_report) else {
            return;
        };
        match report.result {
            BattleResult::Won => self.battle_won(&report),
            BattleResult::Lost => {
                if let Some(run) = self.state.as_mut() {
                    run.set_hp(0);
                }
                self.end_run(RunOutcome::Defeat);
            }
        }
    }

    fn battle_won(&mut self, report: &BattleReport) {
        let Some(run) = self.state.as_mut() else {
            return;
        };
        run.gold = run.gold.saturating_add(self.balance.win_gold);
        run.set_hp(report.player_hp);

        let seed = reward_seed(run.seed, run.node_index, run.cleared_battles, run.reward_roll_count);
        let weighted = apply_roll_weights(&self.reward_candidates, &run.deck, &self.config.roll);
        let offer = RewardOffer::roll(&weighted, &self.config.reward, seed);
        tracing::info!(
            node = run.node_index,
            gold = run.gold,
            hp = run.hp,
            options = ?offer.option_ids().collect::<Vec<_>>(),
            "battle won"
        );

        if offer.is_empty() {
            tracing::debug!("no reward candidates; advancing");
            run.reward_roll_count += 1;
            self.advance();
        } else {
            self.pending_reward = Some(offer);
        }
    }

    // === Rewards ===

    /// Take reward option `index`, then advance.
    pub fn choose_reward(&mut self, index: usize) -> Result<CardId, RunRejection> {
        self.live_run()?;
        let offer = self.pending_reward.take().ok_or(RunRejection::NoPendingReward)?;
        let card = match offer.choose(index) {
            Ok(card) => card,
            Err(offer) => {
                self.pending_reward = Some(offer);
                return Err(RunRejection::InvalidChoice(index));
            }
        };

        if let Some(run) = self.state.as_mut() {
            run.reward_roll_count += 1;
            run.deck.push(card.id.clone());
            tracing::info!(card = %card.id, deck = run.deck.len(), "reward taken");
        }
        self.advance();
        Ok(card.id)
    }

    /// Decline the reward, then advance. Only when skipping is enabled.
    pub fn skip_reward(&mut self) -> Result<(), RunRejection> {
        self.live_run()?;
        if self.pending_reward.is_none() {
            return Err(RunRejection::NoPendingReward);
        }
        if !self.config.reward.allow_skip {
            return Err(RunRejection::SkipNotAllowed);
        }
        self.pending_reward = None;
        if let Some(run) = self.state.as_mut() {
            run.reward_roll_count += 1;
        }
        tracing::info!("reward skipped");
        self.advance();
        Ok(())
    }

    // === Rest ===

    /// Heal at a rest node, then advance. Returns the HP restored.
    pub fn rest(&mut self) -> Result<i32, RunRejection> {
        self.ensure_at(NodeType::Rest)?;
        let heal = self.balance.rest_heal;
        let restored = self.state.as_mut().map_or(0, |run| run.heal(heal));
        tracing::info!(restored, "rested");
        self.advance();
        Ok(restored)
    }

    // === Shop ===

    /// Current shop slots; empty outside a shop visit.
    #[must_use]
    pub fn shop_offers(&self) -> Vec<ShopOffer> {
        match &self.state {
            Some(run) if self.shop.is_active(run) => self.shop.offers(run, &self.resolver()),
            _ => Vec::new(),
        }
    }

    pub fn buy(&mut self, slot: usize) -> Result<CardId, RunRejection> {
        self.ensure_at(NodeType::Shop)?;
        let resolver = chain(&self.content, &self.reward_candidates, &self.shop);
        let run = self.state.as_mut().ok_or(RunRejection::NoActiveRun)?;
        let card = self.shop.buy(run, slot, &resolver)?;
        self.signal.emit();
        Ok(card)
    }

    pub fn reroll(&mut self) -> Result<(), RunRejection> {
        self.ensure_at(NodeType::Shop)?;
        let run = self.state.as_mut().ok_or(RunRejection::NoActiveRun)?;
        self.shop.reroll(run)?;
        self.signal.emit();
        Ok(())
    }

    pub fn remove_card(&mut self, card: &CardId) -> Result<(), RunRejection> {
        self.ensure_at(NodeType::Shop)?;
        let run = self.state.as_mut().ok_or(RunRejection::NoActiveRun)?;
        self.shop.remove_card(run, card)?;
        self.signal.emit();
        Ok(())
    }

    /// Leave the shop and advance.
    pub fn leave_shop(&mut self) -> Result<(), RunRejection> {
        self.ensure_at(NodeType::Shop)?;
        tracing::info!("left shop");
        self.advance();
        Ok(())
    }

    // === Cards and meta ===

    fn resolver(&self) -> ResolutionChain<'_> {
        chain(&self.content, &self.reward_candidates, &self.shop)
    }

    /// Resolve a card ID through the registry, reward and shop candidates.
    #[must_use]
    pub fn resolve_card(&self, id: &CardId) -> Option<CardDefinition> {
        self.resolver().resolve(id).cloned()
    }

    /// The run deck as definitions. Unresolved IDs are skipped.
    #[must_use]
    pub fn deck_cards(&self) -> Vec<CardDefinition> {
        self.state
            .as_ref()
            .map(|run| self.resolver().resolve_all(&run.deck))
            .unwrap_or_default()
    }

    /// Unlock a pool for future rolls and persist meta progression.
    pub fn unlock_pool(&mut self, pool_id: &str) -> bool {
        if !self.meta.unlock_pool(pool_id) {
            return false;
        }
        self.meta.save(self.store.as_mut());
        self.refresh_candidates();
        tracing::info!(pool = pool_id, "pool unlocked");
        self.signal.emit();
        true
    }

    // === Persistence ===

    /// Write the run to the store. An ended run clears the save instead.
    pub fn save_run(&mut self) -> Result<(), SaveError> {
        let run = self.state.as_ref().ok_or(SaveError::NoActiveRun)?;
        if run.is_ended() {
            self.clear_save();
            return Ok(());
        }
        let data = RunSaveData::capture(
            run,
            &self.balance.name,
            &self.template.name,
            self.map_seed,
            &self.plan,
        );
        let json = data.to_json()?;
        self.store.set(SAVE_KEY, json);
        tracing::info!(node = run.node_index, "run saved");
        Ok(())
    }

    #[must_use]
    pub fn has_save(&self) -> bool {
        self.store
            .get(SAVE_KEY)
            .is_some_and(|json| !json.trim().is_empty())
    }

    pub fn clear_save(&mut self) {
        self.store.remove(SAVE_KEY);
    }

    fn load_save(&self) -> Result<RunSaveData, SaveError> {
        let json = self
            .store
            .get(SAVE_KEY)
            .filter(|json| !json.trim().is_empty())
            .ok_or(SaveError::NoSave)?;
        RunSaveData::from_json(&json)
    }

    /// Read the saved run's headline numbers without loading it.
    #[must_use]
    pub fn peek_summary(&self) -> Option<SaveSummary> {
        self.load_save().ok().map(|data| data.summary())
    }

    /// Replace the session's run with the saved one.
    ///
    /// Oath, balance and template are looked up by their saved names,
    /// then by `fallback`. A missing template falls back to the default.
    /// The restored run belongs to whichever oath was found, so its pools
    /// and [`restart`](Self::restart) keep working.
    /// Deck IDs that no longer resolve are dropped. Battles and pending
    /// rewards are not part of a save: the run resumes at the start of the
    /// node it was on.
    pub fn continue_from_save(&mut self, fallback: &ContinueFallback) -> Result<(), SaveError> {
        let data = self.load_save()?;

        let oath = self
            .content
            .oath(&data.oath_id)
            .or_else(|| fallback.oath.as_deref().and_then(|id| self.content.oath(id)))
            .cloned()
            .ok_or_else(|| SaveError::MissingOath(data.oath_id.clone()))?;
        let balance = self
            .content
            .balance(&data.balance_name)
            .or_else(|| fallback.balance.as_deref().and_then(|n| self.content.balance(n)))
            .cloned()
            .ok_or_else(|| SaveError::MissingBalance(data.balance_name.clone()))?;
        let template = self
            .content
            .template(&data.plan_template_name)
            .or_else(|| fallback.template.as_deref().and_then(|n| self.content.template(n)))
            .cloned()
            .unwrap_or_default();

        let map_seed = if data.map_seed == 0 {
            self.rng.next_seed()
        } else {
            data.map_seed
        };
        let plan = data.restore_plan(template.length(), map_seed);
        let mut run = data.state.restore(&oath.id);
        if run.oath_id != oath.id {
            tracing::warn!(saved = %run.oath_id, oath = %oath.id, "saved oath missing; using fallback");
            run.oath_id = oath.id.clone();
        }
        run.node_index = run.node_index.min(plan.len());

        tracing::info!(
            oath = %run.oath_id,
            node = run.node_index,
            deck = run.deck.len(),
            "run restored from save"
        );

        self.balance = balance;
        self.template = template;
        self.map_seed = map_seed;
        self.plan = plan;
        self.state = Some(run);
        self.battle = None;
        self.pending_reward = None;
        self.refresh_candidates();

        let resolver = chain(&self.content, &self.reward_candidates, &self.shop);
        if let Some(run) = self.state.as_mut() {
            run.deck = resolver.resolve_all(&run.deck).into_iter().map(|c| c.id).collect();
        }
        self.signal.emit();
        Ok(())
    }

    /// [`continue_from_save`](Self::continue_from_save) for hosts that only
    /// need success or failure. A save that cannot be restored is cleared.
    pub fn try_continue(&mut self, fallback: &ContinueFallback) -> bool {
        match self.continue_from_save(fallback) {
            Ok(()) => true,
            Err(SaveError::NoSave) => false,
            Err(err) => {
                tracing::warn!(%err, "continue failed; clearing save");
                self.clear_save();
                false
            }
        }
    }

    // === Signal ===

    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.signal.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.signal.unsubscribe(id)
    }

    /// Number of state changes so far.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.signal.revision()
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> Option<&RunState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn plan(&self) -> &MapPlan {
        &self.plan
    }

    #[must_use]
    pub fn map_seed(&self) -> u64 {
        self.map_seed
    }

    #[must_use]
    pub fn battle(&self) -> Option<&BattleEngine> {
        self.battle.as_ref()
    }

    #[must_use]
    pub fn pending_reward(&self) -> Option<&RewardOffer> {
        self.pending_reward.as_ref()
    }

    #[must_use]
    pub fn shop(&self) -> &ShopEngine {
        &self.shop
    }

    #[must_use]
    pub fn reward_candidates(&self) -> &[Weighted<CardDefinition>] {
        &self.reward_candidates
    }

    #[must_use]
    pub fn content(&self) -> &ContentCatalog {
        &self.content
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn meta(&self) -> &MetaProgress {
        &self.meta
    }

    #[must_use]
    pub fn balance(&self) -> &RunBalance {
        &self.balance
    }

    #[must_use]
    pub fn template(&self) -> &MapTemplate {
        &self.template
    }
}
