//! Static content a run draws from: cards, pools, oaths, balances, map
//! templates.
//!
//! Cards come from two arenas. The card library is the primary registry.
//! Pool cards are definitions that are only reachable through pools; they
//! resolve for pool composition but not through the library, which is what
//! makes the reward/shop links of the resolution chain matter after a reload.

use serde::{Deserialize, Serialize};

use super::meta::MetaProgress;
use crate::cards::{
    CardDefinition, CardId, CardPoolDefinition, CardRegistry, CardResolver, PoolContext,
};
use crate::core::RunBalance;
use crate::map::MapTemplate;
use crate::rewards::{flat_candidates, resolve_pools, Weighted};

/// A playable character: starting deck plus the pools it rolls from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OathDefinition {
    pub id: String,
    pub display_name: String,
    pub start_deck: Vec<CardId>,
    /// Pools used in every context.
    pub base_pools: Vec<String>,
    pub reward_pools: Vec<String>,
    pub shop_pools: Vec<String>,
}

impl OathDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            ..Self::default()
        }
    }

    /// Add `count` copies of a card to the starting deck.
    #[must_use]
    pub fn with_start_cards(mut self, card: impl Into<String>, count: usize) -> Self {
        let card = CardId::new(card);
        self.start_deck.extend(std::iter::repeat(card).take(count));
        self
    }

    #[must_use]
    pub fn with_base_pool(mut self, pool_id: impl Into<String>) -> Self {
        self.base_pools.push(pool_id.into());
        self
    }

    #[must_use]
    pub fn with_reward_pool(mut self, pool_id: impl Into<String>) -> Self {
        self.reward_pools.push(pool_id.into());
        self
    }

    #[must_use]
    pub fn with_shop_pool(mut self, pool_id: impl Into<String>) -> Self {
        self.shop_pools.push(pool_id.into());
        self
    }

    fn context_pools(&self, context: PoolContext) -> &[String] {
        match context {
            PoolContext::Reward => &self.reward_pools,
            PoolContext::Shop => &self.shop_pools,
        }
    }
}

/// All registered content. Lookups are by ID or name; first registration wins.
#[derive(Clone, Debug, Default)]
pub struct ContentCatalog {
    library: CardRegistry,
    pool_cards: CardRegistry,
    pools: Vec<CardPoolDefinition>,
    global_base_pools: Vec<String>,
    global_reward_pools: Vec<String>,
    global_shop_pools: Vec<String>,
    premium_pools: Vec<String>,
    oaths: Vec<OathDefinition>,
    balances: Vec<RunBalance>,
    templates: Vec<MapTemplate>,
}

impl ContentCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Builders ===

    #[must_use]
    pub fn with_library(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        for card in cards {
            self.library.register(card);
        }
        self
    }

    /// Definitions reachable only through pools.
    #[must_use]
    pub fn with_pool_cards(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        for card in cards {
            self.pool_cards.register(card);
        }
        self
    }

    /// Register a pool. Invalid pools are logged and still registered;
    /// their invalid entries never roll.
    #[must_use]
    pub fn with_pool(mut self, pool: CardPoolDefinition) -> Self {
        if let Err(problem) = pool.validate() {
            tracing::warn!(%problem, "card pool has invalid entries");
        }
        if self.pool(&pool.pool_id).is_none() {
            self.pools.push(pool);
        }
        self
    }

    #[must_use]
    pub fn with_global_base_pool(mut self, pool_id: impl Into<String>) -> Self {
        self.global_base_pools.push(pool_id.into());
        self
    }

    #[must_use]
    pub fn with_global_pool(mut self, context: PoolContext, pool_id: impl Into<String>) -> Self {
        match context {
            PoolContext::Reward => self.global_reward_pools.push(pool_id.into()),
            PoolContext::Shop => self.global_shop_pools.push(pool_id.into()),
        }
        self
    }

    /// Pools feeding the shop's premium slot.
    #[must_use]
    pub fn with_premium_pool(mut self, pool_id: impl Into<String>) -> Self {
        self.premium_pools.push(pool_id.into());
        self
    }

    #[must_use]
    pub fn with_oath(mut self, oath: OathDefinition) -> Self {
        if self.oath(&oath.id).is_none() {
            self.oaths.push(oath);
        }
        self
    }

    #[must_use]
    pub fn with_balance(mut self, balance: RunBalance) -> Self {
        if self.balance(&balance.name).is_none() {
            self.balances.push(balance);
        }
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: MapTemplate) -> Self {
        if self.template(&template.name).is_none() {
            self.templates.push(template);
        }
        self
    }

    // === Lookups ===

    #[must_use]
    pub fn library(&self) -> &CardRegistry {
        &self.library
    }

    #[must_use]
    pub fn pool(&self, pool_id: &str) -> Option<&CardPoolDefinition> {
        self.pools.iter().find(|p| p.pool_id == pool_id)
    }

    #[must_use]
    pub fn oath(&self, id: &str) -> Option<&OathDefinition> {
        if id.trim().is_empty() {
            return None;
        }
        self.oaths.iter().find(|o| o.id == id)
    }

    #[must_use]
    pub fn balance(&self, name: &str) -> Option<&RunBalance> {
        if name.trim().is_empty() {
            return None;
        }
        self.balances.iter().find(|b| b.name == name)
    }

    #[must_use]
    pub fn template(&self, name: &str) -> Option<&MapTemplate> {
        if name.trim().is_empty() {
            return None;
        }
        self.templates.iter().find(|t| t.name == name)
    }

    // === Pool assembly ===

    /// Pools active for `context`, in priority order, without repeats:
    /// global base, global context, oath base, oath context, then unlocked
    /// pools that allow the context.
    #[must_use]
    pub fn active_pools(
        &self,
        oath: Option<&OathDefinition>,
        meta: &MetaProgress,
        context: PoolContext,
    ) -> Vec<&CardPoolDefinition> {
        let global_context = match context {
            PoolContext::Reward => &self.global_reward_pools,
            PoolContext::Shop => &self.global_shop_pools,
        };

        let mut ids: Vec<&str> = Vec::new();
        let listed = self
            .global_base_pools
            .iter()
            .chain(global_context)
            .chain(oath.into_iter().flat_map(|o| o.base_pools.iter().chain(o.context_pools(context))));
        for id in listed {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }

        let mut active: Vec<&CardPoolDefinition> = ids
            .into_iter()
            .filter_map(|id| {
                let pool = self.pool(id);
                if pool.is_none() {
                    tracing::debug!(pool = id, "unknown pool id skipped");
                }
                pool
            })
            .collect();

        for id in &meta.unlocked_pool_ids {
            if let Some(pool) = self.pool(id) {
                if pool.allows(context) && !active.iter().any(|p| p.pool_id == pool.pool_id) {
                    active.push(pool);
                }
            }
        }
        active
    }

    /// Base-weighted candidates for `context`.
    ///
    /// Falls back to the whole library, then to the cards in `deck`, when
    /// the active pools yield nothing.
    #[must_use]
    pub fn candidates(
        &self,
        oath: Option<&OathDefinition>,
        meta: &MetaProgress,
        context: PoolContext,
        deck: &[CardId],
    ) -> Vec<Weighted<CardDefinition>> {
        let pooled = resolve_pools(self.active_pools(oath, meta, context), context, self);
        if !pooled.is_empty() {
            return pooled;
        }
        if !self.library.is_empty() {
            tracing::debug!(?context, "no pooled candidates; using card library");
            return flat_candidates(self.library.as_slice());
        }
        tracing::debug!(?context, "no pooled candidates or library; using deck");
        flat_candidates(&self.resolve_all(deck))
    }

    /// Base-weighted premium slot candidates. Empty when no premium pool resolves.
    #[must_use]
    pub fn premium_candidates(&self) -> Vec<Weighted<CardDefinition>> {
        let pools = self.premium_pools.iter().filter_map(|id| self.pool(id));
        resolve_pools(pools, PoolContext::Shop, self)
    }
}

/// Library first, then pool-only cards.
impl CardResolver for ContentCatalog {
    fn resolve(&self, id: &CardId) -> Option<&CardDefinition> {
        self.library.resolve(id).or_else(|| self.pool_cards.resolve(id))
    }
}
