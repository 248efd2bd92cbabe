//! Card system: definitions, registry, pools and ID resolution.
//!
//! ## Key Types
//!
//! - `CardId`: Stable string identifier; the only persisted form of a card
//! - `CardDefinition`: Cost, effect, value, rarity
//! - `CardRegistry`: Primary definition lookup (the arena)
//! - `CardPoolDefinition`: Weighted card references tagged by usage
//! - `ResolutionChain`: Registry -> reward candidates -> shop candidates

pub mod definition;
pub mod pool;
pub mod registry;
pub mod resolve;

pub use definition::{CardDefinition, CardEffectKind, CardId, CardRarity};
pub use pool::{CardPoolDefinition, PoolContext, PoolEntry, PoolUsage};
pub use registry::CardRegistry;
pub use resolve::{CardResolver, ResolutionChain};
