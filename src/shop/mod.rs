//! The shop: persistent offer slots, premium slot, reroll and card removal.
//!
//! ## Key Types
//!
//! - `ShopEngine`: Shop rules over a fixed candidate set
//! - `ShopState`: Per-visit slots and flags, persisted with the run
//! - `ShopOffer`: A resolved slot with its price

pub mod engine;
pub mod pricing;
pub mod state;

pub use engine::{ShopEngine, ShopOffer};
pub use pricing::{base_price, slot_price};
pub use state::ShopState;
