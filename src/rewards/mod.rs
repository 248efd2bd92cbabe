//! Weighted rolling shared by post-battle rewards and the shop.
//!
//! ## Key Types
//!
//! - `Weighted`: A candidate value with its roll weight
//! - `roll`: Seeded weighted sampling, with or without replacement
//! - `compose_pools`: Merge usage-filtered pools into a weighted candidate list
//! - `RewardOffer`: Options rolled after a won battle

pub mod composer;
pub mod offer;
pub mod roller;

pub use composer::{
    apply_roll_weights, compose_pools, duplicate_factor, flat_candidates, merge_pools, owned_counts,
    resolve_pools, weigh_candidates,
};
pub use offer::RewardOffer;
pub use roller::{roll, Weighted};
