//! Procedural run maps.
//!
//! ## Key Types
//!
//! - `NodeType`: Battle, Shop, Rest, Boss
//! - `MapPlan`: Immutable node sequence for one run
//! - `MapTemplate`: Named template; supplies the plan length
//! - `generate`: Seeded plan generation with shop/rest guarantees

pub mod generator;
pub mod plan;

pub use generator::{generate, GUARANTEE_LENGTH, MIN_PLAN_LENGTH};
pub use plan::{MapPlan, MapTemplate, NodeType};
