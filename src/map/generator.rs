//! Seeded map generation.
//!
//! Node 0 is always a battle and the last node is always the boss. Interior
//! nodes roll in `[0, 100)`: below 70 a battle, below 90 a shop, otherwise
//! a rest. Plans of length 5 or more then get at least one shop and one rest.

use super::plan::{MapPlan, NodeType};
use crate::core::GameRng;

/// Shortest plan generated. A one-node plan is a single battle.
pub const MIN_PLAN_LENGTH: usize = 1;

/// Length from which a shop and a rest are guaranteed.
pub const GUARANTEE_LENGTH: usize = 5;

const FORCE_TRIES: u32 = 20;

/// Generate a plan of `length` nodes.
///
/// A `length` of 0 is raised to [`MIN_PLAN_LENGTH`]. Node 0 wins over the
/// boss slot, so `generate(1, _)` is `[Battle]`; from length 2 the plan
/// ends in the boss. Same `(length, seed)` always yields the same plan.
#[must_use]
pub fn generate(length: usize, seed: u64) -> MapPlan {
    let len = length.max(MIN_PLAN_LENGTH);
    let mut rng = GameRng::new(seed.max(1));

    let mut nodes: Vec<NodeType> = (0..len)
        .map(|i| {
            if i == 0 {
                NodeType::Battle
            } else if i == len - 1 {
                NodeType::Boss
            } else {
                roll_interior(&mut rng)
            }
        })
        .collect();

    if len >= GUARANTEE_LENGTH {
        for required in [NodeType::Shop, NodeType::Rest] {
            if !nodes.contains(&required) {
                force_one(&mut nodes, required, &mut rng);
            }
        }
    }

    tracing::debug!(seed, len, ?nodes, "generated map plan");
    MapPlan::new(nodes)
}

fn roll_interior(rng: &mut GameRng) -> NodeType {
    match rng.gen_range(0..100) {
        0..=69 => NodeType::Battle,
        70..=89 => NodeType::Shop,
        _ => NodeType::Rest,
    }
}

/// Interior nodes that may be converted without losing another guarantee.
fn convertible(nodes: &[NodeType], index: usize) -> bool {
    match nodes[index] {
        NodeType::Battle => true,
        NodeType::Boss => false,
        kind @ (NodeType::Shop | NodeType::Rest) => nodes.iter().filter(|&&n| n == kind).count() > 1,
    }
}

/// Convert one interior node to `kind`: random tries first, then a scan.
fn force_one(nodes: &mut [NodeType], kind: NodeType, rng: &mut GameRng) {
    let len = nodes.len();
    if len < 3 {
        return;
    }

    for _ in 0..FORCE_TRIES {
        let index = rng.gen_range_usize(1..len - 1);
        if convertible(nodes, index) {
            nodes[index] = kind;
            return;
        }
    }

    if let Some(index) = (1..len - 1).find(|&i| convertible(nodes, i)) {
        nodes[index] = kind;
    }
}
