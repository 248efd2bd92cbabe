//! Weighted rolling benchmarks.
//!
//! Run with: `cargo bench --bench rolling`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dungeon_deck::cards::{CardDefinition, CardEffectKind, CardId, CardPoolDefinition, CardRarity, PoolContext, PoolUsage};
use dungeon_deck::core::{GameRng, RollConfig};
use dungeon_deck::rewards::{compose_pools, roll};

const RARITIES: [CardRarity; 5] = [
    CardRarity::Common,
    CardRarity::Uncommon,
    CardRarity::Rare,
    CardRarity::Epic,
    CardRarity::Legendary,
];

fn library(n: usize) -> Vec<CardDefinition> {
    (0..n)
        .map(|i| {
            CardDefinition::new(format!("card_{i}"), CardEffectKind::Attack, 6)
                .with_rarity(RARITIES[i % RARITIES.len()])
        })
        .collect()
}

fn pools(n: usize) -> Vec<CardPoolDefinition> {
    (0..4)
        .map(|p| {
            (0..n)
                .filter(|i| i % 4 == p || i % 7 == 0)
                .fold(CardPoolDefinition::new(format!("pool_{p}"), PoolUsage::Both), |pool, i| {
                    pool.with_entry(format!("card_{i}"), 1.0 + (i % 3) as f64)
                })
        })
        .collect()
}

pub fn rolling_benchmark(c: &mut Criterion) {
    let cards = library(200);
    let pools = pools(200);
    let deck: Vec<CardId> = (0..30).map(|i| CardId::new(format!("card_{}", i % 12))).collect();
    let config = RollConfig::default();

    c.bench_function("compose_pools_200", |b| {
        b.iter(|| {
            compose_pools(
                black_box(&pools),
                PoolContext::Reward,
                &cards,
                black_box(&deck),
                &config,
            )
        })
    });

    let candidates = compose_pools(&pools, PoolContext::Reward, &cards, &deck, &config);
    c.bench_function("roll_unique_3_of_200", |b| {
        let mut seed = 1u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            roll(black_box(&candidates), 3, true, &mut GameRng::new(seed))
        })
    });

    c.bench_function("roll_4_with_replacement", |b| {
        let mut rng = GameRng::new(7);
        b.iter(|| roll(black_box(&candidates), 4, false, &mut rng))
    });
}

criterion_group!(benches, rolling_benchmark);
criterion_main!(benches);
