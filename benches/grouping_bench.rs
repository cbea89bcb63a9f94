use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use gazette::battle::{group_battles, summarize_battles};
use gazette::board::{
    Order, Ownership, TerritoryId, TurnOrders, ALL_POWERS, STANDARD_TERRITORIES,
};

fn territory(i: usize) -> TerritoryId {
    TerritoryId::new(STANDARD_TERRITORIES[i % STANDARD_TERRITORIES.len()].abbr)
        .expect("standard abbreviations are non-empty")
}

/// Builds a turn with one order per unit, each unit on its own territory.
fn random_turn(rng: &mut SmallRng, units: usize) -> TurnOrders {
    let n = STANDARD_TERRITORIES.len();
    (0..units)
        .map(|u| {
            let power = ALL_POWERS[u % ALL_POWERS.len()];
            let source = territory(u);
            let order = match rng.gen_range(0..4) {
                0 => Order::hold(),
                1 => Order::move_to(territory(rng.gen_range(0..n))),
                2 => Order::support(
                    territory(rng.gen_range(0..n)),
                    Some(territory(rng.gen_range(0..n))),
                ),
                _ => Order::convoy(territory(rng.gen_range(0..n)), territory(rng.gen_range(0..n))),
            };
            (power, source, order)
        })
        .collect()
}

fn bench_group_battles(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_battles");
    for units in [22, 34, 75] {
        let mut rng = SmallRng::seed_from_u64(1901);
        let orders = random_turn(&mut rng, units);
        group.bench_with_input(BenchmarkId::from_parameter(units), &orders, |b, orders| {
            b.iter(|| group_battles(black_box(orders)))
        });
    }
    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1902);
    let orders = random_turn(&mut rng, 34);
    let ownership: Ownership = (0..34)
        .map(|i| (territory(i), ALL_POWERS[i % ALL_POWERS.len()]))
        .collect();
    let battles = group_battles(&orders);

    c.bench_function("summarize_34_units", |b| {
        b.iter(|| summarize_battles(black_box(&battles), black_box(&orders), black_box(&ownership)))
    });
}

criterion_group!(benches, bench_group_battles, bench_summaries);
criterion_main!(benches);
