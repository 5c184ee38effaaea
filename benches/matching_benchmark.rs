// ============================================================================
// Matching Engine Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Direct Matching - Books holding only complementary orders
// 2. Multi-hop Matching - Books with bridge currencies and routes up to the hop bound
// 3. Path Finding - Route enumeration on the currency graph alone
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fx_matcher::prelude::*;
use rust_decimal::Decimal;
use std::hint::black_box;

const CURRENCIES: [&str; 6] = ["MYR", "KRW", "USD", "AUD", "SGD", "JPY"];

/// Engine where every trader holds plenty of every currency
fn seeded_engine(config: MatcherConfig, traders: usize) -> MatchingEngine {
    let balances = (0..traders).flat_map(|i| {
        CURRENCIES.iter().map(move |currency| {
            UserBalance::new(
                format!("trader{}", i),
                *currency,
                Decimal::from(10_000_000),
                Decimal::ZERO,
            )
        })
    });

    MatchingEngineBuilder::new()
        .with_config(config)
        .with_balances(balances)
        .with_balance(UserBalance::new(
            "benchmark_user",
            "MYR",
            Decimal::from(10_000_000),
            Decimal::ZERO,
        ))
        .build()
        .unwrap()
}

fn submitter() -> Order {
    Order::new(
        "benchmark_user",
        "MYR",
        "KRW",
        Decimal::from(1000),
        Decimal::from(300),
    )
}

// ============================================================================
// Direct Matching Benchmarks
// ============================================================================

fn benchmark_direct_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("direct_matching");

    for num_orders in [100, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_orders),
            num_orders,
            |b, &num_orders| {
                let mut engine = seeded_engine(MatcherConfig::strict(), num_orders);

                // KRW -> MYR around 310 KRW per MYR
                for i in 0..num_orders {
                    let krw_per_myr = Decimal::from(300 + (i % 20) as i64);
                    engine
                        .add_order(Order::new(
                            format!("trader{}", i),
                            "KRW",
                            "MYR",
                            Decimal::from(100_000 + i as i64),
                            Decimal::ONE / krw_per_myr,
                        ))
                        .unwrap();
                }

                let order = submitter();
                b.iter(|| black_box(engine.find_matches(&order).unwrap()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Multi-hop Matching Benchmarks
// ============================================================================

fn benchmark_multi_hop_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_hop_matching");

    for max_hops in [2usize, 3].iter() {
        group.bench_with_input(
            BenchmarkId::new("hops", max_hops),
            max_hops,
            |b, &max_hops| {
                let config = MatcherConfig::default().with_max_hops(max_hops);
                let mut engine = seeded_engine(config, 60);

                // Every ordered currency pair gets a few offers
                let mut trader = 0;
                for from in CURRENCIES.iter() {
                    for to in CURRENCIES.iter().filter(|to| *to != from) {
                        for _ in 0..2 {
                            engine
                                .add_order(Order::new(
                                    format!("trader{}", trader % 60),
                                    *from,
                                    *to,
                                    Decimal::from(5000),
                                    Decimal::new(125, 2),
                                ))
                                .unwrap();
                            trader += 1;
                        }
                    }
                }

                let order = submitter();
                b.iter(|| black_box(engine.find_matches(&order).unwrap()));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Path Finding Benchmarks
// ============================================================================

fn benchmark_path_finding(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_finding");

    let orders: Vec<Order> = CURRENCIES
        .iter()
        .flat_map(|from| {
            CURRENCIES
                .iter()
                .filter(move |to| *to != from)
                .map(move |to| Order::new("trader0", *from, *to, Decimal::ONE, Decimal::ONE))
        })
        .collect();
    let graph = CurrencyGraph::build(&orders);
    let from = Currency::new("MYR");
    let to = Currency::new("KRW");

    for max_hops in [1usize, 2, 3, 4].iter() {
        let finder = PathFinder::new(*max_hops);
        group.bench_with_input(BenchmarkId::new("hops", max_hops), &finder, |b, finder| {
            b.iter(|| black_box(finder.find_paths(&graph, &from, &to)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_direct_matching,
    benchmark_multi_hop_matching,
    benchmark_path_finding,
);

criterion_main!(benches);
