// ============================================================================
// Basic Usage Example
// ============================================================================

use fx_matcher::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== FX Matcher Example ===\n");

    let mut engine = MatchingEngineBuilder::new()
        .with_sample_balances()
        .with_balance(UserBalance::new(
            "user_a",
            "MYR",
            Decimal::from(5000),
            Decimal::ZERO,
        ))
        .with_event_handler(Arc::new(LoggingEventHandler))
        .build()
        .unwrap();

    println!("Seeded balances:");
    for balance in engine.ledger().balances() {
        println!(
            "  {:8} {} available={} locked={}",
            balance.user_id, balance.currency, balance.available, balance.locked
        );
    }

    // Counter-offers: one complementary order and one two-leg bridge via USD
    println!("\nAdding orders...");
    let offers = [
        Order::new("user_b", "KRW", "MYR", Decimal::from(155_000), Decimal::new(32, 4)),
        Order::new("user_d", "MYR", "USD", Decimal::from(400), Decimal::new(25, 2)),
        Order::new("user_f", "USD", "KRW", Decimal::from(300), Decimal::from(1300)),
    ];
    for offer in offers {
        let id = engine.add_order(offer).unwrap();
        println!("  added {}", id);
    }

    let wanted = Order::new("user_a", "MYR", "KRW", Decimal::from(1000), Decimal::from(300))
        .with_min_rate(Decimal::from(295));

    println!("\n=== Matches for 1000 MYR -> KRW ===");
    let matches = engine.find_matches(&wanted).unwrap();
    for m in &matches {
        println!(
            "  steps={} rate={} liquidity={} score={:.4}",
            m.estimated_steps, m.rate, m.liquidity, m.score
        );
    }

    let Some(best) = matches.first() else {
        println!("No match found");
        return;
    };

    println!("\n=== Executing Best Match ===");
    match engine.execute_match(best) {
        ExecutionOutcome::Executed { matched, remainder } => {
            println!("  matched orders: {}", matched.len());
            if let Some(id) = remainder {
                println!("  remainder re-booked as {}", id);
            }
        },
        other => println!("  not executed: {:?}", other),
    }

    println!("\n=== Final Order Book ===");
    for order in engine.order_book() {
        println!(
            "  {} {} {} -> {} amount={}",
            order.id, order.user_id, order.from_currency, order.to_currency, order.amount
        );
    }
}
