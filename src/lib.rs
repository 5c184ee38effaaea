// ============================================================================
// FX Matcher Library
// Peer-to-peer currency exchange matching with multi-hop routing and escrow
// ============================================================================

//! # FX Matcher
//!
//! Matches currency exchange orders between users, either directly against
//! a complementary order or through chains of intermediary orders, then
//! reserves the counter-parties' funds before the trade is settled.
//!
//! ## Features
//!
//! - **Direct matching** within a configurable rate tolerance
//! - **Multi-hop routing** over a currency graph derived from open orders
//! - **Scored ranking** blending rate, liquidity and recency
//! - **All-or-nothing escrow** against per-user, per-currency balances
//! - **Durable order book** with pluggable storage (JSON file or in-memory)
//!
//! ## Example
//!
//! ```rust
//! use fx_matcher::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let mut engine = MatchingEngineBuilder::new()
//!     .with_sample_balances()
//!     .with_balance(UserBalance::new("user_a", "MYR", Decimal::from(5000), Decimal::ZERO))
//!     .build()
//!     .unwrap();
//!
//! // user_b sells KRW for MYR at 0.0032 MYR per KRW
//! engine
//!     .add_order(Order::new(
//!         "user_b",
//!         "KRW",
//!         "MYR",
//!         Decimal::from(312_500),
//!         Decimal::new(32, 4),
//!     ))
//!     .unwrap();
//!
//! let wanted = Order::new("user_a", "MYR", "KRW", Decimal::from(1000), Decimal::from(300));
//! let matches = engine.find_matches(&wanted).unwrap();
//! assert!(!matches.is_empty());
//!
//! let outcome = engine.execute_match(&matches[0]);
//! assert!(outcome.is_executed());
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod interfaces;
pub mod numeric;
pub mod persistence;
pub mod routing;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        sample_balances, BalanceLedger, Currency, LegKind, LockOutcome, Match, MatcherConfig,
        Order, OrderBook, OrderId, OrderStatus, ScoreWeights, StatusUpdate, UserBalance,
    };
    pub use crate::engine::{
        create_from_config, ExecutionOutcome, MatchingEngine, MatchingEngineBuilder,
        SharedMatchingEngine,
    };
    pub use crate::error::{ConfigError, EngineError, LedgerError, OrderError, StoreError};
    pub use crate::interfaces::{
        Clock, EventHandler, ExchangeEvent, FixedClock, InMemoryOrderStore, LoggingEventHandler,
        NoOpEventHandler, OrderStore, RecordingEventHandler, SystemClock,
    };
    pub use crate::persistence::JsonFileOrderStore;
    pub use crate::routing::{CurrencyGraph, PathFinder, Route};
}
