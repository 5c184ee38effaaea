// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod ledger;
pub mod order;
pub mod order_book;
pub mod trade_match;

pub use config::{MatcherConfig, ScoreWeights, MAX_HOP_LIMIT};
pub use ledger::{sample_balances, BalanceLedger, LockLeg, LockOutcome, UserBalance};
pub use order::{Currency, Order, OrderId};
pub use order_book::{OrderBook, StatusUpdate};
pub use trade_match::{LegKind, Match};

// Re-export state machine
pub use order::status::OrderStatus;
