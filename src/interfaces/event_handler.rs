// ============================================================================
// Event Handler Interface
// Defines the contract for handling order book and escrow events
// ============================================================================

use crate::domain::{Currency, OrderId, OrderStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Events emitted by the order book and the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExchangeEvent {
    /// Order appended to the book
    OrderAdded {
        order_id: OrderId,
        timestamp: DateTime<Utc>,
    },

    /// Status overwritten
    OrderStatusChanged {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        timestamp: DateTime<Utc>,
    },

    /// Counter-party funds reserved for a match
    FundsLocked {
        order_ids: Vec<OrderId>,
        amount: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// Reservation refused, nothing locked
    LockRejected {
        user_id: String,
        currency: Currency,
        required: Decimal,
        spendable: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// Unfilled remainder of a submitter order re-entered the book
    OrderSplit {
        parent_id: OrderId,
        remainder_id: OrderId,
        remaining_amount: Decimal,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing engine events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: ExchangeEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<ExchangeEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: ExchangeEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: ExchangeEvent) {
        tracing::debug!("Exchange event: {:?}", event);
    }
}

/// Keeps every event in memory
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<ExchangeEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ExchangeEvent> {
        self.events.lock().clone()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: ExchangeEvent) {
        self.events.lock().push(event);
    }
}
