// ============================================================================
// Shared Matching Engine
// Thread-safe handle serializing match-and-lock sequences
// ============================================================================

use super::matching_engine::{ExecutionOutcome, MatchingEngine};
use crate::domain::{Match, Order, OrderId, OrderStatus, StatusUpdate};
use crate::error::OrderError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one engine.
///
/// Every call holds the engine lock for its full duration, so a search
/// followed by escrow inside [`SharedMatchingEngine::match_and_execute`]
/// cannot interleave with another request.
#[derive(Clone)]
pub struct SharedMatchingEngine {
    inner: Arc<Mutex<MatchingEngine>>,
}

impl SharedMatchingEngine {
    pub fn new(engine: MatchingEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn find_matches(&self, order: &Order) -> Result<Vec<Match>, OrderError> {
        self.inner.lock().find_matches(order)
    }

    pub fn add_order(&self, order: Order) -> Result<OrderId, OrderError> {
        self.inner.lock().add_order(order)
    }

    pub fn update_status(&self, order_id: &OrderId, status: OrderStatus) -> StatusUpdate {
        self.inner.lock().update_status(order_id, status)
    }

    pub fn order_book(&self) -> Vec<Order> {
        self.inner.lock().order_book()
    }

    /// Find the best match for `order` and execute it atomically.
    ///
    /// `Ok(None)` when nothing matches.
    pub fn match_and_execute(
        &self,
        order: &Order,
    ) -> Result<Option<(Match, ExecutionOutcome)>, OrderError> {
        let mut engine = self.inner.lock();
        let Some(best) = engine.best_match(order)? else {
            return Ok(None);
        };
        let outcome = engine.execute_match(&best);
        Ok(Some((best, outcome)))
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut MatchingEngine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
