// ============================================================================
// Order Store Interface
// Durable mapping from order id to order record
// ============================================================================

use crate::domain::Order;
use crate::error::StoreError;
use parking_lot::Mutex;
use std::sync::Arc;

/// Persistence contract for the order book.
///
/// The book always saves its full collection; stores need no incremental API.
pub trait OrderStore: Send + Sync {
    /// Load every stored order in insertion order
    fn load(&self) -> Result<Vec<Order>, StoreError>;

    /// Replace the stored collection
    fn save(&self, orders: &[Order]) -> Result<(), StoreError>;
}

/// Volatile store. Clones share the same backing collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
        }
    }

    /// Snapshot of what was last saved
    pub fn saved(&self) -> Vec<Order> {
        self.orders.lock().clone()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn load(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.lock().clone())
    }

    fn save(&self, orders: &[Order]) -> Result<(), StoreError> {
        *self.orders.lock() = orders.to_vec();
        Ok(())
    }
}
