// ============================================================================
// Order Book Domain Model
// Insertion-ordered order collection backed by a durable store
// ============================================================================

use super::{Currency, Order, OrderId, OrderStatus};
use crate::error::OrderError;
use crate::interfaces::{InMemoryOrderStore, OrderStore};
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of a status overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    Applied { previous: OrderStatus },
    NotFound,
    InvalidTransition { from: OrderStatus, to: OrderStatus },
}

impl StatusUpdate {
    pub fn is_applied(&self) -> bool {
        matches!(self, StatusUpdate::Applied { .. })
    }
}

/// Every order ever added, in insertion order.
///
/// The in-memory collection is authoritative for the process lifetime;
/// store failures are logged and never surface to callers.
pub struct OrderBook {
    orders: Vec<Order>,
    /// Position of each id
    index: HashMap<OrderId, usize>,
    store: Arc<dyn OrderStore>,
}

impl OrderBook {
    /// Load from `store`, degrading to an empty book on failure.
    pub fn open(store: Arc<dyn OrderStore>) -> Self {
        let orders = match store.load() {
            Ok(orders) => orders,
            Err(err) => {
                tracing::warn!("Failed to load order book, starting empty: {}", err);
                Vec::new()
            }
        };

        let mut book = Self {
            orders,
            index: HashMap::new(),
            store,
        };
        book.rebuild_index();
        tracing::debug!(
            orders = book.orders.len(),
            open = book.open_orders().count(),
            "Order book loaded"
        );
        book
    }

    /// Empty book with volatile storage
    pub fn in_memory() -> Self {
        Self::open(Arc::new(InMemoryOrderStore::new()))
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append an order. Its status is reset to open.
    ///
    /// Ids are unique within the book; a second order under a known id is
    /// rejected and the book is left untouched.
    pub fn add_order(&mut self, mut order: Order) -> Result<OrderId, OrderError> {
        order.validate()?;
        if self.index.contains_key(&order.id) {
            return Err(OrderError::DuplicateId(order.id.to_string()));
        }
        order.status = OrderStatus::Open;

        let id = order.id.clone();
        self.index.insert(id.clone(), self.orders.len());
        self.orders.push(order);
        self.persist();
        Ok(id)
    }

    /// Overwrite the status of `order_id`.
    ///
    /// Unknown ids are a benign no-op. Terminal orders refuse any other status.
    pub fn update_status(&mut self, order_id: &OrderId, status: OrderStatus) -> StatusUpdate {
        let outcome = self.apply_status(order_id, status, false);
        if outcome.is_applied() {
            self.persist();
        }
        outcome
    }

    /// Mark a counter-order as matched with its funds reserved
    pub fn mark_matched(&mut self, order_id: &OrderId) -> StatusUpdate {
        let outcome = self.apply_status(order_id, OrderStatus::Matched, true);
        if outcome.is_applied() {
            self.persist();
        }
        outcome
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Open orders in insertion order
    pub fn open_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|order| order.is_open())
    }

    /// Every order regardless of status
    pub fn all_orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.index.get(order_id).map(|&pos| &self.orders[pos])
    }

    /// Open orders on the pair in either direction
    pub fn orders_for_pair<'a>(
        &'a self,
        a: &'a Currency,
        b: &'a Currency,
    ) -> impl Iterator<Item = &'a Order> + 'a {
        self.open_orders()
            .filter(move |order| order.offers(a, b) || order.offers(b, a))
    }

    /// Orders usable for the hop `from -> to`: forward orders first, then
    /// reverse ones, never the excluded user's.
    pub fn hop_candidates(
        &self,
        from: &Currency,
        to: &Currency,
        exclude_user: &str,
    ) -> Vec<&Order> {
        let eligible = |order: &&Order| order.user_id != exclude_user;
        let forward = self
            .open_orders()
            .filter(|order| order.offers(from, to))
            .filter(eligible);
        let reverse = self
            .open_orders()
            .filter(|order| order.offers(to, from))
            .filter(eligible);
        forward.chain(reverse).collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn apply_status(
        &mut self,
        order_id: &OrderId,
        status: OrderStatus,
        lock_flag: bool,
    ) -> StatusUpdate {
        let Some(&pos) = self.index.get(order_id) else {
            return StatusUpdate::NotFound;
        };
        let order = &mut self.orders[pos];
        let previous = order.status;
        if !previous.can_transition_to(status) {
            return StatusUpdate::InvalidTransition {
                from: previous,
                to: status,
            };
        }
        order.status = status;
        if lock_flag {
            order.balance_locked = true;
        }
        StatusUpdate::Applied { previous }
    }

    /// Index stored orders, dropping any later order that reuses an id.
    fn rebuild_index(&mut self) {
        self.index.clear();
        let mut kept = Vec::with_capacity(self.orders.len());
        for order in std::mem::take(&mut self.orders) {
            if self.index.contains_key(&order.id) {
                tracing::warn!(order_id = %order.id, "Dropping stored order with duplicate id");
                continue;
            }
            self.index.insert(order.id.clone(), kept.len());
            kept.push(order);
        }
        self.orders = kept;
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.orders) {
            tracing::warn!("Failed to save order book: {}", err);
        }
    }
}
