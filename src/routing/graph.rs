// ============================================================================
// Currency Graph
// Directed adjacency of currencies offered by open orders
// ============================================================================

use crate::domain::{Currency, Order};
use std::collections::{BTreeMap, BTreeSet};

/// Read-only snapshot of the order book as a currency graph.
///
/// Nodes are every currency named by an open order; an edge A -> B exists
/// iff some open order gives A for B. Rebuilt per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyGraph {
    adjacency: BTreeMap<Currency, BTreeSet<Currency>>,
}

impl CurrencyGraph {
    /// Build from any order sequence; non-open orders are ignored.
    pub fn build<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        let mut adjacency: BTreeMap<Currency, BTreeSet<Currency>> = BTreeMap::new();

        for order in orders.into_iter().filter(|order| order.is_open()) {
            adjacency.entry(order.to_currency.clone()).or_default();
            adjacency
                .entry(order.from_currency.clone())
                .or_default()
                .insert(order.to_currency.clone());
        }

        Self { adjacency }
    }

    /// Outgoing neighbours, sorted by code
    pub fn neighbors<'a>(
        &'a self,
        currency: &Currency,
    ) -> impl Iterator<Item = &'a Currency> + 'a {
        self.adjacency
            .get(currency)
            .into_iter()
            .flat_map(|targets| targets.iter())
    }

    pub fn has_edge(&self, from: &Currency, to: &Currency) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    pub fn contains(&self, currency: &Currency) -> bool {
        self.adjacency.contains_key(currency)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum()
    }
}
