// ============================================================================
// Path Finder
// Breadth-first enumeration of every simple route up to a hop bound
// ============================================================================

use super::CurrencyGraph;
use crate::domain::Currency;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Currencies visited by a route, source first. Inline for the default
/// two-hop bound.
pub type Route = SmallVec<[Currency; 4]>;

/// Enumerates all simple paths, not just the shortest one: scoring picks
/// the winner downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFinder {
    max_hops: usize,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new(2)
    }
}

impl PathFinder {
    pub fn new(max_hops: usize) -> Self {
        Self { max_hops }
    }

    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// Every route from `from` to `to` with 1..=max_hops edges, in
    /// breadth-first order. No currency repeats within a route.
    pub fn find_paths(&self, graph: &CurrencyGraph, from: &Currency, to: &Currency) -> Vec<Route> {
        let mut routes = Vec::new();
        if from == to {
            return routes;
        }

        let mut queue: VecDeque<Route> = VecDeque::new();
        let mut start = Route::new();
        start.push(from.clone());
        queue.push_back(start);

        while let Some(route) = queue.pop_front() {
            let hops = route.len() - 1;
            let Some(current) = route.last() else {
                continue;
            };

            if current == to {
                routes.push(route);
                continue;
            }

            if hops >= self.max_hops {
                continue;
            }

            for neighbor in graph.neighbors(current) {
                if !route.contains(neighbor) {
                    let mut next = route.clone();
                    next.push(neighbor.clone());
                    queue.push_back(next);
                }
            }
        }

        routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Order;
    use rust_decimal::Decimal;

    fn graph(edges: &[(&str, &str)]) -> CurrencyGraph {
        let orders: Vec<Order> = edges
            .iter()
            .map(|(from, to)| Order::new("u", *from, *to, Decimal::ONE, Decimal::ONE))
            .collect();
        CurrencyGraph::build(&orders)
    }

    fn codes(route: &Route) -> Vec<&str> {
        route.iter().map(Currency::code).collect()
    }

    #[test]
    fn test_direct_and_two_hop_paths() {
        let graph = graph(&[("MYR", "KRW"), ("MYR", "USD"), ("USD", "KRW")]);
        let paths = PathFinder::default().find_paths(&graph, &"MYR".into(), &"KRW".into());

        let paths: Vec<Vec<&str>> = paths.iter().map(codes).collect();
        assert_eq!(
            paths,
            vec![vec!["MYR", "KRW"], vec!["MYR", "USD", "KRW"]]
        );
    }

    #[test]
    fn test_hop_bound_is_respected() {
        let graph = graph(&[("A", "B"), ("B", "C"), ("C", "D")]);
        let finder = PathFinder::new(2);
        assert!(finder.find_paths(&graph, &"A".into(), &"D".into()).is_empty());

        let finder = PathFinder::new(3);
        assert_eq!(finder.find_paths(&graph, &"A".into(), &"D".into()).len(), 1);
    }

    #[test]
    fn test_no_cycles_within_a_path() {
        let graph = graph(&[("A", "B"), ("B", "A"), ("B", "C"), ("A", "C")]);
        let paths = PathFinder::new(4).find_paths(&graph, &"A".into(), &"C".into());

        for path in &paths {
            let mut seen = path.to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), path.len());
        }
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_same_currency_yields_nothing() {
        let graph = graph(&[("A", "B"), ("B", "A")]);
        assert!(PathFinder::default()
            .find_paths(&graph, &"A".into(), &"A".into())
            .is_empty());
    }

    #[test]
    fn test_currency_reused_across_distinct_paths() {
        let graph = graph(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let paths = PathFinder::default().find_paths(&graph, &"A".into(), &"D".into());
        let paths: Vec<Vec<&str>> = paths.iter().map(codes).collect();
        assert_eq!(paths, vec![vec!["A", "B", "D"], vec!["A", "C", "D"]]);
    }
}
