// ============================================================================
// Routing Module
// Currency graph derived from the order book and bounded path search
// ============================================================================

mod graph;
mod path_finder;

pub use graph::CurrencyGraph;
pub use path_finder::{PathFinder, Route};
