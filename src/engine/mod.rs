// ============================================================================
// Engine Module
// Contains the core matching engine business logic
// ============================================================================

mod combinations;
mod evaluator;
mod matching_engine;
mod scoring;
mod shared;

pub mod factory;

pub use combinations::HopCombinations;
pub use evaluator::MatchEvaluator;
pub use factory::{create_from_config, MatchingEngineBuilder};
pub use matching_engine::{ExecutionOutcome, MatchingEngine};
pub use scoring::Scorer;
pub use shared::SharedMatchingEngine;
