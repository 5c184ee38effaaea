// ============================================================================
// Engine Factory
// Creates matching engines with proper configuration
// ============================================================================

use crate::domain::{sample_balances, BalanceLedger, MatcherConfig, OrderBook, UserBalance};
use crate::engine::MatchingEngine;
use crate::error::EngineError;
use crate::interfaces::{
    Clock, EventHandler, InMemoryOrderStore, NoOpEventHandler, OrderStore, SystemClock,
};
use crate::persistence::JsonFileOrderStore;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a matching engine from configuration
///
/// # Arguments
/// * `config` - Search and scoring parameters
/// * `store` - Durable storage the order book is loaded from
/// * `event_handler` - Receiver for order and escrow events
///
/// The ledger starts empty and the system clock is used.
///
/// # Example
/// ```
/// use fx_matcher::prelude::*;
/// use std::sync::Arc;
///
/// let engine = create_from_config(
///     MatcherConfig::default(),
///     Arc::new(InMemoryOrderStore::new()),
///     Arc::new(NoOpEventHandler),
/// )
/// .unwrap();
/// assert!(engine.order_book().is_empty());
/// ```
pub fn create_from_config(
    config: MatcherConfig,
    store: Arc<dyn OrderStore>,
    event_handler: Arc<dyn EventHandler>,
) -> Result<MatchingEngine, EngineError> {
    // Validate before touching the store
    config.validate()?;

    let book = OrderBook::open(store);
    let engine = MatchingEngine::new(
        config,
        book,
        BalanceLedger::new(),
        Arc::new(SystemClock),
        event_handler,
    )?;
    Ok(engine)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating matching engines with fluent API
///
/// # Example
/// ```
/// use fx_matcher::prelude::*;
/// use rust_decimal::Decimal;
///
/// let engine = MatchingEngineBuilder::new()
///     .with_max_hops(3)
///     .with_rate_tolerance(Decimal::new(2, 2))
///     .with_sample_balances()
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.config().max_hops, 3);
/// ```
pub struct MatchingEngineBuilder {
    config: MatcherConfig,
    store: Option<Arc<dyn OrderStore>>,
    balances: Vec<UserBalance>,
    clock: Arc<dyn Clock>,
    event_handler: Arc<dyn EventHandler>,
}

impl MatchingEngineBuilder {
    /// Default configuration, volatile storage, empty ledger
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
            store: None,
            balances: Vec::new(),
            clock: Arc::new(SystemClock),
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    // ========================================================================
    // Search Configuration
    // ========================================================================

    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.config.max_hops = max_hops;
        self
    }

    pub fn with_rate_tolerance(mut self, tolerance: Decimal) -> Self {
        self.config.rate_tolerance = tolerance;
        self
    }

    pub fn with_evaluation_budget(mut self, budget: usize) -> Self {
        self.config.evaluation_budget = budget;
        self
    }

    // ========================================================================
    // Storage and Balances
    // ========================================================================

    pub fn with_store(mut self, store: Arc<dyn OrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Persist the order book as a JSON document at `path`
    pub fn with_json_store(self, path: impl Into<PathBuf>) -> Self {
        self.with_store(Arc::new(JsonFileOrderStore::new(path)))
    }

    pub fn with_balance(mut self, balance: UserBalance) -> Self {
        self.balances.push(balance);
        self
    }

    pub fn with_balances(mut self, balances: impl IntoIterator<Item = UserBalance>) -> Self {
        self.balances.extend(balances);
        self
    }

    /// Seed the ledger with the demonstration balances
    pub fn with_sample_balances(self) -> Self {
        self.with_balances(sample_balances())
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_event_handler(mut self, event_handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Direct and single-intermediary routes, 1% tolerance
    pub fn strict() -> Self {
        Self::new().with_config(MatcherConfig::strict())
    }

    /// Up to three hops with a larger evaluation budget
    pub fn wide_search() -> Self {
        Self::new().with_config(MatcherConfig::wide_search())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the matching engine
    pub fn build(self) -> Result<MatchingEngine, EngineError> {
        self.config.validate()?;

        let ledger = BalanceLedger::from_balances(self.balances)?;
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryOrderStore::new()));
        let book = OrderBook::open(store);

        let engine = MatchingEngine::new(self.config, book, ledger, self.clock, self.event_handler)?;
        Ok(engine)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &MatcherConfig {
        &self.config
    }
}

impl Default for MatchingEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
