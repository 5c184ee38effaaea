// ============================================================================
// Matcher Configuration
// Search bounds, rate tolerance and scoring parameters
// ============================================================================

use crate::error::ConfigError;
use chrono::Duration;
use rust_decimal::Decimal;

/// Hard ceiling on `max_hops`; the combination count grows as k^hops.
pub const MAX_HOP_LIMIT: usize = 4;

// ============================================================================
// Score Weights
// ============================================================================

/// Relative weight of each scoring component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub rate: Decimal,
    pub liquidity: Decimal,
    pub recency: Decimal,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rate: Decimal::new(4, 1),
            liquidity: Decimal::new(4, 1),
            recency: Decimal::new(2, 1),
        }
    }
}

impl ScoreWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        let all = [self.rate, self.liquidity, self.recency];
        let sum: Decimal = all.iter().sum();
        if all.iter().any(|w| *w < Decimal::ZERO) || sum != Decimal::ONE {
            return Err(ConfigError::Weights(format!(
                "{}/{}/{}",
                self.rate, self.liquidity, self.recency
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Complete Matcher Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Maximum edges in a multi-hop route
    pub max_hops: usize,

    /// Maximum relative rate gap for a direct match (0.05 = 5%)
    pub rate_tolerance: Decimal,

    /// Maximum hop evaluations per route before enumeration stops
    pub evaluation_budget: usize,

    pub weights: ScoreWeights,

    /// Rate divisor for the rate component (unclamped)
    pub rate_normalizer: Decimal,

    /// Liquidity at which the liquidity component saturates
    pub liquidity_cap: Decimal,

    /// Age at which the recency component reaches zero
    pub recency_window: Duration,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_hops: 2,
            rate_tolerance: Decimal::new(5, 2),
            evaluation_budget: 100_000,
            weights: ScoreWeights::default(),
            rate_normalizer: Decimal::from(1000),
            liquidity_cap: Decimal::from(10_000),
            recency_window: Duration::hours(24),
        }
    }
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: Set the hop bound
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Builder method: Set the direct-match rate tolerance
    pub fn with_rate_tolerance(mut self, tolerance: Decimal) -> Self {
        self.rate_tolerance = tolerance;
        self
    }

    /// Builder method: Set the per-route evaluation budget
    pub fn with_evaluation_budget(mut self, budget: usize) -> Self {
        self.evaluation_budget = budget;
        self
    }

    /// Builder method: Set score weights
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hops == 0 || self.max_hops > MAX_HOP_LIMIT {
            return Err(ConfigError::HopBound {
                value: self.max_hops,
                limit: MAX_HOP_LIMIT,
            });
        }

        if self.evaluation_budget == 0 {
            return Err(ConfigError::ZeroBudget);
        }

        if self.rate_tolerance < Decimal::ZERO || self.rate_tolerance >= Decimal::ONE {
            return Err(ConfigError::Tolerance(self.rate_tolerance.to_string()));
        }

        if self.rate_normalizer <= Decimal::ZERO {
            return Err(ConfigError::NonPositive("rate_normalizer"));
        }
        if self.liquidity_cap <= Decimal::ZERO {
            return Err(ConfigError::NonPositive("liquidity_cap"));
        }
        if self.recency_window <= Duration::zero() {
            return Err(ConfigError::NonPositive("recency_window"));
        }

        self.weights.validate()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl MatcherConfig {
    /// Tight tolerance, single-hop routes only
    pub fn strict() -> Self {
        Self::default()
            .with_max_hops(1)
            .with_rate_tolerance(Decimal::new(1, 2))
    }

    /// Three-hop search with a larger budget
    pub fn wide_search() -> Self {
        Self::default()
            .with_max_hops(3)
            .with_evaluation_budget(1_000_000)
    }
}
