// ============================================================================
// Error Types
// Rejections reported to callers before or outside of matching
// ============================================================================

use crate::numeric::NumericError;
use thiserror::Error;

/// Reasons a candidate or book order is rejected before any matching work
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Source and target currency are both {0}")]
    SameCurrency(String),

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(String),

    #[error("Rate must be positive, got {0}")]
    NonPositiveRate(String),

    #[error("Minimum rate must be positive, got {0}")]
    NonPositiveMinRate(String),

    #[error("Maximum rate must be positive, got {0}")]
    NonPositiveMaxRate(String),

    #[error("Maximum rate {max} is below minimum rate {min}")]
    RateBounds { min: String, max: String },

    #[error("Order id already exists: {0}")]
    DuplicateId(String),

    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),
}

/// Failures assembling a matching engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Invalid matcher configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_hops must be between 1 and {limit}, got {value}")]
    HopBound { value: usize, limit: usize },

    #[error("Evaluation budget must be positive")]
    ZeroBudget,

    #[error("Rate tolerance must be within [0, 1), got {0}")]
    Tolerance(String),

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("Score weights must be non-negative and sum to 1, got {0}")]
    Weights(String),
}

/// Rejected balance records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Balance for {user_id}/{currency} is negative")]
    Negative { user_id: String, currency: String },

    #[error("Locked {locked} exceeds available {available} for {user_id}/{currency}")]
    LockedExceedsAvailable {
        user_id: String,
        currency: String,
        available: String,
        locked: String,
    },
}

/// Durable order storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
