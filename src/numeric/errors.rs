// ============================================================================
// Numeric Errors
// Error types for decimal arithmetic on rates and amounts
// ============================================================================

use thiserror::Error;

/// Errors that can occur during rate and amount arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the representable decimal range
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,
    /// Attempted division by zero
    #[error("division by zero")]
    DivisionByZero,
    /// A rate or amount that must be positive was not
    #[error("non-positive value where a positive one is required")]
    NonPositive,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
