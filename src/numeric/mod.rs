// ============================================================================
// Numeric Module
// Checked decimal helpers for exchange-rate arithmetic
// ============================================================================
//
// This module provides:
// - NumericError: Error types for arithmetic operations
// - Rate helpers: inversion, relative difference, unit conversion
// - json_number: serde adapter writing decimals as bare JSON numbers
//
// Design principles:
// - No floating-point arithmetic (f64 appears only in the JSON encoding)
// - All fallible arithmetic returns Result (no panics)

mod errors;
pub mod json_number;
mod rate;

pub use errors::{NumericError, NumericResult};
pub use rate::{checked_convert, checked_div, checked_mul, invert_rate, relative_difference};
