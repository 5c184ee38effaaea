// ============================================================================
// Rate Arithmetic
// Conversions between quote directions and currency units
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::Decimal;

/// Checked division mapping a zero divisor and overflow to `NumericError`.
#[inline]
pub fn checked_div(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    if rhs.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(NumericError::Overflow)
}

/// Checked multiplication.
#[inline]
pub fn checked_mul(lhs: Decimal, rhs: Decimal) -> NumericResult<Decimal> {
    lhs.checked_mul(rhs).ok_or(NumericError::Overflow)
}

/// Express a rate quoted as "B per 1 A" as "A per 1 B".
///
/// # Errors
/// `NonPositive` for a zero or negative rate.
pub fn invert_rate(rate: Decimal) -> NumericResult<Decimal> {
    if rate <= Decimal::ZERO {
        return Err(NumericError::NonPositive);
    }
    checked_div(Decimal::ONE, rate)
}

/// Convert an amount of a source currency into target units at `rate`.
#[inline]
pub fn checked_convert(amount: Decimal, rate: Decimal) -> NumericResult<Decimal> {
    checked_mul(amount, rate)
}

/// `|a - b| / max(a, b)` for two positive rates.
///
/// # Example
/// ```text
/// relative_difference(300, 310) = 10 / 310 ≈ 0.0323
/// ```
pub fn relative_difference(a: Decimal, b: Decimal) -> NumericResult<Decimal> {
    if a <= Decimal::ZERO || b <= Decimal::ZERO {
        return Err(NumericError::NonPositive);
    }
    let diff = a.checked_sub(b).ok_or(NumericError::Overflow)?.abs();
    checked_div(diff, a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_rate() {
        let inverted = invert_rate(Decimal::from(4)).unwrap();
        assert_eq!(inverted, Decimal::new(25, 2));
    }

    #[test]
    fn test_invert_rejects_zero() {
        assert_eq!(invert_rate(Decimal::ZERO), Err(NumericError::NonPositive));
        assert_eq!(
            invert_rate(Decimal::from(-2)),
            Err(NumericError::NonPositive)
        );
    }

    #[test]
    fn test_relative_difference_is_symmetric() {
        let a = Decimal::from(300);
        let b = Decimal::from(310);
        let ab = relative_difference(a, b).unwrap();
        let ba = relative_difference(b, a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab < Decimal::new(5, 2));
        assert!(ab > Decimal::new(3, 2));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            checked_div(Decimal::ONE, Decimal::ZERO),
            Err(NumericError::DivisionByZero)
        );
    }

    #[test]
    fn test_convert() {
        // 310000 KRW at 0.5 => 155000
        let converted = checked_convert(Decimal::from(310_000), Decimal::new(5, 1)).unwrap();
        assert_eq!(converted, Decimal::from(155_000));
    }
}
