// ============================================================================
// Order Domain Model
// ============================================================================

use crate::error::OrderError;
use crate::numeric::json_number;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Value Objects
// ============================================================================

/// Order identifier. Caller-assigned ids are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier for engine-created orders
    pub fn generate() -> Self {
        Self(format!("order_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// ISO-style currency code, normalised to trimmed upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Order Status State Machine
// ============================================================================

pub mod status {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum OrderStatus {
        #[default]
        Open,
        Matched,
        Cancelled,
        Completed,
    }

    impl OrderStatus {
        pub fn is_terminal(&self) -> bool {
            matches!(self, OrderStatus::Cancelled | OrderStatus::Completed)
        }

        /// Whether `next` may overwrite this status.
        ///
        /// Terminal states only accept themselves. Re-applying the current
        /// status is always allowed.
        pub fn can_transition_to(&self, next: OrderStatus) -> bool {
            if *self == next {
                return true;
            }
            match self {
                OrderStatus::Open => true,
                OrderStatus::Matched => {
                    matches!(next, OrderStatus::Completed | OrderStatus::Cancelled)
                }
                OrderStatus::Cancelled | OrderStatus::Completed => false,
            }
        }

        pub fn as_str(&self) -> &'static str {
            match self {
                OrderStatus::Open => "open",
                OrderStatus::Matched => "matched",
                OrderStatus::Cancelled => "cancelled",
                OrderStatus::Completed => "completed",
            }
        }
    }
}

use status::OrderStatus;

// ============================================================================
// Order Entity
// ============================================================================

/// A standing request to give `amount` of `from_currency` for `to_currency`
/// at `rate` target units per source unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: String,
    pub from_currency: Currency,
    pub to_currency: Currency,
    #[serde(with = "json_number")]
    pub amount: Decimal,
    #[serde(with = "json_number")]
    pub rate: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "json_number::option"
    )]
    pub min_rate: Option<Decimal>,
    /// Carried through storage; matching does not consult it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "json_number::option"
    )]
    pub max_rate: Option<Decimal>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub balance_locked: bool,
}

impl Order {
    pub fn new(
        user_id: impl Into<String>,
        from_currency: impl Into<Currency>,
        to_currency: impl Into<Currency>,
        amount: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            id: OrderId::generate(),
            user_id: user_id.into(),
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            amount,
            rate,
            min_rate: None,
            max_rate: None,
            timestamp: Utc::now(),
            status: OrderStatus::Open,
            balance_locked: false,
        }
    }

    /// Builder method: Set a caller-assigned id
    pub fn with_id(mut self, id: impl Into<OrderId>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method: Set the minimum acceptable realized rate
    pub fn with_min_rate(mut self, min_rate: Decimal) -> Self {
        self.min_rate = Some(min_rate);
        self
    }

    /// Builder method: Set the maximum acceptable rate
    pub fn with_max_rate(mut self, max_rate: Decimal) -> Self {
        self.max_rate = Some(max_rate);
        self
    }

    /// Builder method: Set the creation timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Reject malformed orders before any matching work.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.user_id.trim().is_empty() {
            return Err(OrderError::MissingField("user_id"));
        }
        if self.from_currency.is_empty() {
            return Err(OrderError::MissingField("from_currency"));
        }
        if self.to_currency.is_empty() {
            return Err(OrderError::MissingField("to_currency"));
        }
        if self.from_currency == self.to_currency {
            return Err(OrderError::SameCurrency(self.from_currency.to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(OrderError::NonPositiveAmount(self.amount.to_string()));
        }
        if self.rate <= Decimal::ZERO {
            return Err(OrderError::NonPositiveRate(self.rate.to_string()));
        }
        if let Some(min_rate) = self.min_rate {
            if min_rate <= Decimal::ZERO {
                return Err(OrderError::NonPositiveMinRate(min_rate.to_string()));
            }
        }
        if let Some(max_rate) = self.max_rate {
            if max_rate <= Decimal::ZERO {
                return Err(OrderError::NonPositiveMaxRate(max_rate.to_string()));
            }
            if let Some(min_rate) = self.min_rate.filter(|&min_rate| max_rate < min_rate) {
                return Err(OrderError::RateBounds {
                    min: min_rate.to_string(),
                    max: max_rate.to_string(),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// True if this order gives `from` and wants `to`
    pub fn offers(&self, from: &Currency, to: &Currency) -> bool {
        &self.from_currency == from && &self.to_currency == to
    }

    /// True if this order is the exact currency complement of `other`
    pub fn complements(&self, other: &Order) -> bool {
        self.offers(&other.to_currency, &other.from_currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(
            "user_a",
            "MYR",
            "KRW",
            Decimal::from(1000),
            Decimal::from(300),
        )
    }

    #[test]
    fn test_order_creation() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Open);
        assert!(!order.balance_locked);
        assert!(order.id.as_str().starts_with("order_"));
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_currency_normalisation() {
        assert_eq!(Currency::new(" myr "), Currency::new("MYR"));
        assert_eq!(Currency::from("krw").code(), "KRW");
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let same = Order::new("u", "MYR", "myr", Decimal::ONE, Decimal::ONE);
        assert_eq!(
            same.validate(),
            Err(OrderError::SameCurrency("MYR".to_string()))
        );

        let mut zero_amount = order();
        zero_amount.amount = Decimal::ZERO;
        assert!(matches!(
            zero_amount.validate(),
            Err(OrderError::NonPositiveAmount(_))
        ));

        let mut negative_rate = order();
        negative_rate.rate = Decimal::from(-1);
        assert!(matches!(
            negative_rate.validate(),
            Err(OrderError::NonPositiveRate(_))
        ));

        let missing = Order::new("u", "", "KRW", Decimal::ONE, Decimal::ONE);
        assert_eq!(
            missing.validate(),
            Err(OrderError::MissingField("from_currency"))
        );

        let anonymous = Order::new(" ", "MYR", "KRW", Decimal::ONE, Decimal::ONE);
        assert_eq!(
            anonymous.validate(),
            Err(OrderError::MissingField("user_id"))
        );

        let bad_min = order().with_min_rate(Decimal::ZERO);
        assert!(matches!(
            bad_min.validate(),
            Err(OrderError::NonPositiveMinRate(_))
        ));

        let bad_max = order().with_max_rate(Decimal::from(-2));
        assert!(matches!(
            bad_max.validate(),
            Err(OrderError::NonPositiveMaxRate(_))
        ));

        let inverted = order()
            .with_min_rate(Decimal::from(320))
            .with_max_rate(Decimal::from(310));
        assert_eq!(
            inverted.validate(),
            Err(OrderError::RateBounds {
                min: "320".to_string(),
                max: "310".to_string(),
            })
        );

        let bounded = order()
            .with_min_rate(Decimal::from(290))
            .with_max_rate(Decimal::from(290));
        assert!(bounded.validate().is_ok());
    }

    #[test]
    fn test_status_transitions() {
        assert!(OrderStatus::Open.can_transition_to(OrderStatus::Matched));
        assert!(OrderStatus::Open.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Matched.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Open));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Matched));
        assert!(OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Matched.is_terminal());
    }

    #[test]
    fn test_complements() {
        let a = order();
        let b = Order::new("user_b", "KRW", "MYR", Decimal::from(310_000), Decimal::ONE);
        assert!(b.complements(&a));
        assert!(a.complements(&b));
        assert!(!a.complements(&a));
    }

    #[test]
    fn test_json_shape_matches_stored_book() {
        let json = r#"{
            "id": "order_001",
            "userId": "user_b",
            "fromCurrency": "KRW",
            "toCurrency": "MYR",
            "amount": 310000,
            "rate": 0.0032,
            "timestamp": 1700000000000,
            "status": "open",
            "balanceLocked": false
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new("order_001"));
        assert_eq!(order.from_currency, Currency::new("KRW"));
        assert_eq!(order.amount, Decimal::from(310_000));
        assert_eq!(order.rate, Decimal::new(32, 4));
        assert_eq!(order.min_rate, None);
        assert_eq!(order.timestamp.timestamp_millis(), 1_700_000_000_000);
        assert!(order.is_open());
    }

    #[test]
    fn test_json_keeps_rate_bounds_as_numbers() {
        let json = r#"{"id":"order_007","userId":"user_f","fromCurrency":"USD","toCurrency":"KRW","amount":300,"rate":1350.5,"minRate":1300,"maxRate":1400,"timestamp":1700000000000,"status":"open","balanceLocked":false}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.rate, Decimal::new(13505, 1));
        assert_eq!(order.min_rate, Some(Decimal::from(1300)));
        assert_eq!(order.max_rate, Some(Decimal::from(1400)));

        let written = serde_json::to_string(&order).unwrap();
        assert_eq!(written, json);
        assert_eq!(serde_json::from_str::<Order>(&written).unwrap(), order);

        let mut plain = order;
        plain.max_rate = None;
        assert!(!serde_json::to_string(&plain).unwrap().contains("maxRate"));
    }
}
