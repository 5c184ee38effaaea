// ============================================================================
// Balance Ledger
// Per-user, per-currency funds with all-or-nothing reservations
// ============================================================================

use super::Currency;
use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Funds one user holds in one currency.
///
/// Invariant: `0 <= locked <= available`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBalance {
    pub user_id: String,
    pub currency: Currency,
    pub available: Decimal,
    pub locked: Decimal,
}

impl UserBalance {
    pub fn new(
        user_id: impl Into<String>,
        currency: impl Into<Currency>,
        available: Decimal,
        locked: Decimal,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            currency: currency.into(),
            available,
            locked,
        }
    }

    /// Amount that can still be reserved
    pub fn spendable(&self) -> Decimal {
        self.available - self.locked
    }

    pub fn check_invariant(&self) -> Result<(), LedgerError> {
        if self.available < Decimal::ZERO || self.locked < Decimal::ZERO {
            return Err(LedgerError::Negative {
                user_id: self.user_id.clone(),
                currency: self.currency.to_string(),
            });
        }
        if self.locked > self.available {
            return Err(LedgerError::LockedExceedsAvailable {
                user_id: self.user_id.clone(),
                currency: self.currency.to_string(),
                available: self.available.to_string(),
                locked: self.locked.to_string(),
            });
        }
        Ok(())
    }
}

/// Result of a reservation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// Every leg was reserved
    Locked,
    /// Nothing was reserved; the first leg that could not be covered
    InsufficientFunds {
        user_id: String,
        currency: Currency,
        required: Decimal,
        spendable: Decimal,
    },
}

impl LockOutcome {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockOutcome::Locked)
    }
}

/// One party's share of a reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockLeg<'a> {
    pub user_id: &'a str,
    pub currency: &'a Currency,
    pub amount: Decimal,
}

/// In-memory balance ledger
#[derive(Debug, Clone, Default)]
pub struct BalanceLedger {
    balances: HashMap<String, HashMap<Currency, UserBalance>>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from seed records, rejecting any that break the invariant.
    pub fn from_balances(
        balances: impl IntoIterator<Item = UserBalance>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for balance in balances {
            ledger.insert(balance)?;
        }
        Ok(ledger)
    }

    /// Insert or replace the record for `(user_id, currency)`
    pub fn insert(&mut self, balance: UserBalance) -> Result<(), LedgerError> {
        balance.check_invariant()?;
        self.balances
            .entry(balance.user_id.clone())
            .or_default()
            .insert(balance.currency.clone(), balance);
        Ok(())
    }

    pub fn get(&self, user_id: &str, currency: &Currency) -> Option<&UserBalance> {
        self.balances.get(user_id)?.get(currency)
    }

    /// Spendable funds, zero when the user holds no record for the currency
    pub fn spendable(&self, user_id: &str, currency: &Currency) -> Decimal {
        self.get(user_id, currency)
            .map(UserBalance::spendable)
            .unwrap_or(Decimal::ZERO)
    }

    /// A user without a record for the currency is never solvent.
    pub fn has_sufficient(&self, user_id: &str, currency: &Currency, amount: Decimal) -> bool {
        self.get(user_id, currency)
            .is_some_and(|balance| balance.spendable() >= amount)
    }

    /// Reserve every leg or none.
    ///
    /// Legs hitting the same `(user, currency)` are summed before checking so
    /// the reservation can never push `locked` above `available`. A sum that
    /// overflows is reported as insufficient funds.
    pub fn lock_all(&mut self, legs: &[LockLeg<'_>]) -> LockOutcome {
        let mut required: BTreeMap<(&str, &Currency), Decimal> = BTreeMap::new();
        for leg in legs {
            let total = required
                .entry((leg.user_id, leg.currency))
                .or_insert(Decimal::ZERO);
            match total.checked_add(leg.amount) {
                Some(sum) => *total = sum,
                None => {
                    return LockOutcome::InsufficientFunds {
                        user_id: leg.user_id.to_string(),
                        currency: leg.currency.clone(),
                        required: Decimal::MAX,
                        spendable: self.spendable(leg.user_id, leg.currency),
                    };
                }
            }
        }

        for (&(user_id, currency), &amount) in &required {
            let spendable = self.spendable(user_id, currency);
            if !self.has_sufficient(user_id, currency, amount) {
                return LockOutcome::InsufficientFunds {
                    user_id: user_id.to_string(),
                    currency: currency.clone(),
                    required: amount,
                    spendable,
                };
            }
        }

        for ((user_id, currency), amount) in required {
            if let Some(balance) = self
                .balances
                .get_mut(user_id)
                .and_then(|by_currency| by_currency.get_mut(currency))
            {
                balance.locked += amount;
            }
        }

        LockOutcome::Locked
    }

    /// All records, sorted by user then currency
    pub fn balances(&self) -> Vec<&UserBalance> {
        let mut all: Vec<&UserBalance> = self
            .balances
            .values()
            .flat_map(|by_currency| by_currency.values())
            .collect();
        all.sort_by(|a, b| {
            a.user_id
                .cmp(&b.user_id)
                .then_with(|| a.currency.cmp(&b.currency))
        });
        all
    }
}

/// Seed balances used by the demo and the scenario tests
pub fn sample_balances() -> Vec<UserBalance> {
    [
        ("user_b", "KRW", 500_000),
        ("user_c", "KRW", 200_000),
        ("user_d", "MYR", 2_000),
        ("user_e", "MYR", 3_000),
        ("user_f", "USD", 500),
        ("user_g", "MYR", 1_500),
        ("user_h", "AUD", 400),
    ]
    .into_iter()
    .map(|(user, currency, available)| {
        UserBalance::new(user, currency, Decimal::from(available), Decimal::ZERO)
    })
    .collect()
}
