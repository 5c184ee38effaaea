// ============================================================================
// Match Domain Model
// ============================================================================

use super::{Order, OrderId};
use crate::numeric::{checked_mul, NumericResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a counter-order relates to the submitter's currency pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegKind {
    /// Same direction as the submitter
    Direct,
    /// Exact complement of the submitter
    Reverse,
    /// Touches an intermediate currency
    Bridge,
}

/// A proposed trade. Recomputed on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Submitter's order first, then counter-orders in traversal order
    pub path: Vec<Order>,

    /// Realized rate for the submitter (target units per source unit)
    pub rate: Decimal,

    /// Tradeable amount in the submitter's source currency
    pub liquidity: Decimal,

    pub score: Decimal,

    /// Hop count + 1
    pub estimated_steps: usize,
}

impl Match {
    pub fn submitter(&self) -> Option<&Order> {
        self.path.first()
    }

    pub fn counter_orders(&self) -> &[Order] {
        self.path.get(1..).unwrap_or(&[])
    }

    pub fn hop_count(&self) -> usize {
        self.counter_orders().len()
    }

    pub fn is_direct(&self) -> bool {
        self.estimated_steps == 1
    }

    /// What the submitter receives in the target currency
    pub fn receive_amount(&self) -> NumericResult<Decimal> {
        checked_mul(self.liquidity, self.rate)
    }

    /// Classify counter-order `index` (0-based among counter-orders)
    pub fn leg_kind(&self, index: usize) -> Option<LegKind> {
        let submitter = self.submitter()?;
        let leg = self.counter_orders().get(index)?;
        Some(if leg.offers(&submitter.from_currency, &submitter.to_currency) {
            LegKind::Direct
        } else if leg.complements(submitter) {
            LegKind::Reverse
        } else {
            LegKind::Bridge
        })
    }

    pub fn counter_order_ids(&self) -> impl Iterator<Item = &OrderId> {
        self.counter_orders().iter().map(|order| &order.id)
    }

    /// Ranking order: higher score first, then fewer steps, then counter-order ids.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.estimated_steps.cmp(&other.estimated_steps))
            .then_with(|| self.counter_order_ids().cmp(other.counter_order_ids()))
    }
}
