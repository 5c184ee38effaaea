// ============================================================================
// Match Scoring
// Weighted blend of rate, liquidity and counter-order recency
// ============================================================================

use crate::domain::{MatcherConfig, ScoreWeights};
use crate::numeric::{checked_div, checked_mul, NumericError, NumericResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Scores matches against a fixed "now".
///
/// ```text
/// score = w_rate * rate / normalizer
///       + w_liq  * min(1, liquidity / cap)
///       + w_rec  * max(0, 1 - age / window)
/// ```
/// The rate component is deliberately unclamped.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    weights: ScoreWeights,
    rate_normalizer: Decimal,
    liquidity_cap: Decimal,
    window_ms: Decimal,
    now: DateTime<Utc>,
}

impl Scorer {
    pub fn new(config: &MatcherConfig, now: DateTime<Utc>) -> Self {
        Self {
            weights: config.weights,
            rate_normalizer: config.rate_normalizer,
            liquidity_cap: config.liquidity_cap,
            window_ms: Decimal::from(config.recency_window.num_milliseconds()),
            now,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn score(
        &self,
        rate: Decimal,
        liquidity: Decimal,
        timestamp: DateTime<Utc>,
    ) -> NumericResult<Decimal> {
        let rate_score = checked_div(rate, self.rate_normalizer)?;
        let liquidity_score = checked_div(liquidity, self.liquidity_cap)?.min(Decimal::ONE);
        let recency_score = self.recency(timestamp)?;

        let weighted = [
            checked_mul(rate_score, self.weights.rate)?,
            checked_mul(liquidity_score, self.weights.liquidity)?,
            checked_mul(recency_score, self.weights.recency)?,
        ];
        weighted.iter().try_fold(Decimal::ZERO, |acc, part| {
            acc.checked_add(*part).ok_or(NumericError::Overflow)
        })
    }

    /// Linear decay from 1 at `now` to 0 after the window
    pub fn recency(&self, timestamp: DateTime<Utc>) -> NumericResult<Decimal> {
        let age_ms = Decimal::from((self.now - timestamp).num_milliseconds());
        let decayed = Decimal::ONE - checked_div(age_ms, self.window_ms)?;
        Ok(decayed.max(Decimal::ZERO))
    }
}
