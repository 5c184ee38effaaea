// ============================================================================
// Match Evaluator
// Feasibility, realized rate, liquidity and score for candidate matches
// ============================================================================

use super::combinations::HopCombinations;
use super::scoring::Scorer;
use crate::domain::{BalanceLedger, Currency, Match, MatcherConfig, Order};
use crate::numeric::{checked_convert, checked_div, checked_mul, invert_rate, relative_difference};
use crate::routing::Route;
use rust_decimal::Decimal;

/// Running state while walking a route left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HopState {
    pub rate: Decimal,
    pub liquidity: Decimal,
}

impl HopState {
    pub fn start(submitter: &Order) -> Self {
        Self {
            rate: Decimal::ONE,
            liquidity: submitter.amount,
        }
    }
}

/// Read-only evaluation context for one matching request.
///
/// Infeasible candidates yield `None`; nothing here is an error.
pub struct MatchEvaluator<'a> {
    ledger: &'a BalanceLedger,
    config: &'a MatcherConfig,
    scorer: Scorer,
}

impl<'a> MatchEvaluator<'a> {
    pub fn new(ledger: &'a BalanceLedger, config: &'a MatcherConfig, scorer: Scorer) -> Self {
        Self {
            ledger,
            config,
            scorer,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        self.config
    }

    // ========================================================================
    // Direct matching
    // ========================================================================

    /// Pair the submitter with an exact complement.
    ///
    /// # Example
    /// ```text
    /// Submitter: 1000 MYR -> KRW @ 300
    /// Counter:   310000 KRW -> MYR @ 1/310   (inverted: 310 KRW per MYR)
    /// Gap:       |300 - 310| / 310 = 3.2%   (within 5%)
    /// Result:    rate 310, liquidity min(1000, 310000 * 1/310) = 1000 MYR
    /// ```
    pub fn evaluate_direct(&self, submitter: &Order, counter: &Order) -> Option<Match> {
        if !counter.is_open()
            || counter.user_id == submitter.user_id
            || !counter.complements(submitter)
        {
            return None;
        }

        let submitter_rate = submitter.rate;
        let counter_rate = invert_rate(counter.rate).ok()?;

        let gap = relative_difference(submitter_rate, counter_rate).ok()?;
        if gap > self.config.rate_tolerance {
            return None;
        }

        // Counter amount expressed in the submitter's source currency
        let counter_amount = checked_convert(counter.amount, counter.rate).ok()?;
        let liquidity = submitter.amount.min(counter_amount);
        let counter_cost = checked_div(liquidity, counter.rate).ok()?;

        if !self
            .ledger
            .has_sufficient(&submitter.user_id, &submitter.from_currency, liquidity)
            || !self
                .ledger
                .has_sufficient(&counter.user_id, &counter.from_currency, counter_cost)
        {
            return None;
        }

        let rate = submitter_rate.max(counter_rate);
        let score = self.scorer.score(rate, liquidity, counter.timestamp).ok()?;

        Some(Match {
            path: vec![submitter.clone(), counter.clone()],
            rate,
            liquidity,
            score,
            estimated_steps: 1,
        })
    }

    // ========================================================================
    // Multi-hop matching
    // ========================================================================

    /// Lazily evaluate every order combination along `route`.
    ///
    /// `candidates[i]` holds the usable orders for hop `route[i] -> route[i + 1]`.
    pub fn evaluate_route<'r>(
        &'r self,
        submitter: &'r Order,
        route: &'r Route,
        candidates: Vec<Vec<&'r Order>>,
    ) -> HopCombinations<'r, 'a> {
        HopCombinations::new(self, submitter, route, candidates)
    }

    /// Extend `state` across one hop. `None` when the hop owner cannot cover
    /// the running liquidity.
    pub(crate) fn step(
        &self,
        state: HopState,
        order: &Order,
        from: &Currency,
        to: &Currency,
    ) -> Option<HopState> {
        let hop_rate = if order.offers(from, to) {
            order.rate
        } else {
            invert_rate(order.rate).ok()?
        };

        let rate = checked_mul(state.rate, hop_rate).ok()?;
        let liquidity = state.liquidity.min(order.amount);

        if !self
            .ledger
            .has_sufficient(&order.user_id, &order.from_currency, liquidity)
        {
            return None;
        }

        Some(HopState { rate, liquidity })
    }

    /// Apply the submitter's minimum rate and build the match.
    pub(crate) fn finish(
        &self,
        submitter: &Order,
        hops: &[&Order],
        state: HopState,
    ) -> Option<Match> {
        if let Some(min_rate) = submitter.min_rate {
            if state.rate < min_rate {
                return None;
            }
        }

        let first = hops.first()?;
        let score = self
            .scorer
            .score(state.rate, state.liquidity, first.timestamp)
            .ok()?;

        let mut path = Vec::with_capacity(hops.len() + 1);
        path.push(submitter.clone());
        path.extend(hops.iter().map(|order| (*order).clone()));

        Some(Match {
            path,
            rate: state.rate,
            liquidity: state.liquidity,
            score,
            estimated_steps: hops.len() + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserBalance;
    use chrono::{TimeZone, Utc};

    fn ledger(entries: &[(&str, &str, i64)]) -> BalanceLedger {
        BalanceLedger::from_balances(entries.iter().map(|(user, currency, amount)| {
            UserBalance::new(*user, *currency, Decimal::from(*amount), Decimal::ZERO)
        }))
        .unwrap()
    }

    fn scorer(config: &MatcherConfig) -> Scorer {
        Scorer::new(config, Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
    }

    fn one_over(n: i64) -> Decimal {
        Decimal::ONE / Decimal::from(n)
    }

    fn close(a: Decimal, b: Decimal) -> bool {
        (a - b).abs() < Decimal::new(1, 9)
    }

    fn submitter() -> Order {
        Order::new("user_a", "MYR", "KRW", Decimal::from(1000), Decimal::from(300))
            .with_min_rate(Decimal::from(295))
    }

    #[test]
    fn test_direct_match_within_tolerance() {
        let config = MatcherConfig::default();
        let ledger = ledger(&[("user_a", "MYR", 5000), ("user_b", "KRW", 500_000)]);
        let evaluator = MatchEvaluator::new(&ledger, &config, scorer(&config));
        let counter = Order::new("user_b", "KRW", "MYR", Decimal::from(310_000), one_over(310));

        let m = evaluator.evaluate_direct(&submitter(), &counter).unwrap();

        assert!(close(m.rate, Decimal::from(310)));
        assert!(close(m.liquidity, Decimal::from(1000)));
        assert_eq!(m.estimated_steps, 1);
        assert_eq!(m.path.len(), 2);
    }

    #[test]
    fn test_direct_match_outside_tolerance() {
        let config = MatcherConfig::default();
        let ledger = ledger(&[("user_a", "MYR", 5000), ("user_b", "KRW", 500_000)]);
        let evaluator = MatchEvaluator::new(&ledger, &config, scorer(&config));
        // Inverted: 350 KRW per MYR, 14% away from 300
        let counter = Order::new("user_b", "KRW", "MYR", Decimal::from(350_000), one_over(350));

        assert!(evaluator.evaluate_direct(&submitter(), &counter).is_none());
    }

    #[test]
    fn test_direct_match_requires_both_balances() {
        let config = MatcherConfig::default();
        let counter = Order::new("user_b", "KRW", "MYR", Decimal::from(310_000), one_over(310));

        let poor_counter = ledger(&[("user_a", "MYR", 5000), ("user_b", "KRW", 1000)]);
        let evaluator = MatchEvaluator::new(&poor_counter, &config, scorer(&config));
        assert!(evaluator.evaluate_direct(&submitter(), &counter).is_none());

        let poor_submitter = ledger(&[("user_a", "MYR", 10), ("user_b", "KRW", 500_000)]);
        let evaluator = MatchEvaluator::new(&poor_submitter, &config, scorer(&config));
        assert!(evaluator.evaluate_direct(&submitter(), &counter).is_none());
    }

    #[test]
    fn test_direct_match_skips_own_orders() {
        let config = MatcherConfig::default();
        let ledger = ledger(&[("user_a", "MYR", 5000), ("user_a", "KRW", 500_000)]);
        let evaluator = MatchEvaluator::new(&ledger, &config, scorer(&config));
        let own = Order::new("user_a", "KRW", "MYR", Decimal::from(310_000), one_over(310));

        assert!(evaluator.evaluate_direct(&submitter(), &own).is_none());
    }

    #[test]
    fn test_step_inverts_reverse_orders() {
        let config = MatcherConfig::default();
        let ledger = ledger(&[("user_f", "USD", 500)]);
        let evaluator = MatchEvaluator::new(&ledger, &config, scorer(&config));
        let myr = Currency::new("MYR");
        let usd = Currency::new("USD");
        // USD -> MYR @ 4 used for MYR -> USD: 0.25 USD per MYR
        let reverse = Order::new("user_f", "USD", "MYR", Decimal::from(300), Decimal::from(4));

        let state = evaluator
            .step(HopState::start(&submitter()), &reverse, &myr, &usd)
            .unwrap();
        assert_eq!(state.rate, Decimal::new(25, 2));
        assert_eq!(state.liquidity, Decimal::from(300));
    }

    #[test]
    fn test_step_checks_hop_owner_balance() {
        let config = MatcherConfig::default();
        let ledger = ledger(&[("user_f", "USD", 100)]);
        let evaluator = MatchEvaluator::new(&ledger, &config, scorer(&config));
        let forward = Order::new("user_f", "USD", "KRW", Decimal::from(300), Decimal::from(1350));

        let start = HopState {
            rate: Decimal::new(21, 2),
            liquidity: Decimal::from(1000),
        };
        assert!(evaluator
            .step(start, &forward, &"USD".into(), &"KRW".into())
            .is_none());
    }

    #[test]
    fn test_finish_enforces_min_rate() {
        let config = MatcherConfig::default();
        let ledger = BalanceLedger::new();
        let evaluator = MatchEvaluator::new(&ledger, &config, scorer(&config));
        let hop = Order::new("user_f", "MYR", "KRW", Decimal::from(300), Decimal::from(290));
        let below = HopState {
            rate: Decimal::from(290),
            liquidity: Decimal::from(300),
        };
        assert!(evaluator.finish(&submitter(), &[&hop], below).is_none());

        let above = HopState {
            rate: Decimal::from(296),
            ..below
        };
        let m = evaluator.finish(&submitter(), &[&hop], above).unwrap();
        assert_eq!(m.estimated_steps, 2);
        assert_eq!(m.rate, Decimal::from(296));
    }
}
