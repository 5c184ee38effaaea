// ============================================================================
// Matching Engine
// Core business logic for currency exchange matching
// ============================================================================

use super::evaluator::MatchEvaluator;
use super::scoring::Scorer;
use crate::domain::{
    BalanceLedger, Currency, LockLeg, LockOutcome, Match, MatcherConfig, Order, OrderBook,
    OrderId, OrderStatus, StatusUpdate, UserBalance,
};
use crate::error::{ConfigError, LedgerError, OrderError};
use crate::interfaces::{Clock, EventHandler, ExchangeEvent};
use crate::routing::{CurrencyGraph, PathFinder};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Result of executing a chosen match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Funds locked, counter-orders matched, remainder re-booked if any
    Executed {
        matched: Vec<OrderId>,
        remainder: Option<OrderId>,
    },
    /// Nothing locked, nothing changed
    InsufficientFunds {
        user_id: String,
        currency: Currency,
        required: Decimal,
        spendable: Decimal,
    },
    /// A counter-order is gone or no longer open
    StaleOrder { order_id: OrderId },
    /// The match has no counter-orders
    EmptyMatch,
}

impl ExecutionOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, ExecutionOutcome::Executed { .. })
    }
}

/// Single-process matching engine.
///
/// Owns its order book and ledger; independent instances share nothing.
/// Mutating operations take `&mut self`, so one match-and-lock sequence
/// always runs with exclusive access.
pub struct MatchingEngine {
    config: MatcherConfig,

    book: OrderBook,

    ledger: BalanceLedger,

    path_finder: PathFinder,

    /// Source of "now" for recency scoring
    clock: Arc<dyn Clock>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

impl MatchingEngine {
    /// Create a new matching engine
    pub fn new(
        config: MatcherConfig,
        book: OrderBook,
        ledger: BalanceLedger,
        clock: Arc<dyn Clock>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            path_finder: PathFinder::new(config.max_hops),
            config,
            book,
            ledger,
            clock,
            event_handler,
        })
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Ranked direct and multi-hop matches for a candidate order.
    ///
    /// An empty result means no compatible counter-orders; only malformed
    /// input is an error.
    pub fn find_matches(&self, order: &Order) -> Result<Vec<Match>, OrderError> {
        order.validate()?;

        let scorer = Scorer::new(&self.config, self.clock.now());
        let evaluator = MatchEvaluator::new(&self.ledger, &self.config, scorer);

        let mut matches = self.direct_matches(&evaluator, order);
        let direct = matches.len();
        matches.extend(self.multi_hop_matches(&evaluator, order));
        matches.sort_by(Match::rank_cmp);

        tracing::debug!(
            order_id = %order.id,
            pair = %format!("{}->{}", order.from_currency, order.to_currency),
            direct,
            multi_hop = matches.len() - direct,
            "Matching request evaluated"
        );

        Ok(matches)
    }

    /// Highest-ranked match, if any
    pub fn best_match(&self, order: &Order) -> Result<Option<Match>, OrderError> {
        Ok(self.find_matches(order)?.into_iter().next())
    }

    // ========================================================================
    // Order book
    // ========================================================================

    /// Currently open orders, in insertion order
    pub fn order_book(&self) -> Vec<Order> {
        self.book.open_orders().cloned().collect()
    }

    pub fn add_order(&mut self, order: Order) -> Result<OrderId, OrderError> {
        let order_id = self.book.add_order(order)?;
        self.event_handler.on_event(ExchangeEvent::OrderAdded {
            order_id: order_id.clone(),
            timestamp: self.clock.now(),
        });
        Ok(order_id)
    }

    pub fn update_status(&mut self, order_id: &OrderId, status: OrderStatus) -> StatusUpdate {
        let outcome = self.book.update_status(order_id, status);
        self.emit_status_change(order_id, status, outcome);
        outcome
    }

    // ========================================================================
    // Escrow
    // ========================================================================

    /// Reserve `match.liquidity` from every counter-party, all or nothing.
    ///
    /// The submitter's own balance is left untouched.
    pub fn lock_funds(&mut self, proposal: &Match) -> LockOutcome {
        let legs: Vec<LockLeg<'_>> = proposal
            .counter_orders()
            .iter()
            .map(|order| LockLeg {
                user_id: &order.user_id,
                currency: &order.from_currency,
                amount: proposal.liquidity,
            })
            .collect();

        let outcome = self.ledger.lock_all(&legs);
        let now = self.clock.now();
        let event = match &outcome {
            LockOutcome::Locked => ExchangeEvent::FundsLocked {
                order_ids: proposal.counter_order_ids().cloned().collect(),
                amount: proposal.liquidity,
                timestamp: now,
            },
            LockOutcome::InsufficientFunds {
                user_id,
                currency,
                required,
                spendable,
            } => ExchangeEvent::LockRejected {
                user_id: user_id.clone(),
                currency: currency.clone(),
                required: *required,
                spendable: *spendable,
                timestamp: now,
            },
        };
        self.event_handler.on_event(event);
        outcome
    }

    /// Lock funds, mark counter-orders matched and re-book any unfilled
    /// remainder of the submitter's order as a new open order.
    pub fn execute_match(&mut self, proposal: &Match) -> ExecutionOutcome {
        let Some(submitter) = proposal.submitter() else {
            return ExecutionOutcome::EmptyMatch;
        };
        if proposal.counter_orders().is_empty() {
            return ExecutionOutcome::EmptyMatch;
        }

        for counter in proposal.counter_orders() {
            if !self.book.get(&counter.id).is_some_and(Order::is_open) {
                return ExecutionOutcome::StaleOrder {
                    order_id: counter.id.clone(),
                };
            }
        }

        if let LockOutcome::InsufficientFunds {
            user_id,
            currency,
            required,
            spendable,
        } = self.lock_funds(proposal)
        {
            return ExecutionOutcome::InsufficientFunds {
                user_id,
                currency,
                required,
                spendable,
            };
        }

        let matched: Vec<OrderId> = proposal.counter_order_ids().cloned().collect();
        for order_id in &matched {
            let outcome = self.book.mark_matched(order_id);
            self.emit_status_change(order_id, OrderStatus::Matched, outcome);
        }

        let remainder = if proposal.liquidity < submitter.amount {
            self.split_remainder(submitter, proposal.liquidity)
        } else {
            None
        };

        tracing::info!(
            submitter = %submitter.id,
            liquidity = %proposal.liquidity,
            rate = %proposal.rate,
            hops = proposal.hop_count(),
            "Match executed"
        );

        ExecutionOutcome::Executed { matched, remainder }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Seed or replace one balance record
    pub fn set_balance(&mut self, balance: UserBalance) -> Result<(), LedgerError> {
        self.ledger.insert(balance)
    }

    /// Currency graph of the current open orders
    pub fn currency_graph(&self) -> CurrencyGraph {
        CurrencyGraph::build(self.book.open_orders())
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn direct_matches(&self, evaluator: &MatchEvaluator<'_>, order: &Order) -> Vec<Match> {
        self.book
            .open_orders()
            .filter_map(|counter| evaluator.evaluate_direct(order, counter))
            .collect()
    }

    fn multi_hop_matches(&self, evaluator: &MatchEvaluator<'_>, order: &Order) -> Vec<Match> {
        let graph = self.currency_graph();
        let routes = self
            .path_finder
            .find_paths(&graph, &order.from_currency, &order.to_currency);

        let mut matches = Vec::new();
        'routes: for route in &routes {
            let mut candidates = Vec::with_capacity(route.len() - 1);
            for hop in route.windows(2) {
                let orders = self.book.hop_candidates(&hop[0], &hop[1], &order.user_id);
                if orders.is_empty() {
                    continue 'routes;
                }
                candidates.push(orders);
            }
            matches.extend(evaluator.evaluate_route(order, route, candidates));
        }
        matches
    }

    fn split_remainder(&mut self, submitter: &Order, filled: Decimal) -> Option<OrderId> {
        let mut remainder = submitter.clone();
        remainder.id = OrderId::generate();
        remainder.amount = submitter.amount - filled;
        remainder.balance_locked = false;
        let remaining_amount = remainder.amount;

        match self.add_order(remainder) {
            Ok(remainder_id) => {
                self.event_handler.on_event(ExchangeEvent::OrderSplit {
                    parent_id: submitter.id.clone(),
                    remainder_id: remainder_id.clone(),
                    remaining_amount,
                    timestamp: self.clock.now(),
                });
                Some(remainder_id)
            }
            Err(err) => {
                tracing::warn!(submitter = %submitter.id, "Remainder not re-booked: {}", err);
                None
            }
        }
    }

    fn emit_status_change(&self, order_id: &OrderId, to: OrderStatus, outcome: StatusUpdate) {
        if let StatusUpdate::Applied { previous } = outcome {
            self.event_handler.on_event(ExchangeEvent::OrderStatusChanged {
                order_id: order_id.clone(),
                from: previous,
                to,
                timestamp: self.clock.now(),
            });
        }
    }
}
