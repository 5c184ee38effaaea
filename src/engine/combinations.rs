// ============================================================================
// Hop Combinations
// Lazy depth-first walk of the per-hop candidate product with pruning
// ============================================================================

use super::evaluator::{HopState, MatchEvaluator};
use crate::domain::{Match, Order};
use crate::routing::Route;

/// Iterator over the feasible matches of one route.
///
/// Conceptually the Cartesian product of `candidates`, but a hop that fails
/// its solvency check prunes every combination sharing that prefix, and no
/// combination is materialised before it is evaluated. At most
/// `evaluation_budget` hop steps are attempted.
///
/// # Example
/// ```text
/// hop 0: [a, b]      hop 1: [x, y]
/// visit a -> (a,x) (a,y) -> b fails solvency -> done
/// ```
pub struct HopCombinations<'r, 'a> {
    evaluator: &'r MatchEvaluator<'a>,
    submitter: &'r Order,
    route: &'r Route,
    candidates: Vec<Vec<&'r Order>>,
    /// Next candidate to try at each depth
    cursors: Vec<usize>,
    /// `states[d]` is the running state before hop `d`
    states: Vec<HopState>,
    chosen: Vec<&'r Order>,
    evaluations: usize,
    exhausted: bool,
}

impl<'r, 'a> HopCombinations<'r, 'a> {
    pub(crate) fn new(
        evaluator: &'r MatchEvaluator<'a>,
        submitter: &'r Order,
        route: &'r Route,
        candidates: Vec<Vec<&'r Order>>,
    ) -> Self {
        let hops = route.len().saturating_sub(1);
        let exhausted =
            hops == 0 || candidates.len() != hops || candidates.iter().any(Vec::is_empty);

        Self {
            evaluator,
            submitter,
            route,
            cursors: vec![0; hops],
            states: vec![HopState::start(submitter)],
            chosen: Vec::with_capacity(hops),
            candidates,
            evaluations: 0,
            exhausted,
        }
    }

    /// Hop steps attempted so far
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn backtrack(&mut self) {
        self.chosen.pop();
        self.states.pop();
    }
}

impl Iterator for HopCombinations<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let hops = self.cursors.len();

        while !self.exhausted {
            let depth = self.chosen.len();

            if depth == hops {
                let state = *self.states.last()?;
                let found = self.evaluator.finish(self.submitter, &self.chosen, state);
                self.backtrack();
                if found.is_some() {
                    return found;
                }
                continue;
            }

            let cursor = self.cursors[depth];
            if cursor >= self.candidates[depth].len() {
                if depth == 0 {
                    self.exhausted = true;
                    break;
                }
                self.cursors[depth] = 0;
                self.backtrack();
                continue;
            }

            if self.evaluations >= self.evaluator.config().evaluation_budget {
                tracing::warn!(
                    route = ?self.route,
                    budget = self.evaluations,
                    "Evaluation budget exhausted, remaining combinations skipped"
                );
                self.exhausted = true;
                break;
            }

            self.cursors[depth] += 1;
            self.evaluations += 1;

            let order = self.candidates[depth][cursor];
            let state = *self.states.last()?;
            if let Some(next) =
                self.evaluator
                    .step(state, order, &self.route[depth], &self.route[depth + 1])
            {
                self.chosen.push(order);
                self.states.push(next);
            }
        }

        None
    }
}
