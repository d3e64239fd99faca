//! The trail: literals asserted since the last restart, plus the per-level
//! boundary index used to backjump and restart without rescanning.
//!
//! Level-0 assignments — original unit clauses and anything BCP derives
//! before the first decision — are never pushed here; they live only in
//! `State`'s per-variable arrays and are therefore immune to truncation:
//! they are permanent and survive every backjump and restart.

use crate::cnf::{ClauseId, Literal};
use crate::solver::heuristic::Vsids;
use crate::solver::state::State;
use crate::solver::unit_propagation::UnitPropagator;

#[derive(Debug, Default, Clone)]
pub struct Trail {
    pub literals: Vec<Literal>,
    /// `trail_end_of_level[k]`: trail length at the moment level `k + 1`
    /// began.
    pub trail_end_of_level: Vec<usize>,
    pub decision_level: usize,
}

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    /// Asserts an input unit clause's literal, permanently, at level 0.
    pub fn assert_unit(&self, state: &mut State, lit: Literal) {
        state.assign(lit, 0);
    }

    /// Extends the trail with a new decision: bumps the decision level,
    /// snapshots the trail boundary, asserts the literal, and pushes its
    /// negation for BCP to re-examine.
    pub fn decide(&mut self, state: &mut State, unit_propagator: &mut UnitPropagator, lit: Literal) {
        self.decision_level += 1;
        let boundary = self.literals.len();
        if self.trail_end_of_level.len() < self.decision_level {
            self.trail_end_of_level.push(boundary);
        } else {
            self.trail_end_of_level[self.decision_level - 1] = boundary;
        }

        state.assign(lit, self.decision_level);
        self.literals.push(lit);
        state.stats.num_decisions += 1;
        unit_propagator.push(lit.negate());
    }

    /// Asserts a BCP-forced literal. At level 0 this behaves like
    /// `assert_unit` (permanent, off-trail); at any other level it is a
    /// regular, backtrackable trail entry.
    pub fn assert_propagated(&mut self, state: &mut State, lit: Literal, antecedent: ClauseId) {
        state.assign(lit, self.decision_level);
        state.set_antecedent(lit.var(), antecedent);
        if self.decision_level > 0 {
            self.literals.push(lit);
        }
        state.stats.num_propagations += 1;
    }

    /// Asserts the UIP literal produced by conflict analysis, after
    /// backjumping to `level`. `antecedent` is the just-inserted learned
    /// clause, or `None` if the learned clause was unit.
    pub fn assert_uip(
        &mut self,
        state: &mut State,
        lit: Literal,
        level: usize,
        antecedent: Option<ClauseId>,
    ) {
        state.assign(lit, level);
        if let Some(clause_id) = antecedent {
            state.set_antecedent(lit.var(), clause_id);
        }
        if level > 0 {
            self.literals.push(lit);
        }
    }

    /// Non-chronological backtrack to `level`: unwinds and re-queues every
    /// variable above it, then truncates the bookkeeping down to `level`.
    pub fn backjump(
        &mut self,
        state: &mut State,
        heuristic: &mut Vsids,
        unit_propagator: &mut UnitPropagator,
        level: usize,
    ) {
        let boundary = self.trail_end_of_level[level];
        while self.literals.len() > boundary {
            let lit = self.literals.pop().expect("boundary exceeds trail length");
            state.unassign(lit.var());
            heuristic.requeue(lit.var());
        }
        self.trail_end_of_level.truncate(level);
        self.decision_level = level;
        unit_propagator.clear();
        state.conflict_clause_id = None;
    }

    /// Abandons the entire trail, keeping only level-0 state and learned
    /// clauses. The restart counters live in `solver::restarts::Restarter`;
    /// this only performs the mechanical unwind.
    pub fn restart(
        &mut self,
        state: &mut State,
        heuristic: &mut Vsids,
        unit_propagator: &mut UnitPropagator,
    ) {
        while let Some(lit) = self.literals.pop() {
            state.unassign(lit.var());
            heuristic.requeue(lit.var());
        }
        self.trail_end_of_level.clear();
        self.decision_level = 0;
        unit_propagator.clear();
        state.conflict_clause_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;
    use crate::solver::clause_database::ClauseDatabase;
    use crate::solver::config::Config;

    fn fresh_state(num_vars: usize) -> State {
        State::new(num_vars, ClauseDatabase::new(vec![Clause::from("1 2 3")]))
    }

    #[test]
    fn decide_then_backjump_to_zero_clears_everything() {
        let mut state = fresh_state(3);
        let mut heuristic = Vsids::new(3, &Config::default());
        let mut unit_propagator = UnitPropagator::default();
        let mut trail = Trail::new();

        trail.decide(&mut state, &mut unit_propagator, Literal::from(1));
        trail.decide(&mut state, &mut unit_propagator, Literal::from(2));
        assert_eq!(trail.decision_level, 2);
        assert_eq!(trail.literals.len(), 2);

        trail.backjump(&mut state, &mut heuristic, &mut unit_propagator, 0);
        assert_eq!(trail.decision_level, 0);
        assert!(trail.literals.is_empty());
        assert_eq!(state.current[1], None);
        assert_eq!(state.current[2], None);
    }

    #[test]
    fn level_zero_propagation_never_enters_the_trail() {
        let mut state = fresh_state(2);
        let mut trail = Trail::new();
        trail.assert_propagated(&mut state, Literal::from(1), 0);
        assert!(trail.literals.is_empty());
        assert_eq!(state.current[1], Some(true));
    }
}
