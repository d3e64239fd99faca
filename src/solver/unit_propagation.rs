//! Boolean constraint propagation: drains a LIFO stack of literals that have
//! just become false, re-examining every clause watching each one.

use crate::cnf::{ClauseId, Literal};
use crate::solver::literal_watching::WatchUpdate;
use crate::solver::state::State;
use crate::solver::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BcpOutcome {
    Unresolved,
    Conflict(ClauseId),
    Unsatisfiable,
}

#[derive(Debug, Default, Clone)]
pub struct UnitPropagator {
    stack: Vec<Literal>,
}

impl UnitPropagator {
    pub fn push(&mut self, lit: Literal) {
        self.stack.push(lit);
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Drains the stack, rewriting the watch index as it goes. Stops at the
    /// first conflict encountered (non-chronological backjumping means any
    /// later conflict, if one exists, is rediscovered after the next BCP
    /// call), or once the stack runs dry with everything consistent.
    pub fn propagate(&mut self, state: &mut State, trail: &mut Trail) -> BcpOutcome {
        let mut found_conflict = None;

        'outer: while let Some(false_lit) = self.stack.pop() {
            let watch_list = state.watcher.take_watch_list(false_lit);
            let mut surviving = Vec::with_capacity(watch_list.len());

            let mut iter = watch_list.into_iter();
            for clause_id in iter.by_ref() {
                let mut clause = state.clause_database[clause_id].clone();
                let update = crate::solver::literal_watching::LiteralWatcher::update_clause(
                    &mut clause,
                    false_lit,
                    &state.current,
                );
                state.clause_database[clause_id] = clause;

                match update {
                    WatchUpdate::FoundNewWatch => {
                        let new_watch = state.clause_database[clause_id].watched_literals()[0];
                        state.watcher.add_watch(new_watch, clause_id);
                    }
                    WatchUpdate::Satisfied => {
                        surviving.push(clause_id);
                    }
                    WatchUpdate::Unit(unit) => {
                        surviving.push(clause_id);
                        trail.assert_propagated(state, unit, clause_id);
                        self.stack.push(unit.negate());
                    }
                    WatchUpdate::Conflict => {
                        surviving.push(clause_id);
                        state.conflict_clause_id = Some(clause_id);
                        state.stats.num_conflicts += 1;
                        found_conflict = Some(clause_id);
                        break;
                    }
                }
            }
            // Any clauses left unprocessed in this watch list (because we
            // broke out on a conflict) still watch `false_lit`.
            surviving.extend(iter);
            state.watcher.install_watch_list(false_lit, surviving);

            if found_conflict.is_some() {
                break 'outer;
            }
        }

        if let Some(clause_id) = found_conflict {
            if trail.decision_level == 0 {
                self.stack.clear();
                return BcpOutcome::Unsatisfiable;
            }
            self.stack.clear();
            return BcpOutcome::Conflict(clause_id);
        }

        BcpOutcome::Unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;
    use crate::solver::clause_database::ClauseDatabase;

    #[test]
    fn propagates_a_forced_chain() {
        // (1) /\ (-1 2) /\ (-2 3): asserting 1 forces 2 then 3.
        let clauses = vec![Clause::from("1"), Clause::from("-1 2"), Clause::from("-2 3")];
        let db = ClauseDatabase::new(clauses);
        let mut state = State::new(3, db);
        let mut trail = Trail::new();
        trail.assert_unit(&mut state, Literal::from(1));

        let mut propagator = UnitPropagator::default();
        propagator.push(Literal::from(-1));
        let outcome = propagator.propagate(&mut state, &mut trail);

        assert_eq!(outcome, BcpOutcome::Unresolved);
        assert_eq!(state.current[2], Some(true));
        assert_eq!(state.current[3], Some(true));
    }

    #[test]
    fn conflict_at_level_zero_reports_unsatisfiable() {
        // (1) /\ (-1 2) /\ (-1 -2): asserting 1 forces 2, which then
        // conflicts with the third clause, all at level 0.
        let clauses = vec![
            Clause::from("1"),
            Clause::from("-1 2"),
            Clause::from("-1 -2"),
        ];
        let db = ClauseDatabase::new(clauses);
        let mut state = State::new(2, db);
        let mut trail = Trail::new();
        trail.assert_unit(&mut state, Literal::from(1));

        let mut propagator = UnitPropagator::default();
        propagator.push(Literal::from(-1));
        let outcome = propagator.propagate(&mut state, &mut trail);

        assert_eq!(outcome, BcpOutcome::Unsatisfiable);
    }

    #[test]
    fn conflict_above_level_zero_is_reported_and_stops_the_stack() {
        let clauses = vec![Clause::from("-1 2"), Clause::from("-1 -2")];
        let db = ClauseDatabase::new(clauses);
        let mut state = State::new(2, db);
        let mut trail = Trail::new();
        let mut propagator = UnitPropagator::default();

        trail.decide(&mut state, &mut propagator, Literal::from(1));
        let outcome = propagator.propagate(&mut state, &mut trail);

        assert!(matches!(outcome, BcpOutcome::Conflict(_)));
        assert_eq!(trail.decision_level, 1);
    }
}
