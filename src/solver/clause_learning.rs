//! First-UIP conflict analysis: walks the implication graph backward from
//! the conflicting clause, resolving on forced literals at the current
//! decision level until exactly one remains — the UIP.

use std::collections::HashSet;

use crate::cnf::{Clause, ClauseId, Literal};
use crate::solver::state::State;
use crate::solver::trail::Trail;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClauseLearner;

impl ClauseLearner {
    /// Resolves the conflicting clause back to its first UIP, returning the
    /// learned clause (with watcher positions already assigned) and the
    /// level to backjump to. No conflict-clause minimization — the corpus's
    /// Minisat-style pass never shipped past a commented-out draft, and a
    /// plain first-UIP clause is already a correct, if larger, learned
    /// clause.
    pub fn analyze_conflict(
        &self,
        state: &State,
        trail: &Trail,
        conflict_clause_id: ClauseId,
    ) -> (Clause, usize) {
        let mut seen = vec![false; state.num_vars + 1];
        let mut learned: Vec<Literal> = Vec::new();
        let mut backtrack_level = 0usize;
        let mut to_resolve = 0usize;
        let mut trail_cursor = trail.literals.len() - 1;
        let mut current_reason_clause_id = conflict_clause_id;
        let mut pivot: Option<Literal> = None;

        loop {
            let reason_clause = &state.clause_database[current_reason_clause_id];
            for &lit in reason_clause.literals.iter() {
                if let Some(p) = pivot {
                    if lit.var() == p.var() {
                        continue; // the literal just resolved away
                    }
                }
                let var = lit.var();
                if seen[var] {
                    continue;
                }
                let level = state.level[var].expect("conflict clause literal is unassigned");
                if level == 0 {
                    continue; // permanent level-0 facts never belong in a learned clause
                }
                seen[var] = true;
                if level == trail.decision_level {
                    to_resolve += 1;
                } else {
                    backtrack_level = backtrack_level.max(level);
                    learned.push(lit);
                }
            }

            while !seen[trail.literals[trail_cursor].var()] {
                trail_cursor -= 1;
            }
            let next = trail.literals[trail_cursor];
            pivot = Some(next);
            seen[next.var()] = false;
            to_resolve -= 1;
            if to_resolve == 0 {
                break;
            }

            current_reason_clause_id = state.antecedent[next.var()]
                .expect("non-UIP trail literal must have a forcing antecedent");
        }

        let uip = pivot
            .expect("conflict analysis resolves at least one pivot")
            .negate();
        let watch_pos = learned
            .iter()
            .position(|lit| state.level[lit.var()] == Some(backtrack_level))
            .unwrap_or(0);
        learned.push(uip);

        let watches = if learned.len() >= 2 {
            [watch_pos, learned.len() - 1]
        } else {
            [0, 0]
        };

        let lbd = learned
            .iter()
            .map(|lit| state.level[lit.var()].unwrap_or(0))
            .collect::<HashSet<_>>()
            .len();

        (Clause::learned(learned, lbd, watches), backtrack_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::clause_database::ClauseDatabase;
    use crate::solver::unit_propagation::UnitPropagator;

    #[test]
    fn resolves_to_a_single_current_level_literal() {
        let cnf = vec![
            Clause::from("1 2"),      // 0
            Clause::from("2 3"),      // 1
            Clause::from("-1 -4 5"),  // 2
            Clause::from("-1 4 6"),   // 3
            Clause::from("-1 -5 6"),  // 4
            Clause::from("-1 4 -6"),  // 5
            Clause::from("-1 -5 -6"), // 6
        ];
        let mut state = State::new(6, ClauseDatabase::new(cnf));
        let mut trail = Trail::new();
        let mut unit_propagator = UnitPropagator::default();

        for decision in [1, 2, 3, 4] {
            trail.decide(&mut state, &mut unit_propagator, Literal::from(decision));
            unit_propagator.propagate(&mut state, &mut trail);
        }

        let conflict_clause_id = state
            .conflict_clause_id
            .expect("deciding 1,2,3,4 should force a conflict via clauses 2, 4, 6");

        let learner = ClauseLearner;
        let (learned, backtrack_level) = learner.analyze_conflict(&state, &trail, conflict_clause_id);

        let current_level_literals = learned
            .literals
            .iter()
            .filter(|lit| state.level[lit.var()] == Some(trail.decision_level))
            .count();
        assert_eq!(current_level_literals, 1, "exactly one UIP per learned clause");
        assert!(backtrack_level < trail.decision_level);
    }
}
