//! Per-variable assignment state plus the two structures addressed by the
//! same ids: the clause store and the watch index.

use std::collections::HashMap;

use crate::cnf::{ClauseId, Literal, VarId};
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::literal_watching::LiteralWatcher;
use crate::solver::statistics::Statistics;

#[derive(Debug, Clone)]
pub struct State {
    /// `current[v]`: unassigned, true, or false.
    pub current: Vec<Option<bool>>,
    /// `phase[v]`: the most recent non-unassigned value of `v`, kept across
    /// unassignment for phase-saving decisions.
    pub phase: Vec<Option<bool>>,
    pub level: Vec<Option<usize>>,
    pub antecedent: Vec<Option<ClauseId>>,
    pub num_vars: usize,
    pub clause_database: ClauseDatabase,
    pub watcher: LiteralWatcher,
    pub conflict_clause_id: Option<ClauseId>,
    pub stats: Statistics,
}

impl State {
    pub fn new(num_vars: usize, clause_database: ClauseDatabase) -> Self {
        let mut watcher = LiteralWatcher::new(num_vars);
        for id in clause_database.iter_ids() {
            watcher.add_clause(&clause_database[id], id);
        }
        let stats = Statistics::new(clause_database.len(), num_vars);
        State {
            current: vec![None; num_vars + 1],
            phase: vec![None; num_vars + 1],
            level: vec![None; num_vars + 1],
            antecedent: vec![None; num_vars + 1],
            num_vars,
            clause_database,
            watcher,
            conflict_clause_id: None,
            stats,
        }
    }

    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        lit.value(&self.current)
    }

    /// Assigns `var(lit)` to make `lit` true at `level`. Does not touch the
    /// trail or the watch index — callers decide whether/when this belongs
    /// on the trail (see `solver::trail::Trail`).
    pub fn assign(&mut self, lit: Literal, level: usize) {
        let var = lit.var();
        debug_assert!(
            self.current[var].is_none(),
            "variable {} assigned twice",
            var
        );
        self.current[var] = Some(lit.positive());
        self.phase[var] = Some(lit.positive());
        self.level[var] = Some(level);
        self.antecedent[var] = None;
        self.stats.num_assignments += 1;
    }

    pub fn set_antecedent(&mut self, var: VarId, clause_id: ClauseId) {
        self.antecedent[var] = Some(clause_id);
    }

    pub fn unassign(&mut self, var: VarId) {
        self.current[var] = None;
    }

    pub fn get_assignment(&self) -> HashMap<VarId, bool> {
        let mut result = HashMap::new();
        for (var, value) in self.current.iter().enumerate().skip(1) {
            if let Some(value) = value {
                result.insert(var, *value);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn assign_and_unassign_round_trips() {
        let mut state = State::new(3, ClauseDatabase::new(vec![Clause::from("1 2 3")]));
        state.assign(Literal::from(1), 1);
        assert_eq!(state.current[1], Some(true));
        assert_eq!(state.phase[1], Some(true));
        state.unassign(1);
        assert_eq!(state.current[1], None);
        assert_eq!(state.phase[1], Some(true), "phase survives unassignment");
    }

    #[test]
    fn literal_value_reflects_polarity() {
        let mut state = State::new(2, ClauseDatabase::new(vec![Clause::from("1 2")]));
        state.assign(Literal::from(-1), 0);
        assert_eq!(state.literal_value(Literal::from(1)), Some(false));
        assert_eq!(state.literal_value(Literal::from(-1)), Some(true));
        assert_eq!(state.literal_value(Literal::from(2)), None);
    }
}
