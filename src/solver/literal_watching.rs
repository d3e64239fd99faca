//! The watch index: for each literal id, the clauses currently watching
//! that literal. Indexed directly by `Literal::id()` — a `Vec<Vec<ClauseId>>`,
//! not a hash map, since a literal id is already a small dense integer.

use crate::cnf::{Clause, ClauseId, Literal};

#[derive(Debug, Clone, PartialEq)]
pub enum WatchUpdate {
    FoundNewWatch,
    Satisfied,
    Unit(Literal),
    Conflict,
}

#[derive(Debug, Clone)]
pub struct LiteralWatcher {
    lists: Vec<Vec<ClauseId>>,
}

impl LiteralWatcher {
    pub fn new(num_vars: usize) -> Self {
        LiteralWatcher {
            // literal ids run 1..=2*num_vars; index 0 (Literal::NONE) unused.
            lists: vec![Vec::new(); 2 * num_vars + 1],
        }
    }

    pub fn add_clause(&mut self, clause: &Clause, clause_id: ClauseId) {
        if clause.literals.len() < 2 {
            return; // unit and empty clauses carry no watcher machinery
        }
        for lit in clause.watched_literals() {
            self.add_watch(lit, clause_id);
        }
    }

    pub fn add_watch(&mut self, lit: Literal, clause_id: ClauseId) {
        self.lists[lit.id()].push(clause_id);
    }

    /// Takes L's watch list out, leaving an empty `Vec` in its place. The
    /// caller rebuilds the surviving sublist and installs it back with
    /// [`LiteralWatcher::add_watch`] calls (clauses that move to a
    /// different literal's list are appended directly to that list).
    pub fn take_watch_list(&mut self, lit: Literal) -> Vec<ClauseId> {
        std::mem::take(&mut self.lists[lit.id()])
    }

    pub fn watch_list(&self, lit: Literal) -> &[ClauseId] {
        &self.lists[lit.id()]
    }

    /// Installs `list` as L's watch list, completing the take/rebuild/install
    /// cycle started by [`LiteralWatcher::take_watch_list`].
    pub fn install_watch_list(&mut self, lit: Literal, list: Vec<ClauseId>) {
        self.lists[lit.id()] = list;
    }

    /// Re-examines `clause` after `false_lit` (one of its two watchers) has
    /// just become false. Mutates `clause.watches` in place; the caller is
    /// responsible for installing the clause onto whichever watch list the
    /// result implies (see [`WatchUpdate`]).
    pub fn update_clause(
        clause: &mut Clause,
        false_lit: Literal,
        vars: &[Option<bool>],
    ) -> WatchUpdate {
        let mut watched = clause.watched_literals();
        if watched[0] != false_lit {
            clause.watches.swap(0, 1);
            watched.swap(0, 1);
        }
        debug_assert_eq!(watched[0], false_lit);
        debug_assert!(false_lit.is_false(vars));

        let other = watched[1];
        if other.is_true(vars) {
            return WatchUpdate::Satisfied;
        }

        for i in 0..clause.literals.len() {
            if i == clause.watches[1] {
                continue;
            }
            if clause.literals[i].non_false(vars) {
                clause.watches[0] = i;
                return WatchUpdate::FoundNewWatch;
            }
        }

        if other.is_false(vars) {
            WatchUpdate::Conflict
        } else {
            WatchUpdate::Unit(other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_new_watch() {
        let mut clause = Clause::from("1 2 3");
        let mut vars = vec![None; 4];
        vars[1] = Some(false);
        let update = LiteralWatcher::update_clause(&mut clause, Literal::from(1), &vars);
        assert_eq!(update, WatchUpdate::FoundNewWatch);
        assert!(clause.watches.contains(&2));
    }

    #[test]
    fn detects_unit() {
        let mut clause = Clause::from("1 2 3");
        let mut vars = vec![None; 4];
        vars[1] = Some(false);
        vars[2] = Some(false);
        // first call moves watch 0 off literal 1 onto literal 3
        LiteralWatcher::update_clause(&mut clause, Literal::from(1), &vars);
        let update = LiteralWatcher::update_clause(&mut clause, Literal::from(2), &vars);
        assert_eq!(update, WatchUpdate::Unit(Literal::from(3)));
    }

    #[test]
    fn detects_conflict() {
        let mut clause = Clause::from("1 2");
        let mut vars = vec![None; 3];
        vars[1] = Some(false);
        vars[2] = Some(false);
        let update = LiteralWatcher::update_clause(&mut clause, Literal::from(1), &vars);
        assert_eq!(update, WatchUpdate::Conflict);
    }

    #[test]
    fn detects_satisfied_via_blocking_literal() {
        let mut clause = Clause::from("1 2");
        let mut vars = vec![None; 3];
        vars[2] = Some(true);
        vars[1] = Some(false);
        let update = LiteralWatcher::update_clause(&mut clause, Literal::from(1), &vars);
        assert_eq!(update, WatchUpdate::Satisfied);
    }

    #[test]
    fn add_clause_skips_units() {
        let mut watcher = LiteralWatcher::new(2);
        watcher.add_clause(&Clause::from("1"), 0);
        assert!(watcher.watch_list(Literal::from(1)).is_empty());
    }

    #[test]
    fn add_clause_skips_empty_clauses_without_indexing_panic() {
        let mut watcher = LiteralWatcher::new(2);
        watcher.add_clause(&Clause::new(Vec::new()), 0);
        assert!(watcher.watch_list(Literal::from(1)).is_empty());
    }
}
