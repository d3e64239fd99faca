mod clause_database;
mod clause_learning;
pub mod config;
pub mod heuristic;
mod literal_watching;
pub mod progress;
pub mod restarts;
pub mod state;
pub mod statistics;
pub mod trail;
mod unit_propagation;

use std::collections::HashSet;

use crate::cnf::{Clause, Literal, Solution, SolutionAssignment, VarId};
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::clause_learning::ClauseLearner;
use crate::solver::config::Config;
use crate::solver::heuristic::Vsids;
use crate::solver::progress::Progress;
use crate::solver::restarts::Restarter;
use crate::solver::state::State;
use crate::solver::statistics::Statistics;
use crate::solver::trail::Trail;
use crate::solver::unit_propagation::{BcpOutcome, UnitPropagator};

pub struct Solver {
    config: Config,
    state: State,
    clause_learner: ClauseLearner,
}

impl Solver {
    pub fn new(clauses: Vec<Clause>, num_vars: usize, config: Config) -> Self {
        Solver {
            state: State::new(num_vars, ClauseDatabase::new(clauses)),
            clause_learner: ClauseLearner,
            config,
        }
    }

    /// `progress`, when set, gets a periodic tick (at most once per
    /// [`crate::solver::progress::Progress`]'s print interval) after every
    /// decision and every conflict — ambient, off by default unless the
    /// caller asks for it (the CLI's `--progress` flag).
    pub fn solve(&mut self, mut progress: Option<&mut Progress>) -> Solution {
        self.state.stats.start_timing();

        if self.is_trivially_unsat() {
            self.state.stats.stop_timing();
            return None;
        }

        let mut heuristic = Vsids::new(self.state.num_vars, &self.config);
        for clause in self.state.clause_database.original_and_learned() {
            heuristic.bump_clause(&clause.literals);
        }
        for lit in self.state.clause_database.unary_clauses.clone() {
            heuristic.bump_clause(&[lit]);
        }

        let mut restarter = Restarter::new(&self.config);
        let mut unit_propagator = UnitPropagator::default();
        let mut trail = Trail::new();

        self.enqueue_initial_units(&mut trail, &mut unit_propagator);

        loop {
            match unit_propagator.propagate(&mut self.state, &mut trail) {
                BcpOutcome::Unsatisfiable => {
                    self.finish(&heuristic);
                    return None;
                }
                BcpOutcome::Conflict(conflict_clause_id) => {
                    let (learned, backtrack_level) = self.clause_learner.analyze_conflict(
                        &self.state,
                        &trail,
                        conflict_clause_id,
                    );
                    heuristic.decay();
                    let uip = *learned
                        .literals
                        .last()
                        .expect("a learned clause always carries its UIP literal");

                    let learned_id = self.state.clause_database.add_learned(
                        learned,
                        &mut self.state.watcher,
                        &mut heuristic,
                    );
                    self.state.stats.num_backtracks += 1;

                    if restarter
                        .should_restart(backtrack_level, self.state.clause_database.num_learned)
                    {
                        trail.restart(&mut self.state, &mut heuristic, &mut unit_propagator);
                        restarter.restart();
                        self.state.stats.num_restarts = restarter.num_restarts();
                    } else {
                        trail.backjump(
                            &mut self.state,
                            &mut heuristic,
                            &mut unit_propagator,
                            backtrack_level,
                        );
                        trail.assert_uip(&mut self.state, uip, backtrack_level, learned_id);
                        unit_propagator.push(uip.negate());
                    }
                    self.tick_progress(&mut progress);
                }
                BcpOutcome::Unresolved => match heuristic.next_unassigned(&self.state.current) {
                    None => {
                        self.finish(&heuristic);
                        return Some(self.get_solution());
                    }
                    Some(var) => {
                        let phase = heuristic.phase(&self.state.phase, var);
                        let lit = Literal::from_value(var, phase);
                        trail.decide(&mut self.state, &mut unit_propagator, lit);
                        restarter.note_new_level(
                            trail.decision_level,
                            self.state.clause_database.num_learned,
                        );
                        self.tick_progress(&mut progress);
                    }
                },
            }
        }
    }

    /// Catches the two conflicts BCP can never even start to resolve: an
    /// empty clause, or a variable asserted both true and false by separate
    /// unit clauses.
    fn is_trivially_unsat(&self) -> bool {
        if self.state.clause_database.has_empty_clause {
            return true;
        }

        let units = &self.state.clause_database.unary_clauses;
        let positives: HashSet<VarId> = units.iter().filter(|lit| lit.positive()).map(Literal::var).collect();
        let negatives: HashSet<VarId> = units.iter().filter(|lit| lit.negative()).map(Literal::var).collect();
        positives.intersection(&negatives).next().is_some()
    }

    fn enqueue_initial_units(&mut self, trail: &mut Trail, unit_propagator: &mut UnitPropagator) {
        for lit in self.state.clause_database.unary_clauses.clone() {
            if self.state.current[lit.var()].is_some() {
                continue; // duplicate unit clause for the same literal
            }
            trail.assert_unit(&mut self.state, lit);
            unit_propagator.push(lit.negate());
        }
    }

    /// Snapshots the diagnostics that only make sense once search has
    /// stopped (learned-clause count, peak VSIDS activity) and stops the
    /// clock.
    fn finish(&mut self, heuristic: &Vsids) {
        self.state.stats.num_learned = self.state.clause_database.num_learned;
        self.state.stats.peak_activity = heuristic.peak_activity();
        self.state.stats.stop_timing();
    }

    fn tick_progress(&self, progress: &mut Option<&mut Progress>) {
        if let Some(progress) = progress {
            let current_num_assignments = self.state.current.iter().skip(1).filter(|v| v.is_some()).count();
            let current_num_clauses = self.state.clause_database.len();
            progress.print_progress_if_necessary(
                &self.state.stats,
                current_num_assignments,
                current_num_clauses,
            );
        }
    }

    fn get_solution(&self) -> SolutionAssignment {
        let mut assignment = self.state.get_assignment();
        for var in 1..=self.state.num_vars {
            assignment.entry(var).or_insert(true);
        }
        assignment
    }

    pub fn stats(&self) -> &Statistics {
        &self.state.stats
    }

    /// Counts clauses violated by `assignment`: every watched clause
    /// (original and learned alike — they share one store, see
    /// `ClauseDatabase::original_and_learned`) plus every unit clause,
    /// which carries no watcher machinery and is checked separately. Used
    /// to double-check a claimed model before it is trusted.
    pub fn count_violated_clauses(&self, assignment: &SolutionAssignment) -> usize {
        let watched = crate::cnf::count_violated_clauses(
            self.state.clause_database.original_and_learned(),
            assignment,
        );
        let unary = self
            .state
            .clause_database
            .unary_clauses
            .iter()
            .filter(|lit| {
                assignment
                    .get(&lit.var())
                    .map(|value| *value != lit.positive())
                    .unwrap_or(true)
            })
            .count();
        watched + unary
    }
}
