//! VSIDS branching with phase saving: activity-ranked variable selection
//! plus a saved polarity per variable. The only branching heuristic this
//! crate ships (see DESIGN.md for the rationale).

use ordered_float::NotNan;
use priority_queue::PriorityQueue;

use crate::cnf::{Literal, VarId};
use crate::solver::config::Config;

/// Activities are rescaled back under this bound whenever a bump would
/// otherwise push one towards infinity.
const RESCALE_THRESHOLD: f64 = 1e100;

#[derive(Debug, Clone)]
pub struct Vsids {
    order: PriorityQueue<VarId, NotNan<f64>>,
    activity: Vec<f64>,
    increment: f64,
    decay: f64,
    peak_activity: f64,
}

impl Vsids {
    pub fn new(num_vars: usize, config: &Config) -> Self {
        let order = (1..=num_vars)
            .map(|var| (var, NotNan::new(0.0).unwrap()))
            .collect();
        Vsids {
            order,
            activity: vec![0.0; num_vars + 1],
            increment: 1.0,
            decay: config.vsids_decay,
            peak_activity: 0.0,
        }
    }

    /// Highest activity any variable has reached so far; a diagnostic read
    /// once at solve end, never consulted during search.
    pub fn peak_activity(&self) -> f64 {
        self.peak_activity
    }

    /// Bumps every variable of `literals` by the current `increment` —
    /// called once per clause insertion, original or learned.
    pub fn bump_clause(&mut self, literals: &[Literal]) {
        for lit in literals {
            self.bump(lit.var());
        }
    }

    fn bump(&mut self, var: VarId) {
        self.activity[var] += self.increment;
        if self.activity[var] > RESCALE_THRESHOLD {
            self.rescale();
        }
        self.peak_activity = self.peak_activity.max(self.activity[var]);
        self.order
            .change_priority(&var, NotNan::new(self.activity[var]).unwrap());
    }

    /// Divides the global increment by the decay constant, inflating every
    /// subsequent bump relative to older ones. Called once per learned
    /// clause, before that clause's own literals are bumped.
    pub fn decay(&mut self) {
        self.increment /= self.decay;
    }

    fn rescale(&mut self) {
        for value in self.activity.iter_mut() {
            *value /= RESCALE_THRESHOLD;
        }
        self.increment /= RESCALE_THRESHOLD;

        let mut rescaled = PriorityQueue::new();
        for (var, _) in self.order.clone().into_iter() {
            rescaled.push(var, NotNan::new(self.activity[var]).unwrap());
        }
        self.order = rescaled;
    }

    /// Re-inserts `var` into the activity order. Called whenever a variable
    /// becomes unassigned (backtrack, restart) — the queue only ever holds
    /// variables known to be unassigned or not yet popped.
    pub fn requeue(&mut self, var: VarId) {
        self.order.push(var, NotNan::new(self.activity[var]).unwrap());
    }

    /// Pops activity-ranked variables until finding one that is unassigned.
    /// Stale (already-assigned) entries encountered along the way are
    /// discarded, not reinserted — they return via `requeue` if and when
    /// they become unassigned again. `None` means every variable is set.
    pub fn next_unassigned(&mut self, current: &[Option<bool>]) -> Option<VarId> {
        while let Some((var, _)) = self.order.pop() {
            if current[var].is_none() {
                return Some(var);
            }
        }
        None
    }

    /// The decision polarity for `var`: its saved phase. A variable with no
    /// saved phase yet, or whose saved phase is `false`, decides negative.
    pub fn phase(&self, phases: &[Option<bool>], var: VarId) -> bool {
        phases[var] == Some(true)
    }
}
