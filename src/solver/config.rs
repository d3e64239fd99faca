//! Every tunable solving constant, gathered into one record
//! passed to [`crate::solver::Solver::new`] rather than scattered as
//! free-standing `const`s.

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// VSIDS decay factor. `increment` is divided by this on every learned
    /// clause, so older bumps shrink relative to newer ones.
    pub vsids_decay: f64,
    /// Geometric restart threshold multiplier `M`.
    pub restart_multiplier: f64,
    /// Lower bound the restart threshold `T` resets to once it exceeds `U`.
    pub restart_lower_bound: usize,
    /// Starting value, and reset floor's partner, for the restart
    /// threshold's upper bound `U`.
    pub restart_upper_base: usize,
    /// Seed forwarded to the DIMACS reader's watcher-placement PRNG. The
    /// core itself never re-derives watcher positions once a clause is
    /// built; this only matters for callers that want to exercise
    /// non-default placements in tests.
    pub seed: u64,
}

impl Config {
    pub fn new(seed: u64) -> Self {
        Config {
            seed,
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vsids_decay: 0.95,
            restart_multiplier: 1.1,
            restart_lower_bound: 100,
            restart_upper_base: 1000,
            seed: 0,
        }
    }
}
