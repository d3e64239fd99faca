//! Running counters plus a render-to-table step, kept separate from the
//! `--progress` ticker so a non-interactive run can still print a summary
//! at the end.

use prettytable::{row, Table};

#[derive(Debug, Clone)]
pub struct Statistics {
    pub num_clauses: usize,
    pub num_vars: usize,
    pub num_backtracks: usize,
    pub num_restarts: usize,
    pub num_conflicts: usize,
    pub num_decisions: usize,
    pub num_propagations: usize,
    pub num_assignments: usize,
    /// Learned-clause count at solve end (mirrors
    /// `ClauseDatabase::num_learned`, snapshotted once solving stops).
    pub num_learned: usize,
    /// Highest VSIDS activity any variable reached, snapshotted once
    /// solving stops (diagnostic only; nothing reads it back during search).
    pub peak_activity: f64,
    pub start_time: std::time::Instant,
    pub time: std::time::Duration,
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            num_clauses: 0,
            num_vars: 0,
            num_backtracks: 0,
            num_restarts: 0,
            num_conflicts: 0,
            num_decisions: 0,
            num_propagations: 0,
            num_assignments: 0,
            num_learned: 0,
            peak_activity: 0.0,
            start_time: std::time::Instant::now(),
            time: std::time::Duration::from_secs(0),
        }
    }
}

impl Statistics {
    pub fn new(num_clauses: usize, num_vars: usize) -> Self {
        Statistics {
            num_clauses,
            num_vars,
            ..Default::default()
        }
    }

    pub fn stop_timing(&mut self) {
        self.time = self.start_time.elapsed();
    }

    pub fn start_timing(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*prettytable::format::consts::FORMAT_NO_COLSEP);
        table.set_titles(row![b -> "Solver Statistics", "Value"]);
        if self.num_clauses == 0 {
            table.add_row(row!["No Data - Trivially Resolved"]);
            return table;
        }
        table.add_row(row![
            "Size",
            format!("{} clauses, {} vars", self.num_clauses, self.num_vars)
        ]);

        table.add_row(row!["Assignments", self.num_assignments]);
        table.add_row(row!["Decisions", self.num_decisions]);
        table.add_row(row!["Implications", self.num_assignments.saturating_sub(self.num_decisions)]);
        table.add_row(row!["Conflicts", self.num_conflicts]);
        table.add_row(row![
            "Correct Decisions",
            if self.num_decisions as i64 - self.num_backtracks as i64 > 0 {
                self.num_decisions - self.num_backtracks
            } else {
                0
            }
        ]);
        table.add_row(row!["Propagations", self.num_propagations]);
        table.add_row(row!["Learned Clauses", self.num_learned]);
        table.add_row(row!["Restarts", self.num_restarts]);
        table.add_row(row!["Peak Activity", format!("{:.3}", self.peak_activity)]);
        table.add_row(row![
            "Time (approx.)",
            format!("{:.3}s", self.time.as_secs_f32())
        ]);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_problem_reports_no_data() {
        let stats = Statistics::new(0, 0);
        let table = stats.to_table();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn populated_problem_reports_every_counter() {
        let mut stats = Statistics::new(5, 3);
        stats.num_conflicts = 2;
        stats.num_restarts = 1;
        let table = stats.to_table();
        assert!(table.len() > 1);
    }
}
