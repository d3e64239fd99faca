//! DIMACS-CNF reading and writing. This is the ambient I/O layer around the
//! core search engine: it never touches the trail, the watch index, or the
//! heuristic, and the core never parses a file directly.

use flate2::read::GzDecoder;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::io::Read;

use crate::cnf::{Clause, Literal, VarId};
use crate::error::DimacsError;

pub struct DimacsFile {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

/// `seed` drives the initial watcher placement for each multi-literal
/// clause. Any pair of distinct positions is a legal starting watch, so
/// the exact choice never affects correctness. The core itself never
/// consults the seed again once a clause is built.
pub fn clauses_from_dimacs_file(path: &str, seed: u64) -> Result<DimacsFile, DimacsError> {
    let raw = if path.ends_with(".gz") {
        let file = std::fs::File::open(path)?;
        let mut decoder = GzDecoder::new(file);
        let mut contents = String::new();
        decoder.read_to_string(&mut contents)?;
        contents
    } else if path == "-" {
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents)?;
        contents
    } else {
        std::fs::read_to_string(path)?
    };
    clauses_from_dimacs(&raw, seed)
}

pub fn clauses_from_dimacs(input: &str, seed: u64) -> Result<DimacsFile, DimacsError> {
    let file_content: Vec<&str> = input
        .lines()
        .filter(|line| !line.starts_with('c'))
        .filter(|line| !line.starts_with('%'))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let header_line = *file_content.first().ok_or(DimacsError::MissingHeader)?;
    let header: Vec<&str> = header_line.split_whitespace().collect();
    if header.len() != 4 || header[0] != "p" || header[1] != "cnf" {
        return Err(DimacsError::BadHeader(header_line.to_string()));
    }
    let num_vars: usize = header[2]
        .parse()
        .map_err(|_| DimacsError::BadHeader(header_line.to_string()))?;
    let num_clauses: usize = header[3]
        .parse()
        .map_err(|_| DimacsError::BadHeader(header_line.to_string()))?;

    let body = file_content
        .iter()
        .filter(|line| !line.starts_with('p'))
        .join(" ");

    let literals: Vec<Literal> = body
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i32>()
                .map(Literal::from_dimacs)
                .map_err(|_| DimacsError::BadLiteral(tok.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if !literals.is_empty() && literals.last() != Some(&Literal::NONE) {
        return Err(DimacsError::UnterminatedClause);
    }

    // split() on a trailing `0` terminator yields a trailing empty slice.
    let mut clauses: Vec<Vec<Literal>> = literals
        .split(|lit| *lit == Literal::NONE)
        .map(|clause| clause.to_vec())
        .collect();
    clauses.pop();

    if clauses.len() != num_clauses {
        return Err(DimacsError::ClauseCountMismatch {
            expected: num_clauses,
            actual: clauses.len(),
        });
    }

    for clause in clauses.iter_mut() {
        clause.sort();
        clause.dedup();
    }

    let max_var = clauses
        .iter()
        .flat_map(|clause| clause.iter().map(Literal::var))
        .max()
        .unwrap_or(0);
    if max_var > num_vars {
        return Err(DimacsError::VarCountMismatch {
            expected: num_vars,
            actual: max_var,
        });
    }

    // Tautological clauses are always satisfied; drop them rather than
    // carry dead weight through the watch index.
    let mut rng = StdRng::seed_from_u64(seed);
    let clauses = clauses
        .into_iter()
        .map(Clause::from)
        .filter(|clause| !clause.is_tautology())
        .map(|clause| place_initial_watchers(clause, &mut rng))
        .collect_vec();
    Ok(DimacsFile { clauses, num_vars })
}

/// Picks the initial pair of watcher positions for a multi-literal clause.
/// Unit clauses never reach here (they are split out before the watch
/// index is ever consulted, see `ClauseDatabase::new`); `Clause::new`
/// already defaults those to `[0, 0]`.
fn place_initial_watchers(mut clause: Clause, rng: &mut StdRng) -> Clause {
    if clause.literals.len() >= 2 {
        let first = rng.gen_range(0..clause.literals.len());
        let mut second = rng.gen_range(0..clause.literals.len() - 1);
        if second >= first {
            second += 1;
        }
        clause.watches = [first, second];
    }
    clause
}

/// Renders a solve result as DIMACS `s`/`v` lines, e.g.
/// `s SATISFIABLE\nv 1 -2 3 0`.
pub fn solution_to_dimacs(solution: &Option<HashMap<VarId, bool>>) -> String {
    let Some(assignment) = solution else {
        return "s UNSATISFIABLE".to_string();
    };

    let mut out = String::from("s SATISFIABLE\nv ");
    for (var_id, value) in assignment.iter().sorted_by_key(|(id, _)| **id) {
        out.push_str(&format!("{}{} ", if *value { "" } else { "-" }, var_id));
    }
    out.push('0');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_cnf() {
        let input = "c a comment\np cnf 3 2\n1 2 0\n-1 3 0\n";
        let dimacs = clauses_from_dimacs(input, 0).unwrap();
        assert_eq!(dimacs.num_vars, 3);
        assert_eq!(dimacs.clauses.len(), 2);
    }

    #[test]
    fn rejects_missing_terminator() {
        let input = "p cnf 1 1\n1\n";
        assert!(matches!(
            clauses_from_dimacs(input, 0),
            Err(DimacsError::UnterminatedClause)
        ));
    }

    #[test]
    fn rejects_clause_count_mismatch() {
        let input = "p cnf 1 2\n1 0\n";
        assert!(matches!(
            clauses_from_dimacs(input, 0),
            Err(DimacsError::ClauseCountMismatch { .. })
        ));
    }

    #[test]
    fn dedups_literals_within_a_clause() {
        let input = "p cnf 2 1\n1 2 1 0\n";
        let dimacs = clauses_from_dimacs(input, 0).unwrap();
        assert_eq!(dimacs.clauses[0].literals.len(), 2);
    }

    #[test]
    fn writer_round_trips_unsat() {
        assert_eq!(solution_to_dimacs(&None), "s UNSATISFIABLE");
    }

    #[test]
    fn drops_tautological_clauses() {
        let input = "p cnf 2 2\n1 -1 2 0\n1 2 0\n";
        let dimacs = clauses_from_dimacs(input, 0).unwrap();
        assert_eq!(dimacs.clauses.len(), 1);
    }

    #[test]
    fn seeded_watcher_placement_is_reproducible_and_distinct() {
        let input = "p cnf 5 1\n1 2 3 4 5 0\n";
        let a = clauses_from_dimacs(input, 42).unwrap();
        let b = clauses_from_dimacs(input, 42).unwrap();
        assert_eq!(a.clauses[0].watches, b.clauses[0].watches);
        assert_ne!(a.clauses[0].watches[0], a.clauses[0].watches[1]);
    }

    #[test]
    fn writer_round_trips_sat() {
        let mut assignment = HashMap::new();
        assignment.insert(1, true);
        assignment.insert(2, false);
        let out = solution_to_dimacs(&Some(assignment));
        assert!(out.starts_with("s SATISFIABLE\nv"));
        assert!(out.contains('1'));
        assert!(out.contains("-2"));
    }
}
