//! Error type for the DIMACS I/O layer. The core search engine never
//! returns an error: a level-0 conflict is the verdict `UNSATISFIABLE`, and
//! anything else wrong inside the solver is an invariant violation, which
//! this crate treats as a bug (`assert!`/`panic!`), not a recoverable
//! condition. Only malformed input gets a typed error.

use std::fmt::{self, Display, Formatter};
use std::io;

#[derive(Debug)]
pub enum DimacsError {
    Io(io::Error),
    MissingHeader,
    BadHeader(String),
    BadLiteral(String),
    ClauseCountMismatch { expected: usize, actual: usize },
    VarCountMismatch { expected: usize, actual: usize },
    UnterminatedClause,
}

impl Display for DimacsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DimacsError::Io(err) => write!(f, "could not read input: {}", err),
            DimacsError::MissingHeader => write!(f, "missing DIMACS header line (p cnf V C)"),
            DimacsError::BadHeader(line) => write!(f, "invalid DIMACS header: {:?}", line),
            DimacsError::BadLiteral(token) => write!(f, "invalid literal: {:?}", token),
            DimacsError::ClauseCountMismatch { expected, actual } => write!(
                f,
                "header declares {} clauses, found {}",
                expected, actual
            ),
            DimacsError::VarCountMismatch { expected, actual } => write!(
                f,
                "header declares {} variables, highest referenced is {}",
                expected, actual
            ),
            DimacsError::UnterminatedClause => {
                write!(f, "last clause does not end with a 0 terminator")
            }
        }
    }
}

impl std::error::Error for DimacsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DimacsError {
    fn from(err: io::Error) -> Self {
        DimacsError::Io(err)
    }
}
