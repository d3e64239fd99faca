use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use utopia::cnf::SolutionAssignment;
use utopia::dimacs::{clauses_from_dimacs_file, solution_to_dimacs};
use utopia::solver::config::Config;
use utopia::solver::progress::Progress;
use utopia::solver::Solver;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a DIMACS CNF file. A trailing `.gz` is decompressed
    /// transparently; `-` reads from stdin.
    #[arg(index = 1)]
    file: String,

    /// Where to write the satisfying assignment, one signed integer per
    /// variable. Only written when the instance is SATISFIABLE.
    #[arg(short, long)]
    out: Option<String>,

    /// Print the end-of-run statistics table.
    #[arg(long)]
    stats: bool,

    /// Print a periodic progress line while solving.
    #[arg(long)]
    progress: bool,

    /// Seed forwarded to the DIMACS reader's watcher-placement PRNG. The
    /// core never re-derives watcher positions once a clause is built, so
    /// this only affects which two literals each clause starts out
    /// watching; the same seed always produces the same placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let dimacs = match clauses_from_dimacs_file(&args.file, args.seed) {
        Ok(dimacs) => dimacs,
        Err(err) => {
            eprintln!("c error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("c {}", BANNER.replace('\n', "\nc "));
    println!("c solving {}", args.file);

    let config = Config::new(args.seed);
    let mut solver = Solver::new(dimacs.clauses, dimacs.num_vars, config);

    let mut progress = args.progress.then(Progress::new);
    let solution = solver.solve(progress.as_mut());
    if let Some(progress) = &progress {
        progress.close_table();
    }

    println!("{}", solution_to_dimacs(&solution));

    let mut exit_code = ExitCode::SUCCESS;
    if let Some(assignment) = &solution {
        exit_code = verify_and_report(&solver, assignment);
        if let Some(out) = &args.out {
            if let Err(err) = write_assignment(out, assignment, dimacs.num_vars) {
                eprintln!("c error: could not write assignment to {}: {}", out, err);
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    if args.stats {
        println!("{}", solver.stats().to_table());
    }

    exit_code
}

fn verify_and_report(solver: &Solver, assignment: &SolutionAssignment) -> ExitCode {
    let violated = solver.count_violated_clauses(assignment);
    if violated == 0 {
        println!("{}", "c solution verified: 0 violated clauses".green());
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            format!("c WRONG SOLUTION: {} clauses violated", violated).red()
        );
        ExitCode::FAILURE
    }
}

fn write_assignment(
    path: &str,
    assignment: &SolutionAssignment,
    num_vars: usize,
) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for var in 1..=num_vars {
        let value = assignment.get(&var).copied().unwrap_or(true);
        writeln!(file, "{}{}", if value { "" } else { "-" }, var)?;
    }
    Ok(())
}

const BANNER: &str = r#"
          _
    _   _| |_ ___  _ __  _  __ _
   | | | | __/ _ \| '_ \| |/ _` |
   | |_| | || (_) | |_) | | (_| |
    \__,_|\__\___/| .__/|_|\__,_|
                  |_|
"#;
