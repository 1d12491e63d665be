//! Example solving a puzzle with human-style techniques.
//!
//! Reads a puzzle in the 81-cell text format (digits `1-9`, empty cells as
//! `_`, `.`, or `0`, whitespace ignored), solves it with the selected
//! technique set, and prints the result with per-technique statistics.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_puzzle -- \
//!     "53__7____6__195____98____6_8___6___34__8_3__17___2___6_6____28____419__5____8__79"
//! ```
//!
//! Restrict the solver to the basic techniques:
//!
//! ```sh
//! cargo run --example solve_puzzle -- --solver basic "<puzzle>"
//! ```

use std::{process, str::FromStr as _};

use clap::{Parser, ValueEnum};
use sudokit_core::DigitGrid;
use sudokit_solver::{TechniqueGrid, TechniqueSolver, technique};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    All,
    Basic,
    Fundamental,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Technique set to solve with.
    #[arg(long, value_name = "KIND", default_value = "all")]
    solver: SolverKind,

    /// The puzzle text.
    puzzle: String,
}

fn main() {
    let args = Args::parse();

    let puzzle = match DigitGrid::from_str(&args.puzzle) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Invalid puzzle: {e}");
            process::exit(2);
        }
    };

    let solver = match args.solver {
        SolverKind::All => TechniqueSolver::with_all_techniques(),
        SolverKind::Basic => TechniqueSolver::new(technique::basic_techniques()),
        SolverKind::Fundamental => TechniqueSolver::new(technique::fundamental_techniques()),
    };

    let mut grid = TechniqueGrid::from_digit_grid(&puzzle);
    let (solved, stats) = match solver.solve(&mut grid) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Solving failed: {e}");
            process::exit(1);
        }
    };

    println!("Puzzle ({} clues):", puzzle.filled_count());
    println!("{puzzle}");
    println!();
    if solved {
        println!("Solved:");
    } else {
        println!("Stuck after {} steps:", stats.total_steps());
    }
    println!("{}", grid.to_digit_grid());
    println!();
    println!("Techniques:");
    for (technique, count) in solver.techniques().iter().zip(stats.applications()) {
        if *count > 0 {
            println!("  {}: {count}", technique.name());
        }
    }
    println!("  total: {}", stats.total_steps());

    if !solved {
        process::exit(1);
    }
}
