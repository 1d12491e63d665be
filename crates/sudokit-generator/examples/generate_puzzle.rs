//! Example demonstrating Sudoku puzzle generation.
//!
//! Generates a puzzle, prints it together with its solution and seed, and
//! reports which techniques the solver needed. Optionally samples many
//! puzzles in parallel and keeps the one that maximizes the use of the
//! requested techniques.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Require specific techniques (case-insensitive, repeatable) and pick the
//! best puzzle within a sampling budget:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --technique "X-Wing" --max-tries 5000
//! ```
//!
//! Select the solver technique set:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --solver basic
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use sudokit_generator::{GeneratedPuzzle, PuzzleGenerator};
use sudokit_solver::{TechniqueGrid, TechniqueSolver, TechniqueSolverStats, technique};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverKind {
    All,
    Basic,
    Fundamental,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Solver technique set to use for generation and scoring.
    #[arg(long, value_name = "KIND", default_value = "all")]
    solver: SolverKind,

    /// Technique name to require in stats (case-insensitive). Repeatable.
    #[arg(short, long = "technique", value_name = "TECHNIQUE")]
    techniques: Vec<String>,

    /// Maximum puzzles to sample when filtering.
    #[arg(long, value_name = "COUNT", default_value_t = 1_000)]
    max_tries: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let solver = build_solver(args.solver);
    let generator = PuzzleGenerator::new(&solver);

    for name in &args.techniques {
        if !solver
            .techniques()
            .iter()
            .any(|t| t.name().eq_ignore_ascii_case(name))
        {
            eprintln!("Unknown technique: {name}");
            eprintln!("Available techniques:");
            for technique in solver.techniques() {
                eprintln!("  {}", technique.name());
            }
            process::exit(2);
        }
    }

    if args.techniques.is_empty() {
        let puzzle = generator.generate().unwrap();
        let stats = solve_stats(&solver, &puzzle);
        print_puzzle(&puzzle, &solver, &stats);
        return;
    }

    if args.max_tries == 0 {
        eprintln!("--max-tries must be at least 1.");
        process::exit(1);
    }

    let best = (0..args.max_tries)
        .into_par_iter()
        .map(|_| {
            let puzzle = generator.generate().unwrap();
            let stats = solve_stats(&solver, &puzzle);
            let score = techniques_score(&solver, &stats, &args.techniques);
            (puzzle, stats, score)
        })
        .max_by_key(|(_, _, score)| *score);

    let Some((puzzle, stats, score)) = best else {
        unreachable!("max_tries is at least 1");
    };
    println!("Best score {score} over {} tries", args.max_tries);
    println!();
    print_puzzle(&puzzle, &solver, &stats);
}

fn build_solver(kind: SolverKind) -> TechniqueSolver {
    match kind {
        SolverKind::All => TechniqueSolver::with_all_techniques(),
        SolverKind::Basic => TechniqueSolver::new(technique::basic_techniques()),
        SolverKind::Fundamental => TechniqueSolver::new(technique::fundamental_techniques()),
    }
}

fn solve_stats(solver: &TechniqueSolver, puzzle: &GeneratedPuzzle) -> TechniqueSolverStats {
    let mut grid = TechniqueGrid::from_digit_grid(&puzzle.problem);
    let (solved, stats) = solver.solve(&mut grid).unwrap();
    assert!(solved);
    stats
}

fn techniques_score(
    solver: &TechniqueSolver,
    stats: &TechniqueSolverStats,
    names: &[String],
) -> usize {
    solver
        .techniques()
        .iter()
        .zip(stats.applications())
        .filter(|(technique, _)| {
            names
                .iter()
                .any(|name| technique.name().eq_ignore_ascii_case(name))
        })
        .map(|(_, count)| count)
        .sum()
}

fn print_puzzle(puzzle: &GeneratedPuzzle, solver: &TechniqueSolver, stats: &TechniqueSolverStats) {
    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();
    println!("Problem ({} clues):", puzzle.problem.filled_count());
    println!("{}", puzzle.problem);
    println!();
    println!("Solution:");
    println!("{}", puzzle.solution);
    println!();
    println!("Techniques:");
    for (technique, count) in solver.techniques().iter().zip(stats.applications()) {
        println!("  {}: {count}", technique.name());
    }
    println!("  total: {}", stats.total_steps());
}
