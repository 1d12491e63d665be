//! Seeded Sudoku puzzle generation.
//!
//! Puzzles are produced in two stages, each fed by an independent random
//! stream derived from a [`PuzzleSeed`]: a random solved grid is built by
//! backtracking search, then clues are carved away while the puzzle keeps
//! a unique solution and stays solvable by a configured
//! [`TechniqueSolver`](sudokit_solver::TechniqueSolver). Identical seed and
//! technique set always yield an identical puzzle.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr as _;
//!
//! use sudokit_generator::{PuzzleGenerator, PuzzleSeed};
//! use sudokit_solver::TechniqueSolver;
//!
//! let solver = TechniqueSolver::with_all_techniques();
//! let generator = PuzzleGenerator::new(&solver);
//!
//! let seed = PuzzleSeed::from_str(
//!     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
//! )?;
//! let puzzle = generator.generate_with_seed(seed)?;
//! println!("{}", puzzle.problem);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use derive_more::{Display, Error, From};
use sudokit_solver::SolverError;

pub use self::{
    generator::{GeneratedPuzzle, PuzzleGenerator},
    seed::{ParseSeedError, PuzzleSeed},
    solution::SolutionGenerator,
};

mod generator;
mod seed;
mod solution;

/// An error occurring during puzzle generation.
///
/// Carving only ever produces consistent puzzles, so a solver error here
/// indicates an unsound technique rather than a bad input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GenerateError {
    /// The technique solver failed while probing a carved puzzle.
    #[display("solver failed during carving: {_0}")]
    Solver(SolverError),
}
