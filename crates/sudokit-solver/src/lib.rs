//! Sudoku solving engines built on candidate bitboards.
//!
//! This crate provides two complementary solvers on top of
//! [`sudokit_core`]:
//!
//! - [`TechniqueSolver`] applies human-style solving techniques (singles,
//!   locked candidates, subsets, fish, wings, and chains) in difficulty
//!   order, producing explainable steps.
//! - [`BacktrackSolver`] performs exhaustive depth-first search with
//!   constraint propagation, and can count solutions to verify uniqueness.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr as _;
//!
//! use sudokit_core::DigitGrid;
//! use sudokit_solver::{TechniqueGrid, TechniqueSolver};
//!
//! let puzzle = DigitGrid::from_str(
//!     "
//!     53_ _7_ ___
//!     6__ 195 ___
//!     _98 ___ _6_
//!     8__ _6_ __3
//!     4__ 8_3 __1
//!     7__ _2_ __6
//!     _6_ ___ 28_
//!     ___ 419 __5
//!     ___ _8_ _79
//! ",
//! )?;
//!
//! let solver = TechniqueSolver::with_all_techniques();
//! let mut grid = TechniqueGrid::from_digit_grid(&puzzle);
//! let (solved, stats) = solver.solve(&mut grid)?;
//! assert!(solved);
//! assert!(stats.total_steps() > 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use derive_more::{Display, Error, From};
use sudokit_core::ConsistencyError;

pub use self::{
    backtrack::BacktrackSolver,
    technique_grid::TechniqueGrid,
    technique_solver::{TechniqueSolver, TechniqueSolverStats},
    technique_step::{
        BoxedTechniqueStep, ConditionCells, ConditionDigitCells, TechniqueApplication,
        TechniqueStep, TechniqueStepData,
    },
};

pub mod backtrack;
mod chain;
mod links;
mod subsets;
pub mod technique;
mod technique_grid;
mod technique_solver;
mod technique_step;
pub mod testing;

/// An error produced during solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SolverError {
    /// The grid contains a contradiction.
    #[display("inconsistent grid: {_0}")]
    Inconsistent(ConsistencyError),
    /// The puzzle has no solution.
    #[display("the puzzle has no solution")]
    NoSolution,
}
