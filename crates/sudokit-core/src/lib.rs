//! Core data structures for the sudokit workspace.
//!
//! This crate provides the bit-packed board representation that every other
//! component (technique engine, backtracking solver, generator) builds on:
//!
//! - [`Digit`]: type-safe sudoku digits 1-9
//! - [`Position`]: board coordinates with precomputed peer lookup
//! - [`DigitSet`] / [`HouseMask`]: 9-bit sets over digits and house cells
//! - [`CellSet`]: an 81-bit set over board positions, with row/column/box/peer
//!   tables computed at compile time
//! - [`House`]: rows, columns, and boxes as first-class values
//! - [`DigitGrid`]: a plain digit grid with text parsing and display
//! - [`CandidateGrid`]: the candidate bitboard used by solvers
//!
//! # Examples
//!
//! ```
//! use sudokit_core::{CandidateGrid, Digit, Position};
//!
//! let mut grid = CandidateGrid::new();
//! grid.place(Position::new(4, 4), Digit::D5);
//!
//! let candidates = grid.candidates_at(Position::new(4, 4));
//! assert_eq!(candidates.as_single(), Some(Digit::D5));
//! ```

pub mod candidate_grid;
pub mod cell_set;
pub mod digit;
pub mod digit_grid;
pub mod digit_set;
pub mod house;
pub mod house_mask;
pub mod position;

pub use self::{
    candidate_grid::{CandidateGrid, ConsistencyError},
    cell_set::CellSet,
    digit::Digit,
    digit_grid::{DigitGrid, ParseGridError},
    digit_set::DigitSet,
    house::House,
    house_mask::HouseMask,
    position::Position,
};
