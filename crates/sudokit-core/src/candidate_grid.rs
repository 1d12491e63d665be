//! Candidate bitboard for sudoku solving.
//!
//! This module provides [`CandidateGrid`], which tracks possible placements
//! for each digit (1-9) across the entire board using one [`CellSet`]
//! bitboard per digit.
//!
//! # Examples
//!
//! ```
//! use sudokit_core::{CandidateGrid, Digit, Position};
//!
//! let mut grid = CandidateGrid::new();
//! grid.place(Position::new(4, 4), Digit::D5);
//!
//! // The placed cell is decided.
//! assert_eq!(
//!     grid.candidates_at(Position::new(4, 4)).as_single(),
//!     Some(Digit::D5)
//! );
//! ```

use derive_more::{Display, Error};

use crate::{
    cell_set::CellSet, digit::Digit, digit_grid::DigitGrid, digit_set::DigitSet, house::House,
    house_mask::HouseMask, position::Position,
};

/// A contradiction detected in a [`CandidateGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConsistencyError {
    /// A cell has no remaining candidates.
    #[display("a cell has no remaining candidates")]
    EmptyCell,
    /// A decided digit appears more than once in a house.
    #[display("a decided digit appears more than once in a house")]
    DuplicateDigit,
    /// A candidate pattern requires more placements of a digit than its
    /// houses allow (for example, a fish whose corners collapse into one
    /// box).
    #[display("a candidate pattern violates the placement constraints")]
    CandidateConstraintViolation,
}

/// Candidate bitboard for sudoku solving.
///
/// Manages possible placements for each digit (1-9) across the entire board.
/// Internally stores nine [`CellSet`]s, one per digit, each tracking the 81
/// positions where that digit can still be placed.
///
/// Candidate removal is monotone: apart from [`place`](Self::place) keeping
/// the placed digit at the placed cell, no operation ever re-adds a
/// candidate. Solvers rely on this to detect progress by comparing bitboards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGrid {
    /// `digits[d.bit_index()]` holds the possible positions for digit `d`.
    digits: [CellSet; 9],
}

impl Default for CandidateGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&DigitGrid> for CandidateGrid {
    fn from(grid: &DigitGrid) -> Self {
        Self::from_digit_grid(grid)
    }
}

impl From<DigitGrid> for CandidateGrid {
    fn from(grid: DigitGrid) -> Self {
        Self::from_digit_grid(&grid)
    }
}

impl CandidateGrid {
    /// Creates a new candidate grid with all positions available for all
    /// digits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            digits: [CellSet::FULL; 9],
        }
    }

    /// Builds a candidate grid from a digit grid.
    ///
    /// Every given digit is placed and its peer eliminations are applied,
    /// so the result reflects the basic row/column/box constraints of the
    /// givens.
    #[must_use]
    pub fn from_digit_grid(grid: &DigitGrid) -> Self {
        let mut candidates = Self::new();
        for (pos, digit) in grid.filled_cells() {
            candidates.place(pos, digit);
            candidates.remove_candidate_with_mask(pos.house_peers(), digit);
        }
        candidates
    }

    /// Returns a digit grid containing only decided cells.
    ///
    /// Undecided cells are left empty in the returned grid.
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        let mut grid = DigitGrid::new();
        let decided = self.decided_cells();
        for digit in Digit::ALL {
            for pos in self.digit_positions(digit) & decided {
                grid.set(pos, digit);
            }
        }
        grid
    }

    /// Places a digit at a position by removing all other candidates at
    /// that cell.
    ///
    /// This does not propagate eliminations to peers; peer propagation is a
    /// solver concern. Returns `true` if the grid changed.
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        let mut changed = false;
        for other in Digit::ALL {
            if other != digit {
                changed |= self.digits[usize::from(other.bit_index())].remove(pos);
            }
        }
        changed
    }

    /// Returns `true` if placing the digit would change the grid.
    #[must_use]
    pub fn would_place_change(&self, pos: Position, digit: Digit) -> bool {
        let candidates = self.candidates_at(pos);
        candidates != DigitSet::from_elem(digit) && candidates.contains(digit)
    }

    /// Removes a specific digit as a candidate at a position.
    ///
    /// Returns `true` if the candidate was removed.
    pub fn remove_candidate(&mut self, pos: Position, digit: Digit) -> bool {
        self.digits[usize::from(digit.bit_index())].remove(pos)
    }

    /// Returns `true` if removing the candidate would change the grid.
    #[must_use]
    pub fn would_remove_candidate_change(&self, pos: Position, digit: Digit) -> bool {
        self.digit_positions(digit).contains(pos)
    }

    /// Removes a candidate digit from all positions in a mask.
    ///
    /// Returns `true` if any candidate was removed.
    pub fn remove_candidate_with_mask(&mut self, mask: CellSet, digit: Digit) -> bool {
        let positions = &mut self.digits[usize::from(digit.bit_index())];
        let prev = *positions;
        *positions = positions.difference(mask);
        *positions != prev
    }

    /// Returns `true` if removing the digit from the masked positions would
    /// change the grid.
    #[must_use]
    pub fn would_remove_candidate_with_mask_change(&self, mask: CellSet, digit: Digit) -> bool {
        !(self.digit_positions(digit) & mask).is_empty()
    }

    /// Removes a set of candidate digits from all positions in a mask.
    ///
    /// Returns `true` if any candidate was removed.
    pub fn remove_candidate_set_with_mask(&mut self, mask: CellSet, digits: DigitSet) -> bool {
        let mut changed = false;
        for digit in digits {
            changed |= self.remove_candidate_with_mask(mask, digit);
        }
        changed
    }

    /// Returns `true` if removing the digit set from the masked positions
    /// would change the grid.
    #[must_use]
    pub fn would_remove_candidate_set_with_mask_change(
        &self,
        mask: CellSet,
        digits: DigitSet,
    ) -> bool {
        digits
            .into_iter()
            .any(|digit| self.would_remove_candidate_with_mask_change(mask, digit))
    }

    /// Returns the set of all positions where the specified digit can be
    /// placed.
    #[must_use]
    pub fn digit_positions(&self, digit: Digit) -> CellSet {
        self.digits[usize::from(digit.bit_index())]
    }

    /// Returns the set of candidate digits that can be placed at a position.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        let mut candidates = DigitSet::new();
        for digit in Digit::ALL {
            if self.digit_positions(digit).contains(pos) {
                candidates.insert(digit);
            }
        }
        candidates
    }

    /// Returns a bitmask of candidate positions in the specified house for
    /// the digit.
    ///
    /// A single-bit result is a hidden single; a two-bit result is a
    /// conjugate pair.
    #[must_use]
    pub fn house_mask(&self, house: House, digit: Digit) -> HouseMask {
        self.digit_positions(digit).house_mask(house)
    }

    /// Returns a bitmask of candidate positions in the specified row for
    /// the digit.
    #[must_use]
    pub fn row_mask(&self, y: u8, digit: Digit) -> HouseMask {
        self.house_mask(House::Row { y }, digit)
    }

    /// Returns a bitmask of candidate positions in the specified column for
    /// the digit.
    #[must_use]
    pub fn col_mask(&self, x: u8, digit: Digit) -> HouseMask {
        self.house_mask(House::Column { x }, digit)
    }

    /// Returns a bitmask of candidate positions in the specified box for
    /// the digit.
    #[must_use]
    pub fn box_mask(&self, box_index: u8, digit: Digit) -> HouseMask {
        self.house_mask(House::Box { index: box_index }, digit)
    }

    /// Classifies all positions by candidate count.
    ///
    /// Returns an array of `N` disjoint sets: index `k < N - 1` holds the
    /// positions with exactly `k` candidates, and index `N - 1` holds those
    /// with `N - 1` or more. Every position appears in exactly one set.
    ///
    /// The classification is computed in a single pass over the nine digit
    /// bitboards using bit-parallel bucket promotion.
    ///
    /// # Examples
    ///
    /// ```
    /// use sudokit_core::CandidateGrid;
    ///
    /// let grid = CandidateGrid::new();
    /// let [empty, decided, rest] = grid.classify_cells::<3>();
    /// assert!(empty.is_empty());
    /// assert!(decided.is_empty());
    /// assert_eq!(rest.len(), 81);
    /// ```
    #[must_use]
    pub fn classify_cells<const N: usize>(&self) -> [CellSet; N] {
        const { assert!(N >= 2) };
        let mut buckets = [CellSet::EMPTY; N];
        buckets[0] = CellSet::FULL;
        for digit_positions in self.digits {
            // Promote from high to low so a cell moves at most one bucket
            // per digit.
            for k in (0..N - 1).rev() {
                let moved = buckets[k] & digit_positions;
                buckets[k] = buckets[k].difference(moved);
                buckets[k + 1] |= moved;
            }
        }
        buckets
    }

    /// Returns all positions that have exactly one candidate (decided
    /// cells).
    #[must_use]
    pub fn decided_cells(&self) -> CellSet {
        let [_, decided, _] = self.classify_cells::<3>();
        decided
    }

    /// Checks whether the grid is consistent (no contradictions).
    ///
    /// # Errors
    ///
    /// - [`ConsistencyError::EmptyCell`] if any position has zero candidates
    /// - [`ConsistencyError::DuplicateDigit`] if a decided digit appears more
    ///   than once in a row, column, or box
    /// - [`ConsistencyError::CandidateConstraintViolation`] if some house has
    ///   no remaining candidate position for a digit
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let [empty, decided, _] = self.classify_cells::<3>();
        if !empty.is_empty() {
            return Err(ConsistencyError::EmptyCell);
        }
        for digit in Digit::ALL {
            let positions = self.digit_positions(digit);
            let decided_positions = positions & decided;
            for house in House::ALL {
                let house_positions = house.positions();
                if (positions & house_positions).is_empty() {
                    return Err(ConsistencyError::CandidateConstraintViolation);
                }
                if (decided_positions & house_positions).len() > 1 {
                    return Err(ConsistencyError::DuplicateDigit);
                }
            }
        }
        Ok(())
    }

    /// Returns whether the grid is fully solved.
    ///
    /// A grid is solved when it is consistent and all 81 cells are decided.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`ConsistencyError`] if the grid contains
    /// contradictions.
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.check_consistency()?;
        Ok(self.decided_cells().len() == 81)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    const SOLVED: &str = "
        534 678 912
        672 195 348
        198 342 567
        859 761 423
        426 853 791
        713 924 856
        961 537 284
        287 419 635
        345 286 179
    ";

    #[test]
    fn test_new_grid_has_all_candidates() {
        let grid = CandidateGrid::new();
        for pos in Position::all() {
            assert_eq!(grid.candidates_at(pos), DigitSet::FULL);
        }
        assert!(grid.check_consistency().is_ok());
        assert_eq!(grid.is_solved(), Ok(false));
    }

    #[test]
    fn test_place_decides_cell_without_peer_propagation() {
        let mut grid = CandidateGrid::new();
        let pos = Position::new(4, 4);
        assert!(grid.place(pos, Digit::D5));
        assert_eq!(grid.candidates_at(pos).as_single(), Some(Digit::D5));
        // place is cell-local; peers keep their candidates
        assert!(grid.candidates_at(Position::new(4, 5)).contains(Digit::D5));
        // placing again changes nothing
        assert!(!grid.place(pos, Digit::D5));
    }

    #[test]
    fn test_from_digit_grid_propagates_givens() {
        let mut givens = DigitGrid::new();
        givens.set(Position::new(0, 0), Digit::D5);
        let grid = CandidateGrid::from_digit_grid(&givens);

        for peer in Position::new(0, 0).house_peers() {
            assert!(!grid.candidates_at(peer).contains(Digit::D5));
        }
        assert_eq!(
            grid.candidates_at(Position::new(0, 0)).as_single(),
            Some(Digit::D5)
        );
        // a cell seeing nothing keeps all candidates
        assert_eq!(grid.candidates_at(Position::new(8, 8)), DigitSet::FULL);
    }

    #[test]
    fn test_remove_candidate_with_mask() {
        let mut grid = CandidateGrid::new();
        let mask = CellSet::ROW_POSITIONS[0];
        assert!(grid.would_remove_candidate_with_mask_change(mask, Digit::D3));
        assert!(grid.remove_candidate_with_mask(mask, Digit::D3));
        assert!(!grid.remove_candidate_with_mask(mask, Digit::D3));
        assert!((grid.digit_positions(Digit::D3) & mask).is_empty());
    }

    #[test]
    fn test_house_masks() {
        let mut grid = CandidateGrid::new();
        for x in 0..9 {
            if x != 7 {
                grid.remove_candidate(Position::new(x, 5), Digit::D4);
            }
        }
        assert_eq!(grid.row_mask(5, Digit::D4).as_single(), Some(7));
        assert_eq!(grid.row_mask(4, Digit::D4).len(), 9);
        assert_eq!(grid.col_mask(7, Digit::D4).len(), 9);
    }

    #[test]
    fn test_classify_cells_counts() {
        let mut grid = CandidateGrid::new();
        grid.place(Position::new(0, 0), Digit::D1);
        for digit in Digit::ALL {
            grid.remove_candidate(Position::new(8, 8), digit);
        }

        let [empty, decided, rest] = grid.classify_cells::<3>();
        assert_eq!(empty.as_single(), Some(Position::new(8, 8)));
        assert_eq!(decided.as_single(), Some(Position::new(0, 0)));
        assert_eq!(rest.len(), 79);
    }

    #[test]
    fn test_empty_cell_is_inconsistent() {
        let mut grid = CandidateGrid::new();
        for digit in Digit::ALL {
            grid.remove_candidate(Position::new(4, 4), digit);
        }
        assert_eq!(grid.check_consistency(), Err(ConsistencyError::EmptyCell));
    }

    #[test]
    fn test_duplicate_digit_is_inconsistent() {
        let mut givens = DigitGrid::new();
        givens.set(Position::new(0, 0), Digit::D5);
        givens.set(Position::new(8, 0), Digit::D5);
        let mut grid = CandidateGrid::new();
        // bypass peer propagation so both cells stay decided as D5
        for (pos, digit) in givens.filled_cells() {
            grid.place(pos, digit);
        }
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::DuplicateDigit)
        );
    }

    #[test]
    fn test_digit_starved_house_is_inconsistent() {
        let mut grid = CandidateGrid::new();
        // digit 7 can no longer go anywhere in row 0
        grid.remove_candidate_with_mask(CellSet::ROW_POSITIONS[0], Digit::D7);
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::CandidateConstraintViolation)
        );
    }

    #[test]
    fn test_solved_grid_round_trip() {
        let solution = DigitGrid::from_str(SOLVED).unwrap();
        let grid = CandidateGrid::from_digit_grid(&solution);
        assert_eq!(grid.is_solved(), Ok(true));
        assert_eq!(grid.to_digit_grid(), solution);
    }
}
