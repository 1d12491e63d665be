//! Exhaustive backtracking search over Sudoku grids.
//!
//! The technique solver in this crate only makes deductions a human could
//! follow. [`BacktrackSolver`] is its complement: a depth-first search with
//! constraint propagation that always finds a solution when one exists and
//! can count solutions, which is how puzzle uniqueness is established.

use sudokit_core::{CandidateGrid, CellSet, Digit, DigitGrid, Position};

use crate::SolverError;

/// A backtracking solver with candidate propagation.
///
/// The search always branches on a cell with the fewest remaining
/// candidates and propagates forced placements eagerly, so most dead ends
/// are pruned without branching at all.
///
/// The digit order controls which candidate is tried first at each branch
/// point. With the default order the solver is deterministic; a shuffled
/// order yields a uniformly chosen path through the search tree, which
/// puzzle generation uses to produce varied solution grids.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use sudokit_core::DigitGrid;
/// use sudokit_solver::BacktrackSolver;
///
/// let puzzle = DigitGrid::from_str(
///     "
///     53_ _7_ ___
///     6__ 195 ___
///     _98 ___ _6_
///     8__ _6_ __3
///     4__ 8_3 __1
///     7__ _2_ __6
///     _6_ ___ 28_
///     ___ 419 __5
///     ___ _8_ _79
/// ",
/// )?;
///
/// let solver = BacktrackSolver::new();
/// let solution = solver.solve(&puzzle)?;
/// assert!(solver.has_unique_solution(&puzzle));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackSolver {
    digit_order: [Digit; 9],
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BacktrackSolver {
    /// Creates a solver that tries digits in ascending order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            digit_order: Digit::ALL,
        }
    }

    /// Creates a solver that tries digits in the given order at each
    /// branch point.
    #[must_use]
    pub fn with_digit_order(digit_order: [Digit; 9]) -> Self {
        Self { digit_order }
    }

    /// Solves the puzzle, returning the first solution found.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::NoSolution`] if the puzzle has no solution,
    /// including when the givens already conflict.
    pub fn solve(&self, puzzle: &DigitGrid) -> Result<DigitGrid, SolverError> {
        let candidates = CandidateGrid::from_digit_grid(puzzle);
        if candidates.check_consistency().is_err() {
            return Err(SolverError::NoSolution);
        }
        let mut first = None;
        let _ = self.count(&candidates, 1, &mut first);
        first.ok_or(SolverError::NoSolution)
    }

    /// Counts solutions, stopping once `limit` have been found.
    ///
    /// A conflicting puzzle counts as having zero solutions. Pass a small
    /// limit when only the distinction between zero, one, and many
    /// matters.
    #[must_use]
    pub fn count_solutions(&self, puzzle: &DigitGrid, limit: usize) -> usize {
        if limit == 0 {
            return 0;
        }
        let candidates = CandidateGrid::from_digit_grid(puzzle);
        if candidates.check_consistency().is_err() {
            return 0;
        }
        self.count(&candidates, limit, &mut None)
    }

    /// Returns `true` if the puzzle has exactly one solution.
    #[must_use]
    pub fn has_unique_solution(&self, puzzle: &DigitGrid) -> bool {
        self.count_solutions(puzzle, 2) == 1
    }

    fn count(
        &self,
        candidates: &CandidateGrid,
        limit: usize,
        first: &mut Option<DigitGrid>,
    ) -> usize {
        let Some(pos) = branch_cell(candidates) else {
            if first.is_none() {
                *first = Some(candidates.to_digit_grid());
            }
            return 1;
        };

        let digits = candidates.candidates_at(pos);
        let mut found = 0;
        for &digit in &self.digit_order {
            if !digits.contains(digit) {
                continue;
            }
            let mut child = candidates.clone();
            if assign(&mut child, pos, digit) {
                found += self.count(&child, limit - found, first);
                if found >= limit {
                    break;
                }
            }
        }
        found
    }
}

/// Picks the undecided cell with the fewest candidates, or `None` if the
/// grid is fully decided.
fn branch_cell(candidates: &CandidateGrid) -> Option<Position> {
    let undecided = CellSet::FULL.difference(candidates.decided_cells());
    undecided
        .into_iter()
        .min_by_key(|&pos| candidates.candidates_at(pos).len())
}

/// Places a digit and propagates forced placements to a fixpoint.
///
/// Returns `false` when the placement leads to a contradiction, leaving
/// the grid in an unspecified but safe state.
fn assign(candidates: &mut CandidateGrid, pos: Position, digit: Digit) -> bool {
    candidates.place(pos, digit);
    let mut pending = vec![(pos, digit)];
    while let Some((pos, digit)) = pending.pop() {
        for peer in pos.house_peers().intersection(candidates.digit_positions(digit)) {
            let before = candidates.candidates_at(peer);
            if before.as_single() == Some(digit) {
                return false;
            }
            candidates.remove_candidate(peer, digit);
            let after = candidates.candidates_at(peer);
            if after.is_empty() {
                return false;
            }
            if let Some(forced) = after.as_single() {
                pending.push((peer, forced));
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn puzzle() -> DigitGrid {
        DigitGrid::from_str(
            "
            53_ _7_ ___
            6__ 195 ___
            _98 ___ _6_
            8__ _6_ __3
            4__ 8_3 __1
            7__ _2_ __6
            _6_ ___ 28_
            ___ 419 __5
            ___ _8_ _79
        ",
        )
        .unwrap()
    }

    fn solution() -> DigitGrid {
        DigitGrid::from_str(
            "
            534 678 912
            672 195 348
            198 342 567
            859 761 423
            426 853 791
            713 924 856
            961 537 284
            287 419 635
            345 286 179
        ",
        )
        .unwrap()
    }

    #[test]
    fn test_solves_puzzle() {
        let solver = BacktrackSolver::new();
        assert_eq!(solver.solve(&puzzle()).unwrap(), solution());
    }

    #[test]
    fn test_unique_puzzle_counts_one() {
        let solver = BacktrackSolver::new();
        assert_eq!(solver.count_solutions(&puzzle(), 10), 1);
        assert!(solver.has_unique_solution(&puzzle()));
    }

    #[test]
    fn test_empty_grid_has_many_solutions() {
        let solver = BacktrackSolver::new();
        let empty = DigitGrid::new();
        assert_eq!(solver.count_solutions(&empty, 5), 5);
        assert!(!solver.has_unique_solution(&empty));
    }

    #[test]
    fn test_conflicting_givens_have_no_solution() {
        let conflicting = DigitGrid::from_str(
            "
            11_ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
        ",
        )
        .unwrap();

        let solver = BacktrackSolver::new();
        assert_eq!(solver.count_solutions(&conflicting, 10), 0);
        assert!(matches!(
            solver.solve(&conflicting),
            Err(SolverError::NoSolution)
        ));
    }

    #[test]
    fn test_starved_cell_has_no_solution() {
        // No two givens share a house, yet the top-left cell sees all nine
        // digits among its peers.
        let unsolvable = DigitGrid::from_str(
            "
            __2 345 678
            ___ ___ ___
            ___ ___ ___
            9__ ___ ___
            1__ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
        ",
        )
        .unwrap();

        let solver = BacktrackSolver::new();
        assert_eq!(solver.count_solutions(&unsolvable, 10), 0);
    }

    #[test]
    fn test_digit_order_changes_first_solution() {
        let solver_asc = BacktrackSolver::new();
        let mut order = Digit::ALL;
        order.reverse();
        let solver_desc = BacktrackSolver::with_digit_order(order);

        let empty = DigitGrid::new();
        let asc = solver_asc.solve(&empty).unwrap();
        let desc = solver_desc.solve(&empty).unwrap();
        assert_ne!(asc, desc);

        let solver = BacktrackSolver::new();
        assert!(solver.has_unique_solution(&asc));
        assert!(solver.has_unique_solution(&desc));
    }

    #[test]
    fn test_solved_grid_round_trips() {
        let solver = BacktrackSolver::new();
        assert_eq!(solver.solve(&solution()).unwrap(), solution());
    }
}
