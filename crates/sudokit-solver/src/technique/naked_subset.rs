use std::ops::ControlFlow;

use sudokit_core::{CellSet, ConsistencyError, DigitSet, House, Position};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData, subsets::combinations,
};

/// A technique that removes candidates using a naked subset within a house.
///
/// A "naked subset" of size `N` occurs when `N` cells in a row, column, or
/// box together contain only `N` distinct candidates. Those digits can be
/// eliminated from all other cells in that house.
///
/// The size is a const parameter; see the [`NakedPair`], [`NakedTriple`],
/// and [`NakedQuad`] aliases.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSubset<const N: usize> {}

/// Two cells sharing the same two candidates.
pub type NakedPair = NakedSubset<2>;
/// Three cells sharing three candidates.
pub type NakedTriple = NakedSubset<3>;
/// Four cells sharing four candidates.
pub type NakedQuad = NakedSubset<4>;

const fn name_for(n: usize) -> &'static str {
    match n {
        2 => "Naked Pair",
        3 => "Naked Triple",
        4 => "Naked Quad",
        _ => "Naked Subset",
    }
}

impl<const N: usize> NakedSubset<N> {
    /// Creates a new `NakedSubset` technique.
    #[must_use]
    pub const fn new() -> Self {
        const {
            assert!(N >= 2 && N <= 4);
        }
        Self {}
    }

    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(
            &'a mut TechniqueGrid,
            CellSet,
            DigitSet,
        ) -> ControlFlow<BoxedTechniqueStep>,
    {
        let decided = grid.decided_cells();
        for house in House::ALL {
            let undecided = house.positions() & !decided;
            let mut cells = [Position::new(0, 0); 9];
            let mut count = 0;
            for pos in undecided {
                if grid.candidates_at(pos).len() <= N {
                    cells[count] = pos;
                    count += 1;
                }
            }
            if count < N {
                continue;
            }

            for combo in combinations::<_, N>(&cells[..count]) {
                let subset_cells = CellSet::from_iter(combo);
                let subset_digits = combo
                    .iter()
                    .fold(DigitSet::new(), |acc, &pos| acc | grid.candidates_at(pos));
                if subset_digits.len() != N {
                    continue;
                }

                // More than N cells confined to these N digits cannot all
                // be filled.
                let confined = undecided
                    .into_iter()
                    .filter(|&pos| grid.candidates_at(pos).is_subset(subset_digits))
                    .count();
                if confined > N {
                    return Err(ConsistencyError::CandidateConstraintViolation.into());
                }

                let eliminate_positions = house.positions() & !subset_cells;
                if grid.remove_candidate_set_with_mask(eliminate_positions, subset_digits)
                    && let ControlFlow::Break(step) = on_condition(grid, subset_cells, subset_digits)
                {
                    return Ok(Some(step));
                }
            }
        }
        Ok(None)
    }
}

impl<const N: usize> Technique for NakedSubset<N> {
    fn name(&self) -> &'static str {
        name_for(N)
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step =
            Self::apply_with_control_flow(&mut after_grid, |after_grid, cells, digits| {
                ControlFlow::Break(Box::new(TechniqueStepData::from_diff(
                    name_for(N),
                    cells,
                    vec![(cells, digits)],
                    grid,
                    after_grid,
                )))
            })?;
        Ok(step)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        Self::apply_with_control_flow(grid, |_, _, _| {
            changed = true;
            ControlFlow::Continue(())
        })?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use sudokit_core::{CandidateGrid, Digit};

    use super::*;
    use crate::testing::TechniqueTester;

    fn restrict(grid: &mut CandidateGrid, pos: Position, digits: DigitSet) {
        for digit in !digits {
            grid.remove_candidate(pos, digit);
        }
    }

    #[test]
    fn test_pair_eliminates_from_row() {
        let mut grid = CandidateGrid::new();
        let digits = DigitSet::from_iter([Digit::D1, Digit::D2]);
        restrict(&mut grid, Position::new(0, 0), digits);
        restrict(&mut grid, Position::new(3, 0), digits);

        TechniqueTester::new(grid)
            .apply_once(&NakedPair::new())
            .assert_removed_includes(Position::new(4, 0), [Digit::D1, Digit::D2]);
    }

    #[test]
    fn test_triple_eliminates_from_column() {
        let mut grid = CandidateGrid::new();
        let digits = DigitSet::from_iter([Digit::D4, Digit::D5, Digit::D6]);
        // Triples need not hold all three digits in every cell.
        restrict(
            &mut grid,
            Position::new(2, 0),
            DigitSet::from_iter([Digit::D4, Digit::D5]),
        );
        restrict(
            &mut grid,
            Position::new(2, 4),
            DigitSet::from_iter([Digit::D5, Digit::D6]),
        );
        restrict(&mut grid, Position::new(2, 8), digits);

        TechniqueTester::new(grid)
            .apply_once(&NakedTriple::new())
            .assert_removed_includes(Position::new(2, 2), [Digit::D4, Digit::D5, Digit::D6]);
    }

    #[test]
    fn test_quad_eliminates_from_box() {
        let mut grid = CandidateGrid::new();
        let digits = DigitSet::from_iter([Digit::D1, Digit::D3, Digit::D5, Digit::D7]);
        restrict(&mut grid, Position::new(0, 0), digits);
        restrict(&mut grid, Position::new(1, 0), digits);
        restrict(&mut grid, Position::new(0, 1), digits);
        restrict(&mut grid, Position::new(1, 1), digits);

        TechniqueTester::new(grid)
            .apply_once(&NakedQuad::new())
            .assert_removed_includes(Position::new(2, 2), [Digit::D1, Digit::D3]);
    }

    #[test]
    fn test_no_change_when_no_subset() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&NakedPair::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_no_change_when_subset_has_no_eliminations() {
        let mut grid = CandidateGrid::new();
        let digits = DigitSet::from_iter([Digit::D1, Digit::D2]);
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(1, 0);
        restrict(&mut grid, pos1, digits);
        restrict(&mut grid, pos2, digits);

        // The pair digits are already absent from the rest of row 0 and box 0.
        for pos in CellSet::ROW_POSITIONS[0] | CellSet::BOX_POSITIONS[0] {
            if pos != pos1 && pos != pos2 {
                grid.remove_candidate(pos, Digit::D1);
                grid.remove_candidate(pos, Digit::D2);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&NakedPair::new())
            .assert_no_change(Position::new(2, 0))
            .assert_no_change(Position::new(0, 1));
    }

    #[test]
    fn test_inconsistent_when_three_cells_share_pair() {
        let mut grid = CandidateGrid::new();
        let digits = DigitSet::from_iter([Digit::D1, Digit::D2]);
        restrict(&mut grid, Position::new(0, 0), digits);
        restrict(&mut grid, Position::new(3, 0), digits);
        restrict(&mut grid, Position::new(6, 0), digits);

        let mut grid = TechniqueGrid::from(grid);
        let result = NakedPair::new().apply(&mut grid);
        assert!(matches!(
            result,
            Err(SolverError::Inconsistent(
                ConsistencyError::CandidateConstraintViolation
            ))
        ));
    }
}
