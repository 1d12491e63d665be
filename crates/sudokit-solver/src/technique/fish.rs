use std::ops::ControlFlow;

use sudokit_core::{CellSet, ConsistencyError, Digit, DigitSet, HouseMask};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData, subsets::combinations,
};

/// A technique that removes candidates using a basic fish pattern.
///
/// A fish of size `N` occurs when a digit's candidates in `N` rows are
/// confined to `N` shared columns (or vice versa). The digit must be
/// placed once in each of those rows, which uses up all `N` columns, so
/// the digit can be eliminated from the rest of the columns.
///
/// The size is a const parameter; see the [`XWing`], [`Swordfish`], and
/// [`Jellyfish`] aliases.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fish<const N: usize> {}

/// A fish across two rows or columns.
pub type XWing = Fish<2>;
/// A fish across three rows or columns.
pub type Swordfish = Fish<3>;
/// A fish across four rows or columns.
pub type Jellyfish = Fish<4>;

const fn name_for(n: usize) -> &'static str {
    match n {
        2 => "X-Wing",
        3 => "Swordfish",
        4 => "Jellyfish",
        _ => "Fish",
    }
}

/// Base line orientation; the cover lines run the other way.
#[derive(Debug, Clone, Copy)]
enum Axis {
    Row,
    Column,
}

impl Axis {
    fn line_mask(self, grid: &TechniqueGrid, index: u8, digit: Digit) -> HouseMask {
        match self {
            Axis::Row => grid.row_mask(index, digit),
            Axis::Column => grid.col_mask(index, digit),
        }
    }

    fn base_positions(self, index: u8) -> CellSet {
        match self {
            Axis::Row => CellSet::ROW_POSITIONS[usize::from(index)],
            Axis::Column => CellSet::COLUMN_POSITIONS[usize::from(index)],
        }
    }

    fn cover_positions(self, index: u8) -> CellSet {
        match self {
            Axis::Row => CellSet::COLUMN_POSITIONS[usize::from(index)],
            Axis::Column => CellSet::ROW_POSITIONS[usize::from(index)],
        }
    }
}

impl<const N: usize> Fish<N> {
    /// Creates a new `Fish` technique.
    #[must_use]
    pub const fn new() -> Self {
        const {
            assert!(N >= 2 && N <= 4);
        }
        Self {}
    }

    fn apply_on_axis<F>(
        grid: &mut TechniqueGrid,
        axis: Axis,
        on_condition: &mut F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(&'a mut TechniqueGrid, Digit, CellSet) -> ControlFlow<BoxedTechniqueStep>,
    {
        for digit in Digit::ALL {
            // Base lines where the digit has 2..=N candidate positions.
            let mut lines = [(0_u8, HouseMask::EMPTY); 9];
            let mut count = 0;
            for index in 0..9 {
                let mask = axis.line_mask(grid, index, digit);
                if (2..=N).contains(&mask.len()) {
                    lines[count] = (index, mask);
                    count += 1;
                }
            }
            if count < N {
                continue;
            }

            for combo in combinations::<_, N>(&lines[..count]) {
                let cover = combo
                    .iter()
                    .fold(HouseMask::EMPTY, |acc, &(_, mask)| acc | mask);
                if cover.len() != N {
                    continue;
                }

                let base_cells = combo
                    .iter()
                    .fold(CellSet::EMPTY, |acc, &(index, _)| {
                        acc | axis.base_positions(index)
                    });
                let fish_cells = grid.digit_positions(digit) & base_cells;

                // All corners inside one box would require N placements of
                // the digit there.
                if CellSet::BOX_POSITIONS
                    .iter()
                    .any(|&box_positions| fish_cells.is_subset(box_positions))
                {
                    return Err(ConsistencyError::CandidateConstraintViolation.into());
                }

                let cover_cells = cover
                    .into_iter()
                    .fold(CellSet::EMPTY, |acc, index| acc | axis.cover_positions(index));
                let eliminations = cover_cells & !base_cells;
                if grid.remove_candidate_with_mask(eliminations, digit)
                    && let ControlFlow::Break(step) = on_condition(grid, digit, fish_cells)
                {
                    return Ok(Some(step));
                }
            }
        }
        Ok(None)
    }

    fn apply_with_control_flow<F>(
        grid: &mut TechniqueGrid,
        mut on_condition: F,
    ) -> Result<Option<BoxedTechniqueStep>, SolverError>
    where
        F: for<'a> FnMut(&'a mut TechniqueGrid, Digit, CellSet) -> ControlFlow<BoxedTechniqueStep>,
    {
        if let Some(step) = Self::apply_on_axis(grid, Axis::Row, &mut on_condition)? {
            return Ok(Some(step));
        }
        Self::apply_on_axis(grid, Axis::Column, &mut on_condition)
    }
}

impl<const N: usize> Technique for Fish<N> {
    fn name(&self) -> &'static str {
        name_for(N)
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let mut after_grid = grid.clone();
        let step =
            Self::apply_with_control_flow(&mut after_grid, |after_grid, digit, fish_cells| {
                ControlFlow::Break(Box::new(TechniqueStepData::from_diff(
                    name_for(N),
                    fish_cells,
                    vec![(fish_cells, DigitSet::from_elem(digit))],
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
