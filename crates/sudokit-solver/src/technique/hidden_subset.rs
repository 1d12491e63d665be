use std::ops::ControlFlow;

use sudokit_core::{CellSet, ConsistencyError, Digit, DigitSet, House};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueGrid, TechniqueStepData, subsets::combinations,
};

/// A technique that removes candidates using a hidden subset within a
/// house.
///
/// A "hidden subset" of size `N` occurs when `N` digits are confined to
/// the same `N` cells of a row, column, or box. Those cells must hold
/// exactly those digits, so all other candidates in them can be removed.
///
/// The size is a const parameter; see the [`HiddenPair`],
/// [`HiddenTriple`], and [`HiddenQuad`] aliases.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSubset<const N: usize> {}

/// Two digits confined to the same two cells.
pub type HiddenPair = HiddenSubset<2>;
/// Three digits confined to the same three cells.
pub type HiddenTriple = HiddenSubset<3>;
/// Four digits confined to the same four cells.
pub type HiddenQuad = HiddenSubset<4>;

const fn name_for(n: usize) -> &'static str {
    match n {
        2 => "Hidden Pair",
        3 => "Hidden Triple",
        4 => "Hidden Quad",
        _ => "Hidden Subset",
    }
}

impl<const N: usize> HiddenSubset<N> {
    /// Creates a new `HiddenSubset` technique.
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
        for house in House::ALL {
            let house_positions = house.positions();
            // Digits with 2..=N candidate positions in this house.
            let mut digits = [Digit::D1; 9];
            let mut count = 0;
            for digit in Digit::ALL {
                let len = (grid.digit_positions(digit) & house_positions).len();
                if (2..=N).contains(&len) {
                    digits[count] = digit;
                    count += 1;
                }
            }
            if count < N {
                continue;
            }

            for combo in combinations::<_, N>(&digits[..count]) {
                let subset_digits = DigitSet::from_iter(combo);
                let union_cells = combo.iter().fold(CellSet::EMPTY, |acc, &digit| {
                    acc | (grid.digit_positions(digit) & house_positions)
                });
                if union_cells.len() != N {
                    continue;
                }

                // More digits confined to these N cells than the cells can
                // hold.
                let confined = Digit::ALL
                    .into_iter()
                    .filter(|&digit| {
                        let in_house = grid.digit_positions(digit) & house_positions;
                        !in_house.is_empty() && in_house.is_subset(union_cells)
                    })
                    .count();
                if confined > N {
                    return Err(ConsistencyError::CandidateConstraintViolation.into());
                }

                if grid.remove_candidate_set_with_mask(union_cells, !subset_digits)
                    && let ControlFlow::Break(step) = on_condition(grid, union_cells, subset_digits)
                {
                    return Ok(Some(step));
                }
            }
        }
        Ok(None)
    }
}

impl<const N: usize> Technique for HiddenSubset<N> {
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
