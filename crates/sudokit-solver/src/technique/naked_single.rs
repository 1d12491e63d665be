use sudokit_core::{CellSet, Digit, DigitSet, Position};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueApplication, TechniqueGrid, TechniqueStep,
};

const NAME: &str = "Naked Single";

/// A technique that finds cells with only one remaining candidate and
/// propagates constraints.
///
/// When a cell has only one possible digit (a "naked single"), that digit
/// is placed in that cell, and the digit is removed from all cells in the
/// same row, column, and box.
///
/// This technique is the solver's propagation engine: other techniques only
/// decide cells or remove candidates, and the resulting peer eliminations
/// are performed when control returns to this technique. The grid tracks
/// which decided cells have already been propagated, so each cell is
/// propagated once.
///
/// # Examples
///
/// ```
/// use sudokit_solver::{
///     TechniqueGrid,
///     technique::{NakedSingle, Technique},
/// };
///
/// let mut grid = TechniqueGrid::new();
/// let changed = NakedSingle::new().apply(&mut grid)?;
/// assert!(!changed);
/// # Ok::<(), sudokit_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle;

impl NakedSingle {
    /// Creates a new `NakedSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        NakedSingle
    }

    fn affected_peers(grid: &TechniqueGrid, pos: Position, digit: Digit) -> CellSet {
        pos.house_peers() & grid.digit_positions(digit)
    }
}

#[derive(Debug, Clone)]
struct NakedSingleStep {
    position: Position,
    digit: Digit,
    affected_positions: CellSet,
}

impl TechniqueStep for NakedSingleStep {
    fn technique_name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> CellSet {
        CellSet::from_elem(self.position)
    }

    fn condition_digit_cells(&self) -> Vec<(CellSet, DigitSet)> {
        vec![(
            CellSet::from_elem(self.position),
            DigitSet::from_elem(self.digit),
        )]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![
            TechniqueApplication::Placement {
                position: self.position,
                digit: self.digit,
            },
            TechniqueApplication::CandidateElimination {
                positions: self.affected_positions,
                digits: DigitSet::from_elem(self.digit),
            },
        ]
    }
}

impl Technique for NakedSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let decided_cells = grid.decided_cells();
        for digit in Digit::ALL {
            let unpropagated =
                grid.digit_positions(digit) & decided_cells & !grid.decided_propagated();
            for pos in unpropagated {
                let affected = Self::affected_peers(grid, pos, digit);
                if !affected.is_empty() {
                    return Ok(Some(Box::new(NakedSingleStep {
                        position: pos,
                        digit,
                        affected_positions: affected,
                    })));
                }
            }
        }
        Ok(None)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        let decided_cells = grid.decided_cells();
        for digit in Digit::ALL {
            let unpropagated =
                grid.digit_positions(digit) & decided_cells & !grid.decided_propagated();
            for pos in unpropagated {
                let affected = Self::affected_peers(grid, pos, digit);
                grid.insert_decided_propagated(pos);
                changed |= grid.remove_candidate_with_mask(affected, digit);
            }
        }
        Ok(changed)
    }
}
