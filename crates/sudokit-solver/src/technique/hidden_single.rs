use sudokit_core::{CellSet, Digit, DigitSet, House, Position};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, SolverError, TechniqueApplication, TechniqueGrid, TechniqueStep,
};

const NAME: &str = "Hidden Single";

/// A technique that places a digit that can only go in one cell within a
/// house.
///
/// When a digit has exactly one candidate position left in a row, column,
/// or box, that digit must go there (a "hidden single"), even if the cell
/// itself still has other candidates. The cell is decided; the resulting
/// peer eliminations are handled by
/// [`NakedSingle`](super::NakedSingle).
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle;

impl HiddenSingle {
    /// Creates a new `HiddenSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        HiddenSingle
    }
}

#[derive(Debug, Clone)]
struct HiddenSingleStep {
    house: House,
    position: Position,
    digit: Digit,
}

impl TechniqueStep for HiddenSingleStep {
    fn technique_name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> CellSet {
        self.house.positions()
    }

    fn condition_digit_cells(&self) -> Vec<(CellSet, DigitSet)> {
        vec![(
            CellSet::from_elem(self.position),
            DigitSet::from_elem(self.digit),
        )]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::Placement {
            position: self.position,
            digit: self.digit,
        }]
    }
}

impl Technique for HiddenSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        for house in House::ALL {
            for digit in Digit::ALL {
                let Some(cell) = grid.house_mask(house, digit).as_single() else {
                    continue;
                };
                let pos = house.position_from_cell_index(cell);
                if grid.would_place_change(pos, digit) {
                    return Ok(Some(Box::new(HiddenSingleStep {
                        house,
                        position: pos,
                        digit,
                    })));
                }
            }
        }
        Ok(None)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        for house in House::ALL {
            for digit in Digit::ALL {
                let Some(cell) = grid.house_mask(house, digit).as_single() else {
                    continue;
                };
                let pos = house.position_from_cell_index(cell);
                changed |= grid.place(pos, digit);
            }
        }
        Ok(changed)
    }
}
