use sudokit_core::{CellSet, Digit, DigitSet, House, Position};

use super::{BoxedTechnique, Technique};
use crate::{
    BoxedTechniqueStep, ConditionCells, ConditionDigitCells, SolverError, TechniqueApplication,
    TechniqueGrid, TechniqueStep,
};

const NAME: &str = "Locked Candidates";
const NAME_POINTING: &str = "Locked Candidates (Pointing)";
const NAME_CLAIMING: &str = "Locked Candidates (Claiming)";

/// A technique that removes candidates using locked candidates
/// (pointing/claiming).
///
/// - **Pointing**: Within a box, all candidates of a digit lie in a single
///   row/column, so that digit can be removed from the rest of that
///   row/column outside the box.
/// - **Claiming**: Within a row/column, all candidates of a digit lie in a
///   single box, so that digit can be removed from the rest of that box
///   outside the row/column.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedCandidates {}

impl LockedCandidates {
    /// Creates a new `LockedCandidates` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn box_lines(box_index: u8) -> [House; 6] {
        let origin = Position::box_origin(box_index);
        [
            House::Row { y: origin.y() },
            House::Row { y: origin.y() + 1 },
            House::Row { y: origin.y() + 2 },
            House::Column { x: origin.x() },
            House::Column { x: origin.x() + 1 },
            House::Column { x: origin.x() + 2 },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LockedCandidatesKind {
    Pointing,
    Claiming,
}

#[derive(Debug, Clone)]
struct LockedCandidatesStep {
    kind: LockedCandidatesKind,
    digit: Digit,
    box_index: u8,
    line: House,
    intersection_cells: CellSet,
    eliminations: CellSet,
}

impl TechniqueStep for LockedCandidatesStep {
    fn technique_name(&self) -> &'static str {
        match self.kind {
            LockedCandidatesKind::Pointing => NAME_POINTING,
            LockedCandidatesKind::Claiming => NAME_CLAIMING,
        }
    }

    fn clone_box(&self) -> BoxedTechniqueStep {
        Box::new(self.clone())
    }

    fn condition_cells(&self) -> ConditionCells {
        House::Box {
            index: self.box_index,
        }
        .positions()
            | self.line.positions()
    }

    fn condition_digit_cells(&self) -> ConditionDigitCells {
        vec![(self.intersection_cells, DigitSet::from_elem(self.digit))]
    }

    fn application(&self) -> Vec<TechniqueApplication> {
        vec![TechniqueApplication::CandidateElimination {
            positions: self.eliminations,
            digits: DigitSet::from_elem(self.digit),
        }]
    }
}

impl Technique for LockedCandidates {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn find_step(&self, grid: &TechniqueGrid) -> Result<Option<BoxedTechniqueStep>, SolverError> {
        let decided = grid.decided_cells();
        for box_index in 0..9 {
            let box_positions = House::Box { index: box_index }.positions();
            for line in Self::box_lines(box_index) {
                let intersection = box_positions & line.positions();
                if (intersection & !decided).is_empty() {
                    continue;
                }
                let rest_in_box = box_positions & !intersection;
                let rest_in_line = line.positions() & !intersection;
                for digit in Digit::ALL {
                    let digit_positions = grid.digit_positions(digit);
                    if (digit_positions & intersection).is_empty() {
                        continue;
                    }

                    let (kind, eliminations) = if (digit_positions & rest_in_box).is_empty() {
                        (
                            LockedCandidatesKind::Pointing,
                            digit_positions & rest_in_line,
                        )
                    } else if (digit_positions & rest_in_line).is_empty() {
                        (LockedCandidatesKind::Claiming, digit_positions & rest_in_box)
                    } else {
                        continue;
                    };
                    if grid.would_remove_candidate_with_mask_change(eliminations, digit) {
                        return Ok(Some(Box::new(LockedCandidatesStep {
                            kind,
                            digit,
                            box_index,
                            line,
                            intersection_cells: digit_positions & intersection,
                            eliminations,
                        })));
                    }
                }
            }
        }
        Ok(None)
    }

    fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
        let mut changed = false;
        let decided = grid.decided_cells();
        for box_index in 0..9 {
            let box_positions = House::Box { index: box_index }.positions();
            for line in Self::box_lines(box_index) {
                let intersection = box_positions & line.positions();
                if (intersection & !decided).is_empty() {
                    continue;
                }
                let rest_in_box = box_positions & !intersection;
                let rest_in_line = line.positions() & !intersection;
                for digit in Digit::ALL {
                    let digit_positions = grid.digit_positions(digit);
                    if (digit_positions & intersection).is_empty() {
                        continue;
                    }

                    if (digit_positions & rest_in_box).is_empty() {
                        changed |=
                            grid.remove_candidate_with_mask(digit_positions & rest_in_line, digit);
                    } else if (digit_positions & rest_in_line).is_empty() {
                        changed |=
                            grid.remove_candidate_with_mask(digit_positions & rest_in_box, digit);
                    }
                }
            }
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use sudokit_core::CandidateGrid;

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_pointing_eliminates_from_row() {
        // Box 0: limit D5 candidates to row 0 inside the box.
        let mut grid = CandidateGrid::new();
        for pos in CellSet::BOX_POSITIONS[0] {
            if pos.y() != 0 {
                grid.remove_candidate(pos, Digit::D5);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&LockedCandidates::new())
            .assert_removed_includes(Position::new(3, 0), [Digit::D5])
            .assert_removed_includes(Position::new(8, 0), [Digit::D5]);
    }

    #[test]
    fn test_claiming_eliminates_from_box() {
        // Row 0: limit D7 candidates to box 0 cells in row 0.
        let mut grid = CandidateGrid::new();
        for pos in CellSet::ROW_POSITIONS[0] {
            if pos.x() > 2 {
                grid.remove_candidate(pos, Digit::D7);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&LockedCandidates::new())
            .assert_removed_includes(Position::new(0, 1), [Digit::D7])
            .assert_removed_includes(Position::new(2, 2), [Digit::D7]);
    }

    #[test]
    fn test_no_change_when_no_locked_candidates() {
        let grid = CandidateGrid::new();

        TechniqueTester::new(grid)
            .apply_once(&LockedCandidates::new())
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(4, 4));
    }
}
