//! Test utilities for exercising solving techniques.
//!
//! [`TechniqueTester`] is a fluent assertion harness: build a grid, apply a
//! technique, then assert on the resulting candidate changes. By default
//! every application is cross-checked against the technique's
//! [`find_step`](crate::technique::Technique::find_step) output, so a
//! technique whose hint steps disagree with its mutations fails loudly in
//! its own unit tests.

use std::str::FromStr as _;

use sudokit_core::{Digit, DigitGrid, DigitSet, Position};

use crate::{
    BoxedTechniqueStep, TechniqueApplication, TechniqueGrid, technique::Technique,
};

/// A fluent test harness for solving techniques.
///
/// # Examples
///
/// ```
/// use sudokit_core::{CandidateGrid, Digit, Position};
/// use sudokit_solver::{technique::NakedSingle, testing::TechniqueTester};
///
/// let mut grid = CandidateGrid::new();
/// grid.place(Position::new(0, 0), Digit::D5);
///
/// TechniqueTester::new(grid)
///     .apply_once(&NakedSingle::new())
///     .assert_removed_exact(Position::new(8, 0), [Digit::D5]);
/// ```
#[derive(Debug, Clone)]
pub struct TechniqueTester {
    initial: TechniqueGrid,
    grid: TechniqueGrid,
    check_find_step: bool,
}

impl TechniqueTester {
    /// Creates a tester from a grid.
    #[must_use]
    pub fn new(grid: impl Into<TechniqueGrid>) -> Self {
        let grid = grid.into();
        Self {
            initial: grid.clone(),
            grid,
            check_find_step: true,
        }
    }

    /// Creates a tester from a textual puzzle, placing givens and removing
    /// them from their peers.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a valid puzzle.
    #[must_use]
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        let grid = match DigitGrid::from_str(s) {
            Ok(grid) => grid,
            Err(e) => panic!("failed to parse puzzle: {e}"),
        };
        Self::new(TechniqueGrid::from_digit_grid(&grid))
    }

    /// Disables the cross-check between `find_step` and `apply`.
    ///
    /// Useful when a test deliberately drives a technique past the point
    /// where its hint step was computed.
    #[must_use]
    pub fn without_find_step_consistency(mut self) -> Self {
        self.check_find_step = false;
        self
    }

    /// Applies the technique once and asserts its hint step agrees with
    /// the mutation.
    ///
    /// # Panics
    ///
    /// Panics if the technique errors, or if `find_step` and `apply`
    /// disagree about whether progress is possible or about the changes
    /// made.
    #[must_use]
    #[track_caller]
    pub fn apply_once(mut self, technique: &dyn Technique) -> Self {
        self.apply_checked(technique);
        self
    }

    /// Applies the technique `n` times, asserting progress each time.
    ///
    /// # Panics
    ///
    /// Panics if the technique errors, fails a consistency check, or makes
    /// no progress on any of the `n` applications.
    #[must_use]
    #[track_caller]
    pub fn apply_times(mut self, technique: &dyn Technique, n: usize) -> Self {
        for i in 0..n {
            let changed = self.apply_checked(technique);
            assert!(
                changed,
                "{} made no progress on application {} of {n}",
                technique.name(),
                i + 1,
            );
        }
        self
    }

    /// Applies the technique repeatedly until it makes no further
    /// progress.
    ///
    /// # Panics
    ///
    /// Panics if the technique errors or fails a consistency check.
    #[must_use]
    #[track_caller]
    pub fn apply_until_stuck(mut self, technique: &dyn Technique) -> Self {
        while self.apply_checked(technique) {}
        self
    }

    /// Asserts that the cell is now decided to `digit`.
    #[must_use]
    #[track_caller]
    pub fn assert_placed(self, pos: Position, digit: Digit) -> Self {
        assert_eq!(
            self.grid.candidates_at(pos).as_single(),
            Some(digit),
            "expected {digit} placed at {pos}, candidates are {:?}",
            self.grid.candidates_at(pos),
        );
        self
    }

    /// Asserts that each digit was a candidate at `pos` initially and has
    /// been removed.
    #[must_use]
    #[track_caller]
    pub fn assert_removed_includes(
        self,
        pos: Position,
        digits: impl IntoIterator<Item = Digit>,
    ) -> Self {
        for digit in digits {
            assert!(
                self.initial.candidates_at(pos).contains(digit),
                "{digit} was not a candidate at {pos} to begin with",
            );
            assert!(
                !self.grid.candidates_at(pos).contains(digit),
                "{digit} was not removed at {pos}",
            );
        }
        self
    }

    /// Asserts that exactly the given digits were removed at `pos`.
    #[must_use]
    #[track_caller]
    pub fn assert_removed_exact(
        self,
        pos: Position,
        digits: impl IntoIterator<Item = Digit>,
    ) -> Self {
        let mut expected = DigitSet::new();
        for digit in digits {
            expected.insert(digit);
        }
        let removed = self
            .initial
            .candidates_at(pos)
            .difference(self.grid.candidates_at(pos));
        assert_eq!(
            removed, expected,
            "removed candidates at {pos} differ from expectation",
        );
        self
    }

    /// Asserts that the candidates at `pos` are unchanged.
    #[must_use]
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        assert_eq!(
            self.initial.candidates_at(pos),
            self.grid.candidates_at(pos),
            "candidates at {pos} changed",
        );
        self
    }

    /// Returns the current grid state.
    #[must_use]
    pub fn grid(&self) -> &TechniqueGrid {
        &self.grid
    }

    #[track_caller]
    fn apply_checked(&mut self, technique: &dyn Technique) -> bool {
        let step = if self.check_find_step {
            match technique.find_step(&self.grid) {
                Ok(step) => step,
                Err(e) => panic!("{} find_step failed: {e}", technique.name()),
            }
        } else {
            None
        };
        let before = self.grid.clone();
        let changed = match technique.apply(&mut self.grid) {
            Ok(changed) => changed,
            Err(e) => panic!("{} apply failed: {e}", technique.name()),
        };
        if self.check_find_step {
            assert_eq!(
                step.is_some(),
                changed,
                "{}: find_step and apply disagree about progress",
                technique.name(),
            );
            if let Some(step) = step {
                assert_step_applied(technique.name(), &step, &before, &self.grid);
            }
        }
        changed
    }
}

/// Checks that every change a hint step promises is visible in the grid
/// after a full application.
#[track_caller]
fn assert_step_applied(
    name: &str,
    step: &BoxedTechniqueStep,
    before: &TechniqueGrid,
    after: &TechniqueGrid,
) {
    for application in step.application() {
        match application {
            TechniqueApplication::Placement { position, digit } => {
                assert_eq!(
                    after.candidates_at(position).as_single(),
                    Some(digit),
                    "{name}: step places {digit} at {position} but the cell is not decided",
                );
            }
            TechniqueApplication::CandidateElimination { positions, digits } => {
                for pos in positions {
                    for digit in digits {
                        assert!(
                            before.candidates_at(pos).contains(digit),
                            "{name}: step removes {digit} at {pos} but it was already absent",
                        );
                        assert!(
                            !after.candidates_at(pos).contains(digit),
                            "{name}: step removes {digit} at {pos} but apply did not",
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sudokit_core::{CandidateGrid, CellSet};

    use super::*;
    use crate::{
        ConditionCells, ConditionDigitCells, SolverError, TechniqueStepData,
        technique::BoxedTechnique,
    };

    #[derive(Debug, Clone)]
    struct NoOpTechnique;

    impl Technique for NoOpTechnique {
        fn name(&self) -> &'static str {
            "No-Op"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(self.clone())
        }

        fn find_step(
            &self,
            _grid: &TechniqueGrid,
        ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
            Ok(None)
        }

        fn apply(&self, _grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
            Ok(false)
        }
    }

    #[derive(Debug, Clone)]
    struct PlaceD1At00;

    impl PlaceD1At00 {
        fn target() -> Position {
            Position::new(0, 0)
        }
    }

    impl Technique for PlaceD1At00 {
        fn name(&self) -> &'static str {
            "Place D1"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(self.clone())
        }

        fn find_step(
            &self,
            grid: &TechniqueGrid,
        ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
            if !grid.would_place_change(Self::target(), Digit::D1) {
                return Ok(None);
            }
            let step = TechniqueStepData::new(
                self.name(),
                ConditionCells::from_elem(Self::target()),
                ConditionDigitCells::new(),
                vec![TechniqueApplication::Placement {
                    position: Self::target(),
                    digit: Digit::D1,
                }],
            );
            Ok(Some(Box::new(step)))
        }

        fn apply(&self, grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
            if !grid.would_place_change(Self::target(), Digit::D1) {
                return Ok(false);
            }
            grid.place(Self::target(), Digit::D1);
            Ok(true)
        }
    }

    /// Claims a step but never mutates the grid.
    #[derive(Debug, Clone)]
    struct LyingTechnique;

    impl Technique for LyingTechnique {
        fn name(&self) -> &'static str {
            "Lying"
        }

        fn clone_box(&self) -> BoxedTechnique {
            Box::new(self.clone())
        }

        fn find_step(
            &self,
            _grid: &TechniqueGrid,
        ) -> Result<Option<BoxedTechniqueStep>, SolverError> {
            let step = TechniqueStepData::new(
                self.name(),
                CellSet::EMPTY,
                ConditionDigitCells::new(),
                vec![],
            );
            Ok(Some(Box::new(step)))
        }

        fn apply(&self, _grid: &mut TechniqueGrid) -> Result<bool, SolverError> {
            Ok(false)
        }
    }

    #[test]
    fn test_noop_leaves_grid_unchanged() {
        let _ = TechniqueTester::new(CandidateGrid::new())
            .apply_until_stuck(&NoOpTechnique)
            .assert_no_change(Position::new(0, 0))
            .assert_no_change(Position::new(8, 8));
    }

    #[test]
    fn test_placement_is_observed() {
        let _ = TechniqueTester::new(CandidateGrid::new())
            .apply_once(&PlaceD1At00)
            .assert_placed(Position::new(0, 0), Digit::D1)
            .assert_removed_exact(Position::new(0, 0), [Digit::D2, Digit::D3, Digit::D4,
                Digit::D5, Digit::D6, Digit::D7, Digit::D8, Digit::D9]);
    }

    #[test]
    fn test_apply_until_stuck_terminates() {
        let tester = TechniqueTester::new(CandidateGrid::new()).apply_until_stuck(&PlaceD1At00);
        assert_eq!(
            tester.grid().candidates_at(Position::new(0, 0)).as_single(),
            Some(Digit::D1),
        );
    }

    #[test]
    #[should_panic(expected = "disagree about progress")]
    fn test_inconsistent_technique_is_caught() {
        let _ = TechniqueTester::new(CandidateGrid::new()).apply_once(&LyingTechnique);
    }

    #[test]
    fn test_without_find_step_consistency_skips_check() {
        let _ = TechniqueTester::new(CandidateGrid::new())
            .without_find_step_consistency()
            .apply_once(&LyingTechnique)
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    #[should_panic(expected = "made no progress")]
    fn test_apply_times_requires_progress() {
        let _ = TechniqueTester::new(CandidateGrid::new()).apply_times(&NoOpTechnique, 1);
    }

    #[test]
    fn test_from_str_places_givens() {
        let tester = TechniqueTester::from_str(
            "
            1__ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
        ",
        );
        assert_eq!(
            tester.grid().candidates_at(Position::new(0, 0)).as_single(),
            Some(Digit::D1),
        );
        assert!(!tester.grid().candidates_at(Position::new(5, 0)).contains(Digit::D1));
    }
}
