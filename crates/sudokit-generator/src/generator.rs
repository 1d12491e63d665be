//! Puzzle carving.

use log::{debug, trace};
use rand::seq::SliceRandom as _;
use sudokit_core::{CellSet, DigitGrid, Position};
use sudokit_solver::{BacktrackSolver, TechniqueGrid, TechniqueSolver};

use crate::{GenerateError, PuzzleSeed, SolutionGenerator};

const SOLUTION_DOMAIN: &[u8] = b"sudokit.solution";
const CARVING_DOMAIN: &[u8] = b"sudokit.carving";

/// A generated puzzle together with its solution and seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The puzzle with clues removed.
    pub problem: DigitGrid,
    /// The complete solution the puzzle was carved from.
    pub solution: DigitGrid,
    /// The seed that produced this puzzle.
    pub seed: PuzzleSeed,
}

/// Generates puzzles solvable by a configured technique solver.
///
/// Generation carves clues out of a random solved grid: clues are visited
/// in seeded random order and removed when the puzzle still has a unique
/// solution and the technique solver can still solve it. The same seed and
/// the same technique set always produce the same puzzle, so the technique
/// set doubles as a difficulty dial.
///
/// # Examples
///
/// ```
/// use sudokit_generator::PuzzleGenerator;
/// use sudokit_solver::TechniqueSolver;
///
/// let solver = TechniqueSolver::with_all_techniques();
/// let generator = PuzzleGenerator::new(&solver);
///
/// let puzzle = generator.generate()?;
/// assert!(puzzle.solution.is_complete());
/// assert!(puzzle.problem.filled_count() < 81);
/// # Ok::<(), sudokit_generator::GenerateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleGenerator<'a> {
    solver: &'a TechniqueSolver,
}

impl<'a> PuzzleGenerator<'a> {
    /// Creates a generator whose puzzles are solvable by `solver`.
    #[must_use]
    pub fn new(solver: &'a TechniqueSolver) -> Self {
        Self { solver }
    }

    /// Generates a puzzle from a fresh random seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the technique solver reports an
    /// inconsistency while carving. That only happens when a technique is
    /// unsound, so callers normally treat it as a bug.
    pub fn generate(&self) -> Result<GeneratedPuzzle, GenerateError> {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates the puzzle determined by `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if the technique solver reports an
    /// inconsistency while carving.
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> Result<GeneratedPuzzle, GenerateError> {
        let solution = SolutionGenerator::generate(&mut seed.stream(SOLUTION_DOMAIN));

        let mut order: Vec<Position> = CellSet::FULL.into_iter().collect();
        order.shuffle(&mut seed.stream(CARVING_DOMAIN));

        let uniqueness = BacktrackSolver::new();
        let mut problem = solution.clone();
        for pos in order {
            let Some(digit) = problem.get(pos) else {
                continue;
            };
            problem.clear(pos);
            if uniqueness.has_unique_solution(&problem) && self.is_solvable(&problem)? {
                trace!("removed clue at {pos}, {} left", problem.filled_count());
            } else {
                problem.set(pos, digit);
            }
        }

        debug!(
            "generated puzzle with {} clues from seed {seed}",
            problem.filled_count(),
        );
        Ok(GeneratedPuzzle {
            problem,
            solution,
            seed,
        })
    }

    fn is_solvable(&self, problem: &DigitGrid) -> Result<bool, GenerateError> {
        let mut grid = TechniqueGrid::from_digit_grid(problem);
        let (solved, _stats) = self.solver.solve(&mut grid)?;
        Ok(solved)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use sudokit_solver::technique;

    use super::*;

    const SEED_HEX: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    fn seed() -> PuzzleSeed {
        PuzzleSeed::from_str(SEED_HEX).unwrap()
    }

    #[test]
    fn test_problem_is_subset_of_solution() {
        let solver = TechniqueSolver::with_all_techniques();
        let puzzle = PuzzleGenerator::new(&solver)
            .generate_with_seed(seed())
            .unwrap();

        for pos in CellSet::FULL {
            if let Some(digit) = puzzle.problem.get(pos) {
                assert_eq!(puzzle.solution.get(pos), Some(digit));
            }
        }
        assert!(puzzle.solution.is_complete());
    }

    #[test]
    fn test_puzzle_has_unique_solution() {
        let solver = TechniqueSolver::with_all_techniques();
        let puzzle = PuzzleGenerator::new(&solver)
            .generate_with_seed(seed())
            .unwrap();

        let backtrack = BacktrackSolver::new();
        assert!(backtrack.has_unique_solution(&puzzle.problem));
        assert_eq!(backtrack.solve(&puzzle.problem).unwrap(), puzzle.solution);
    }

    #[test]
    fn test_puzzle_is_technique_solvable() {
        let solver = TechniqueSolver::with_all_techniques();
        let puzzle = PuzzleGenerator::new(&solver)
            .generate_with_seed(seed())
            .unwrap();

        let mut grid = TechniqueGrid::from_digit_grid(&puzzle.problem);
        let (solved, stats) = solver.solve(&mut grid).unwrap();
        assert!(solved);
        assert!(stats.has_progress());
        assert_eq!(grid.to_digit_grid(), puzzle.solution);
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let solver = TechniqueSolver::with_all_techniques();
        let generator = PuzzleGenerator::new(&solver);
        let a = generator.generate_with_seed(seed()).unwrap();
        let b = generator.generate_with_seed(seed()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed, seed());
    }

    #[test]
    fn test_technique_set_changes_puzzle() {
        let fundamental = TechniqueSolver::new(technique::fundamental_techniques());
        let all = TechniqueSolver::with_all_techniques();

        let a = PuzzleGenerator::new(&fundamental)
            .generate_with_seed(seed())
            .unwrap();
        let b = PuzzleGenerator::new(&all)
            .generate_with_seed(seed())
            .unwrap();

        // Same solution stream, but carving keeps more clues when the
        // solver knows fewer techniques.
        assert_eq!(a.solution, b.solution);
        assert!(a.problem.filled_count() >= b.problem.filled_count());
    }

    #[test]
    fn test_fundamental_puzzle_solvable_by_singles_only() {
        let fundamental = TechniqueSolver::new(technique::fundamental_techniques());
        let puzzle = PuzzleGenerator::new(&fundamental)
            .generate_with_seed(seed())
            .unwrap();

        let mut grid = TechniqueGrid::from_digit_grid(&puzzle.problem);
        let (solved, _stats) = fundamental.solve(&mut grid).unwrap();
        assert!(solved);
        assert!(puzzle.problem.filled_count() >= 17);
    }
}
